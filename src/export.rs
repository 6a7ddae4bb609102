//! JSON file export and plain-text rendering of content items.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::passage::ContentItem;

/// Errors writing exported passages.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File system error creating or writing the output.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The output path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Items could not be serialized.
    #[error("JSON serialization failed for {path}: {source}")]
    Json {
        /// The output path.
        path: PathBuf,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl ExportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// File name for an exported book: `Song_of_Solomon_KJV.json`.
#[must_use]
pub fn book_file_name(book: &str, translation: &str) -> String {
    format!("{}_{}.json", book.trim().replace(' ', "_"), translation.trim())
}

/// Pretty-printed JSON for a list of items; non-ASCII text is kept as-is.
///
/// # Errors
///
/// Returns the serde error if serialization fails.
pub fn to_json_string(items: &[ContentItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

/// Writes items as a pretty JSON array, creating parent directories.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or file cannot be written.
pub fn write_json(path: &Path, items: &[ContentItem]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, items).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(|e| ExportError::io(path, e))?;
    writer.flush().map_err(|e| ExportError::io(path, e))?;
    debug!(path = %path.display(), items = items.len(), "Wrote JSON export");
    Ok(())
}

/// One line per item, in the `[VERSE 1] text` display format.
#[must_use]
pub fn render_text(items: &[ContentItem]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn sample() -> Vec<ContentItem> {
        vec![
            ContentItem::Heading {
                text: "Génesis".to_string(),
            },
            ContentItem::Verse {
                book: "Genesis".to_string(),
                chapter: 1,
                number: 1,
                text: "En el principio".to_string(),
            },
        ]
    }

    #[test]
    fn test_book_file_name_replaces_spaces() {
        assert_eq!(book_file_name("Song of Solomon", "KJV"), "Song_of_Solomon_KJV.json");
        assert_eq!(book_file_name("Ruth", "NIV"), "Ruth_NIV.json");
    }

    #[test]
    fn test_write_json_round_trips_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_json(&path, &sample()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Génesis"), "non-ASCII must not be escaped: {raw}");
        let parsed: Vec<ContentItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_write_json_parent_is_file_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = write_json(&blocker.join("out.json"), &sample()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            render_text(&sample()),
            "[HEADING] Génesis\n[VERSE 1] En el principio\n"
        );
    }
}
