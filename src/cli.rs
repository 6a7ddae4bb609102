//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Fetch Bible passages as structured content.
///
/// Looks up verses, ranges, chapters, or whole books on the passage site and
/// prints them as text or JSON. Whole books can be exported in batches.
#[derive(Parser, Debug)]
#[command(name = "versefetch")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/versefetch/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Translation code, e.g. NIV, KJV, ESV
    #[arg(short, long, global = true, value_name = "CODE")]
    pub translation: Option<String>,

    /// Delay between chapter requests in milliseconds (max 60000)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub delay_ms: Option<u64>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Write results to a JSON file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a single verse
    Verse {
        /// Book name, e.g. "John" or "1 Kings"
        book: String,
        /// Chapter number
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        chapter: u32,
        /// Verse number
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        verse: u32,
    },
    /// Fetch an inclusive verse range
    Range(RangeArgs),
    /// Fetch a whole chapter
    Chapter {
        /// Book name
        book: String,
        /// Chapter number
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        chapter: u32,
    },
    /// Fetch every chapter of a book
    Book {
        /// Book name
        book: String,
    },
    /// Export several books to JSON files, one file per book
    Batch(BatchArgs),
    /// List known translations
    Translations,
    /// List book names
    Books {
        /// Include deuterocanonical books
        #[arg(long)]
        apocrypha: bool,
    },
}

/// Arguments for `range`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RangeArgs {
    /// Book name
    pub book: String,
    /// Chapter number
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub chapter: u32,
    /// First verse
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub start: u32,
    /// Last verse (inclusive)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub end: u32,
}

impl RangeArgs {
    /// Returns an error message if the range is reversed.
    pub fn validate(&self) -> Result<(), String> {
        if self.start > self.end {
            return Err(format!(
                "Invalid range: start verse {} is after end verse {}",
                self.start, self.end
            ));
        }
        Ok(())
    }
}

/// Arguments for `batch`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    /// Directory for the exported files (default: config `output_dir` or ".")
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Books to export, in order
    #[arg(required = true, num_args = 1..)]
    pub books: Vec<String>,
}
