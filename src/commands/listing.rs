//! `translations` and `books` listings.

use std::fmt::Write as _;

use anyhow::Result;
use versefetch_core::catalog::{CANONICAL_BOOKS, DEUTEROCANONICAL_BOOKS, TRANSLATIONS, Translation};

/// Prints the translation table.
pub(crate) fn run_translations_command(json: bool) -> Result<()> {
    if json {
        println!("{}", translations_json()?);
    } else {
        print!("{}", translations_table(&TRANSLATIONS));
    }
    Ok(())
}

/// Prints book names, one per line.
pub(crate) fn run_books_command(apocrypha: bool, json: bool) -> Result<()> {
    let books = book_list(apocrypha);
    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else {
        for book in books {
            println!("{book}");
        }
    }
    Ok(())
}

fn book_list(apocrypha: bool) -> Vec<&'static str> {
    let mut books = CANONICAL_BOOKS.to_vec();
    if apocrypha {
        books.extend_from_slice(&DEUTEROCANONICAL_BOOKS);
    }
    books
}

fn translations_table(translations: &[Translation]) -> String {
    let code_width = translations
        .iter()
        .map(|t| t.code.len())
        .max()
        .unwrap_or(0)
        .max("CODE".len());
    let mut out = format!("{:<code_width$}  APOCRYPHA  NAME\n", "CODE");
    for translation in translations {
        let apocrypha = if translation.supports_apocrypha { "yes" } else { "-" };
        let _ = writeln!(
            out,
            "{:<code_width$}  {apocrypha:<9}  {}",
            translation.code, translation.label
        );
    }
    out
}

fn translations_json() -> Result<String> {
    let rows: Vec<serde_json::Value> = TRANSLATIONS
        .iter()
        .map(|t| {
            serde_json::json!({
                "code": t.code,
                "name": t.label,
                "supports_apocrypha": t.supports_apocrypha,
                "original_language": t.original_language,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
