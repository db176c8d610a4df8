//! Output rendering for catalog listings and lookups.
//!
//! Text output reuses `BookRecord`'s `Display` layout, one record per line.
//! JSON output is pretty-printed and always well-formed, even when empty.

use std::io::Write;

use anyhow::Result;
use catalog::{BookRecord, Category};
use clap::ValueEnum;
use serde::Serialize;

/// Printed when a title lookup has no match.
pub const NOT_FOUND: &str = "Book not found.";

/// Printed when a category listing is empty.
pub const NO_CATEGORY_MATCH: &str = "No books found for the selected category.";

/// Printed when listing a catalog with no records.
pub const EMPTY_CATALOG: &str = "The catalog is empty.";

/// Output encoding for one-shot commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per record.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    book: Option<&'a BookRecord>,
}

#[derive(Serialize)]
struct CategoryOutput<'a> {
    category: Category,
    books: Vec<&'a BookRecord>,
}

/// Write every record of a listing. Returns how many were written.
pub fn write_listing<'a, W, I>(out: &mut W, records: I, format: OutputFormat) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a BookRecord>,
{
    let books: Vec<&BookRecord> = records.into_iter().collect();
    match format {
        OutputFormat::Text => {
            if books.is_empty() {
                writeln!(out, "{EMPTY_CATALOG}")?;
            }
            for book in &books {
                writeln!(out, "{book}")?;
            }
        }
        OutputFormat::Json => write_json(out, &books)?,
    }
    Ok(books.len())
}

/// Write the outcome of a title search.
pub fn write_search<W: Write>(
    out: &mut W,
    query: &str,
    found: Option<&BookRecord>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => match found {
            Some(book) => writeln!(out, "Book found: {book}")?,
            None => writeln!(out, "{NOT_FOUND}")?,
        },
        OutputFormat::Json => write_json(out, &SearchOutput { query, book: found })?,
    }
    Ok(())
}

/// Write a category listing, with an explicit message when it is empty.
/// Returns how many records were written.
pub fn write_category<'a, W, I>(
    out: &mut W,
    category: Category,
    records: I,
    format: OutputFormat,
) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a BookRecord>,
{
    let books: Vec<&BookRecord> = records.into_iter().collect();
    match format {
        OutputFormat::Text => {
            if books.is_empty() {
                writeln!(out, "{NO_CATEGORY_MATCH}")?;
            }
            for book in &books {
                writeln!(out, "{book}")?;
            }
        }
        OutputFormat::Json => {
            let count = books.len();
            write_json(out, &CategoryOutput { category, books })?;
            return Ok(count);
        }
    }
    Ok(books.len())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
