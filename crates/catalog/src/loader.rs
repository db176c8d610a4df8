//! Loader: parse `;`-delimited book rows into a [`Catalog`].
//!
//! # Format
//!
//! ```text
//! Title;Author;Year;Price;Category      <- header, always discarded
//! Dune;Herbert;1965;15.50;Science
//! Il nome della rosa;Eco;1980;12.00;Romanzo
//! ```
//!
//! Fields are positional and unescaped. Malformed numbers degrade to zero,
//! unknown or missing categories to [`Category::Narrative`]; none of this is
//! an error. Rows past the catalog capacity are counted and discarded.
//! Consecutive delimiters collapse into one, so an empty column shifts the
//! following columns left. Blank lines, and lines holding only delimiters,
//! are skipped.

use crate::book::BookRecord;
use crate::category::Category;
use crate::config::FIELD_DELIMITER;
use crate::numeric::{parse_price, parse_year};
use crate::store::Catalog;

#[cfg(feature = "std")]
pub use self::io::{load_catalog, load_from_reader, LoadError};

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Which fields of a row fell back to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowDiagnostics {
    /// Year had no numeric prefix and was set to 0.
    pub year_defaulted: bool,
    /// Price had no numeric prefix and was set to 0.0.
    pub price_defaulted: bool,
    /// Category column was present but not a known label.
    pub category_defaulted: bool,
    /// Row had fewer than five columns.
    pub category_missing: bool,
}

impl RowDiagnostics {
    /// Returns `true` when every field parsed as written.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// A parsed data row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// The record built from the row.
    pub record: BookRecord,
    /// Defaults applied while building it.
    pub diagnostics: RowDiagnostics,
}

/// Parse one data line into a [`BookRecord`].
///
/// Columns are title, author, year, price, category; anything after the
/// fifth column is ignored. Empty columns are skipped rather than kept, so
/// `";Eco;1980"` has title `Eco`. Title and author are kept verbatim (then
/// truncated to field width). Trailing `\r`/`\n` are stripped first.
#[must_use]
pub fn parse_row(line: &str) -> ParsedRow {
    let mut fields = fields(line);

    let title = fields.next().unwrap_or("");
    let author = fields.next().unwrap_or("");
    let year = parse_year(fields.next().unwrap_or(""));
    let price = parse_price(fields.next().unwrap_or(""));

    let mut diagnostics = RowDiagnostics {
        year_defaulted: year.defaulted,
        price_defaulted: price.defaulted,
        ..RowDiagnostics::default()
    };

    let category = match fields.next() {
        Some(text) => match Category::try_parse(text.trim_end_matches(['\r', '\n'])) {
            Some(category) => category,
            None => {
                diagnostics.category_defaulted = true;
                Category::default()
            }
        },
        None => {
            diagnostics.category_missing = true;
            Category::default()
        }
    };

    ParsedRow {
        record: BookRecord::new(title, author, year.value, price.value, category),
        diagnostics,
    }
}

/// Non-empty `;`-separated columns of `line`, line terminators removed.
fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches(['\r', '\n'])
        .split(FIELD_DELIMITER)
        .filter(|field| !field.is_empty())
}

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// Result of a completed load.
#[derive(Debug, Clone)]
pub struct LoadReport<const N: usize> {
    /// The loaded catalog, in file order.
    pub catalog: Catalog<N>,
    /// Blank data lines that were skipped.
    pub skipped_blank: usize,
    /// Data rows read after the catalog was full.
    pub dropped: usize,
    /// Stored rows where at least one field fell back to its default.
    pub degraded: usize,
}

impl<const N: usize> LoadReport<N> {
    /// Number of records actually stored.
    #[must_use]
    pub fn count(&self) -> usize {
        self.catalog.len()
    }

    /// Returns `true` when rows were discarded because the catalog was full.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.dropped > 0
    }

    /// Consume the report, keeping only the catalog.
    #[must_use]
    pub fn into_catalog(self) -> Catalog<N> {
        self.catalog
    }
}

/// Line-at-a-time accumulator shared by the string and reader front ends.
struct RowSink<const N: usize> {
    report: LoadReport<N>,
    line_no: usize,
}

impl<const N: usize> RowSink<N> {
    fn new() -> Self {
        RowSink {
            report: LoadReport {
                catalog: Catalog::new(),
                skipped_blank: 0,
                dropped: 0,
                degraded: 0,
            },
            line_no: 0,
        }
    }

    fn accept(&mut self, line: &str) {
        self.line_no = self.line_no.saturating_add(1);
        if self.line_no == 1 {
            return; // header
        }

        if fields(line).next().is_none() {
            self.report.skipped_blank = self.report.skipped_blank.saturating_add(1);
            return;
        }

        let ParsedRow { record, diagnostics } = parse_row(line);
        if self.report.catalog.insert(record).is_err() {
            if self.report.dropped == 0 {
                tracing::warn!(
                    capacity = N,
                    line = self.line_no,
                    "catalog full; remaining rows are not stored"
                );
            }
            self.report.dropped = self.report.dropped.saturating_add(1);
            return;
        }

        if !diagnostics.is_clean() {
            tracing::debug!(
                line = self.line_no,
                year_defaulted = diagnostics.year_defaulted,
                price_defaulted = diagnostics.price_defaulted,
                category_defaulted = diagnostics.category_defaulted,
                category_missing = diagnostics.category_missing,
                "row fields fell back to defaults"
            );
            self.report.degraded = self.report.degraded.saturating_add(1);
        }
    }

    fn finish(self) -> LoadReport<N> {
        tracing::info!(
            stored = self.report.count(),
            dropped = self.report.dropped,
            skipped_blank = self.report.skipped_blank,
            degraded = self.report.degraded,
            "catalog loaded"
        );
        self.report
    }
}

/// Load a catalog from in-memory text.
///
/// The first line is treated as a header and discarded.
#[must_use]
pub fn load_from_str<const N: usize>(text: &str) -> LoadReport<N> {
    let mut sink = RowSink::<N>::new();
    for line in text.lines() {
        sink.accept(line);
    }
    sink.finish()
}

// ---------------------------------------------------------------------------
// File / reader front end (std)
// ---------------------------------------------------------------------------

#[cfg(feature = "std")]
mod io {
    use std::fs::File;
    use std::io::{self, BufRead, BufReader};
    use std::path::{Path, PathBuf};

    use super::{LoadReport, RowSink};
    use crate::config::MAX_BOOKS;

    /// Error type for loading a catalog from a file or reader.
    #[derive(Debug)]
    pub enum LoadError {
        /// The source file could not be opened.
        Open {
            /// Path that was requested.
            path: PathBuf,
            /// Underlying OS error.
            source: io::Error,
        },
        /// Reading from an opened source failed.
        Read(io::Error),
    }

    impl core::fmt::Display for LoadError {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            match self {
                Self::Open { path, source } => {
                    write!(f, "cannot open catalog file {}: {}", path.display(), source)
                }
                Self::Read(e) => write!(f, "error reading catalog data: {}", e),
            }
        }
    }

    impl std::error::Error for LoadError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                Self::Open { source, .. } => Some(source),
                Self::Read(e) => Some(e),
            }
        }
    }

    impl From<io::Error> for LoadError {
        fn from(e: io::Error) -> Self {
            Self::Read(e)
        }
    }

    /// Open `path` and load it into a catalog of [`MAX_BOOKS`] entries.
    ///
    /// The file handle is dropped before this returns.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Open` if the file cannot be opened and
    /// `LoadError::Read` if reading it fails part-way.
    pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<LoadReport<MAX_BOOKS>, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "reading catalog file");
        load_from_reader(BufReader::new(file))
    }

    /// Load a catalog from any buffered reader.
    ///
    /// Lines are decoded leniently: invalid UTF-8 is replaced rather than
    /// rejected. The reader is consumed to the end.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Read` on I/O failure.
    pub fn load_from_reader<R: BufRead, const N: usize>(
        mut reader: R,
    ) -> Result<LoadReport<N>, LoadError> {
        let mut sink = RowSink::<N>::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            sink.accept(&String::from_utf8_lossy(&buf));
        }
        Ok(sink.finish())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::store::BookCatalog;

    const HEADER: &str = "T;A;Y;P;C\n";

    fn load(text: &str) -> LoadReport<{ crate::config::MAX_BOOKS }> {
        load_from_str(text)
    }

    #[test]
    fn test_single_row_loads() {
        let report = load("T;A;Y;P;C\nDune;Herbert;1965;15.50;Science\n");
        assert_eq!(report.count(), 1);
        let book = report.catalog.get(0).unwrap();
        assert_eq!(book.title.as_str(), "Dune");
        assert_eq!(book.author.as_str(), "Herbert");
        assert_eq!(book.publication_year, 1965);
        assert!((book.price - 15.50).abs() < f32::EPSILON);
        assert_eq!(book.category, Category::Science);
    }

    #[test]
    fn test_header_is_never_parsed() {
        let report = load("Dune;Herbert;1965;15.50;Science\n");
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn test_empty_input_loads_nothing() {
        assert_eq!(load("").count(), 0);
        assert_eq!(load(HEADER).count(), 0);
    }

    #[test]
    fn test_non_numeric_year_degrades_to_zero() {
        let report = load(&format!("{HEADER}Foo;Bar;abc;9.99;Art\n"));
        let book = report.catalog.get(0).unwrap();
        assert_eq!(book.publication_year, 0);
        assert_eq!(book.category, Category::Art);
        assert_eq!(report.degraded, 1);
    }

    #[test]
    fn test_missing_category_defaults_to_narrative() {
        let parsed = parse_row("Foo;Bar;2000;9.99");
        assert_eq!(parsed.record.category, Category::Narrative);
        assert!(parsed.diagnostics.category_missing);
        assert!(!parsed.diagnostics.category_defaulted);
    }

    #[test]
    fn test_unknown_category_defaults_to_narrative() {
        let parsed = parse_row("Foo;Bar;2000;9.99;Poetry");
        assert_eq!(parsed.record.category, Category::Narrative);
        assert!(parsed.diagnostics.category_defaulted);
    }

    #[test]
    fn test_crlf_line_endings() {
        let report = load("T;A;Y;P;C\r\nDune;Herbert;1965;15.50;Science\r\nEmma;Austen;1815;8.00;Romanzo\r\n");
        assert_eq!(report.count(), 2);
        assert_eq!(report.catalog.get(0).unwrap().category, Category::Science);
        assert_eq!(report.catalog.get(1).unwrap().category, Category::Novel);
        assert_eq!(report.degraded, 0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let parsed = parse_row("Dune;Herbert;1965;15.50;Science;extra;columns");
        assert_eq!(parsed.record.category, Category::Science);
        assert!(parsed.diagnostics.is_clean());
    }

    #[test]
    fn test_short_row_fills_defaults() {
        let parsed = parse_row("Lonely Title");
        assert_eq!(parsed.record.title.as_str(), "Lonely Title");
        assert!(parsed.record.author.is_empty());
        assert_eq!(parsed.record.publication_year, 0);
        assert_eq!(parsed.record.price, 0.0);
        assert!(parsed.diagnostics.year_defaulted);
        assert!(parsed.diagnostics.price_defaulted);
        assert!(parsed.diagnostics.category_missing);
    }

    #[test]
    fn test_fields_kept_verbatim() {
        let parsed = parse_row(" Dune ; Herbert ;1965;15.50;Science");
        assert_eq!(parsed.record.title.as_str(), " Dune ");
        assert_eq!(parsed.record.author.as_str(), " Herbert ");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let report = load(&format!("{HEADER}\nDune;Herbert;1965;15.50;Science\n\r\n\n"));
        assert_eq!(report.count(), 1);
        assert_eq!(report.skipped_blank, 3);
    }

    #[test]
    fn test_empty_columns_collapse() {
        let parsed = parse_row("Foo;;2000;9.99;Art");
        assert_eq!(parsed.record.title.as_str(), "Foo");
        assert_eq!(parsed.record.author.as_str(), "2000");
        assert_eq!(parsed.record.publication_year, 9);
        assert_eq!(parsed.record.price, 0.0);
        assert_eq!(parsed.record.category, Category::Narrative);
        assert!(parsed.diagnostics.price_defaulted);
        assert!(parsed.diagnostics.category_missing);
    }

    #[test]
    fn test_leading_delimiter_keeps_title() {
        let report = load(&format!("{HEADER};Eco;1980;12.00;Romanzo\n"));
        assert_eq!(report.count(), 1);
        let book = report.catalog.get(0).unwrap();
        assert_eq!(book.title.as_str(), "Eco");
        assert_eq!(book.author.as_str(), "1980");
        assert_eq!(book.publication_year, 12);
        assert!(crate::query::search(&report.catalog, "eco").is_some());
    }

    #[test]
    fn test_delimiter_only_lines_skipped() {
        let report = load(&format!("{HEADER};;;;\nDune;Herbert;1965;15.50;Science\n;\r\n"));
        assert_eq!(report.count(), 1);
        assert_eq!(report.skipped_blank, 2);
        assert!(report.catalog.iter().all(|b| !b.title.is_empty()));
    }

    #[test]
    fn test_capacity_keeps_first_rows_in_order() {
        let mut text = String::from(HEADER);
        for i in 0..5 {
            text.push_str(&format!("Book {i};Author;2000;1.00;Art\n"));
        }
        let report: LoadReport<3> = load_from_str(&text);
        assert_eq!(report.count(), 3);
        assert_eq!(report.dropped, 2);
        assert!(report.truncated());
        let titles: Vec<_> = report.catalog.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Book 0", "Book 1", "Book 2"]);
    }

    #[test]
    fn test_reference_capacity_never_exceeded() {
        let mut text = String::from(HEADER);
        for i in 0..80 {
            text.push_str(&format!("Book {i};Author;2000;1.00;Art\n"));
        }
        let catalog: BookCatalog = load(&text).into_catalog();
        assert_eq!(catalog.len(), crate::config::MAX_BOOKS);
        assert_eq!(catalog.get(49).unwrap().title.as_str(), "Book 49");
    }

    #[cfg(feature = "std")]
    mod reader {
        use super::*;
        use std::io::Cursor;

        #[test]
        fn test_reader_matches_str_loader() {
            let text = "T;A;Y;P;C\nDune;Herbert;1965;15.50;Science\nFoo;Bar;abc;9.99;Art\n";
            let from_reader: LoadReport<8> = load_from_reader(Cursor::new(text)).unwrap();
            let from_str: LoadReport<8> = load_from_str(text);
            assert_eq!(from_reader.catalog.as_slice(), from_str.catalog.as_slice());
            assert_eq!(from_reader.degraded, from_str.degraded);
        }

        #[test]
        fn test_reader_tolerates_invalid_utf8() {
            let bytes: &[u8] = b"T;A;Y;P;C\nCaf\xe9;Bar;2000;3.50;Arte\n";
            let report: LoadReport<8> = load_from_reader(Cursor::new(bytes)).unwrap();
            let book = report.catalog.get(0).unwrap();
            assert!(book.title.starts_with("Caf"));
            assert_eq!(book.category, Category::Art);
        }

        #[test]
        fn test_missing_file_is_open_error() {
            let err = load_catalog("/definitely/not/here.csv").unwrap_err();
            assert!(matches!(err, LoadError::Open { .. }));
            assert!(err.to_string().contains("/definitely/not/here.csv"));
        }
    }
}
