//! Catalog configuration and constants
//!
//! Central values shared by the loader, the store and the CLI. Nothing here
//! is read from the environment; the catalog is sized at compile time.

/// The application name
pub const APP_NAME: &str = "Book Catalog";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of books a loaded catalog holds.
///
/// Data rows past this count are read but not stored.
pub const MAX_BOOKS: usize = 50;

/// Title field width in bytes (a 40-byte record slot minus its terminator).
pub const TITLE_CAPACITY: usize = 39;

/// Author field width in bytes.
pub const AUTHOR_CAPACITY: usize = 39;

/// Column separator of the source file.
pub const FIELD_DELIMITER: char = ';';

/// Currency label appended to prices in display output.
pub const CURRENCY_LABEL: &str = "euro";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_matches_reference_catalog() {
        assert_eq!(MAX_BOOKS, 50);
    }

    #[test]
    fn test_field_widths() {
        assert_eq!(TITLE_CAPACITY, 39);
        assert_eq!(AUTHOR_CAPACITY, 39);
    }
}
