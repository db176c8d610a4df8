//! Book catalog: semicolon-delimited loader, fixed-capacity store, queries.
//!
//! # Modules
//!
//! - [`category`]: `Category` enum and its name table
//! - [`book`]: `BookRecord` with bounded title/author fields
//! - [`store`]: `Catalog<N>` fixed-capacity ordered collection
//! - [`numeric`]: permissive integer/float coercion
//! - [`loader`]: header-skipping `;`-delimited text → `Catalog`
//! - [`query`]: title lookup and category filtering
//! - [`config`]: compile-time constants
//!
//! The crate is `no_std` unless the `std` feature (on by default) is enabled;
//! file access ([`load_catalog`]) needs `std`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod book;
pub mod category;
pub mod config;
pub mod loader;
pub mod numeric;
pub mod query;
pub mod store;

// Top-level re-exports for convenience
pub use book::BookRecord;
pub use category::Category;
pub use config::MAX_BOOKS;
#[cfg(feature = "std")]
pub use loader::{load_catalog, load_from_reader, LoadError};
pub use loader::{load_from_str, parse_row, LoadReport, ParsedRow, RowDiagnostics};
pub use query::{filter_by_category, find_by_title, list_all, list_by_category, search, CategoryFilter};
pub use store::{BookCatalog, Catalog, CatalogError};
