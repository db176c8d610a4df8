//! Catalog: fixed-capacity, in-memory, ordered collection of books.
//!
//! A catalog is filled once by the loader and is read-only afterwards: the
//! only public constructors are [`Catalog::new`] (empty) and
//! [`Catalog::from_records`]. Reloading means building a new value.

use heapless::Vec;

use crate::book::BookRecord;
use crate::config::MAX_BOOKS;

/// Error type for catalog operations.
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has reached its compile-time capacity.
    Full,
}

impl core::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => f.write_str("catalog is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CatalogError {}

/// A fixed-capacity, ordered catalogue of [`BookRecord`] entries.
///
/// `N` is the maximum number of books. Order is insertion (file row) order
/// and titles need not be unique. The length is tracked explicitly, so there
/// are no placeholder slots past the last loaded record.
#[derive(Debug, Clone)]
pub struct Catalog<const N: usize> {
    books: Vec<BookRecord, N>,
}

/// Catalog sized for the reference data set.
pub type BookCatalog = Catalog<MAX_BOOKS>;

impl<const N: usize> Catalog<N> {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Catalog { books: Vec::new() }
    }

    /// Build a catalog from `records`, keeping the first `N` in order.
    ///
    /// Records past capacity are dropped silently.
    #[must_use]
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BookRecord>,
    {
        let mut catalog = Self::new();
        for record in records {
            if catalog.insert(record).is_err() {
                break;
            }
        }
        catalog
    }

    /// Append `book` to the catalog.
    ///
    /// Returns `Err(CatalogError::Full)` when capacity `N` is exhausted.
    pub(crate) fn insert(&mut self, book: BookRecord) -> Result<(), CatalogError> {
        self.books.push(book).map_err(|_| CatalogError::Full)
    }

    /// Return the book at zero-based `pos`, or `None`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&BookRecord> {
        self.books.get(pos)
    }

    /// Books in load order.
    pub fn iter(&self) -> core::slice::Iter<'_, BookRecord> {
        self.books.iter()
    }

    /// Books in load order, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[BookRecord] {
        self.books.as_slice()
    }

    /// Number of books currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns `true` when no books are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Maximum number of books this catalog can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns `true` when no further book can be stored.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.books.is_full()
    }
}

impl<const N: usize> Default for Catalog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> IntoIterator for &'a Catalog<N> {
    type Item = &'a BookRecord;
    type IntoIter = core::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
