//! BookRecord: one catalog entry.

use core::fmt;

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::config::{AUTHOR_CAPACITY, CURRENCY_LABEL, TITLE_CAPACITY};

/// A single book as read from one data row.
///
/// Numeric zero means "unset": a row whose year or price could not be
/// parsed keeps the record, with that field at 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookRecord {
    /// Title (up to 39 UTF-8 bytes)
    pub title: String<TITLE_CAPACITY>,
    /// Author (up to 39 UTF-8 bytes)
    pub author: String<AUTHOR_CAPACITY>,
    /// Year of publication; 0 when unset
    pub publication_year: i32,
    /// Price; 0.0 when unset
    pub price: f32,
    /// Genre
    pub category: Category,
}

impl BookRecord {
    /// Build a record, silently truncating `title` and `author` to their
    /// field widths on a character boundary.
    #[must_use]
    pub fn new(
        title: &str,
        author: &str,
        publication_year: i32,
        price: f32,
        category: Category,
    ) -> Self {
        BookRecord {
            title: truncated(title),
            author: truncated(author),
            publication_year,
            price,
            category,
        }
    }

    /// Returns `true` when the record carries a title, a year and a price.
    ///
    /// Category listings only show records that pass this check.
    #[must_use]
    pub fn is_listable(&self) -> bool {
        !self.title.is_empty() && self.publication_year != 0 && self.price != 0.0
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Title]: {} - [Author]: {} - [Year]: {} - [Price]: {:.2} {} - [Category]: {}",
            self.title, self.author, self.publication_year, self.price, CURRENCY_LABEL, self.category
        )
    }
}

/// Copy as many whole characters of `s` as fit into a `String<N>`.
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::<N>::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
