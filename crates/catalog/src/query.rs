//! Read-only queries over a loaded [`Catalog`].
//!
//! | Function             | Result                           |
//! |----------------------|----------------------------------|
//! | `list_all`           | every record, load order         |
//! | `find_by_title`      | position of first title match    |
//! | `search`             | first record with that title     |
//! | `filter_by_category` | listable records of one category |
//! | `list_by_category`   | same, from a category label      |
//!
//! Nothing here mutates the catalog.

use core::iter::FusedIterator;
use core::slice;

use crate::book::BookRecord;
use crate::category::Category;
use crate::store::Catalog;

/// Every record in load order.
pub fn list_all<const N: usize>(catalog: &Catalog<N>) -> slice::Iter<'_, BookRecord> {
    catalog.iter()
}

/// Position of the first record whose title equals `title`, ignoring ASCII
/// case. `None` when nothing matches.
///
/// An empty query never matches, and neither does a record with an empty
/// title.
#[must_use]
pub fn find_by_title<const N: usize>(catalog: &Catalog<N>, title: &str) -> Option<usize> {
    if title.is_empty() {
        return None;
    }
    catalog
        .iter()
        .position(|book| !book.title.is_empty() && book.title.eq_ignore_ascii_case(title))
}

/// First record whose title matches `title`; see [`find_by_title`].
#[must_use]
pub fn search<'a, const N: usize>(catalog: &'a Catalog<N>, title: &str) -> Option<&'a BookRecord> {
    find_by_title(catalog, title).and_then(|pos| catalog.get(pos))
}

/// Records of exactly `category` that also have a title, a year and a price.
///
/// The returned iterator is lazy and cheap to clone; cloning it (or calling
/// this again) restarts the listing from the first record.
#[must_use]
pub fn filter_by_category<const N: usize>(
    catalog: &Catalog<N>,
    category: Category,
) -> CategoryFilter<'_> {
    CategoryFilter {
        books: catalog.iter(),
        category,
    }
}

/// Parse `text` as a category label, then filter by it.
///
/// Unknown labels select [`Category::Narrative`].
#[must_use]
pub fn list_by_category<'a, const N: usize>(
    catalog: &'a Catalog<N>,
    text: &str,
) -> CategoryFilter<'a> {
    filter_by_category(catalog, Category::parse(text))
}

/// Iterator returned by [`filter_by_category`].
#[derive(Debug, Clone)]
pub struct CategoryFilter<'a> {
    books: slice::Iter<'a, BookRecord>,
    category: Category,
}

impl CategoryFilter<'_> {
    /// Category being listed.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }
}

impl<'a> Iterator for CategoryFilter<'a> {
    type Item = &'a BookRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let category = self.category;
        self.books
            .by_ref()
            .find(|book| book.category == category && book.is_listable())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.books.size_hint().1)
    }
}

impl FusedIterator for CategoryFilter<'_> {}
