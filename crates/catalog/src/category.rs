//! Category: closed set of genre labels and their textual names.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Genre a book is filed under.
///
/// The discriminant is the index into [`CATEGORY_NAMES`]; it is never
/// persisted, only the name is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Fiction prose. Also the fallback for unrecognised labels.
    #[default]
    Narrative,
    /// Essays and non-fiction.
    NonFiction,
    /// Science.
    Science,
    /// Art.
    Art,
    /// Novels.
    Novel,
}

/// Canonical display name of each category, indexed by ordinal.
pub const CATEGORY_NAMES: [&str; Category::COUNT] =
    ["Narrative", "NonFiction", "Science", "Art", "Novel"];

/// Labels written by older catalog exports, accepted on parse only.
const LEGACY_LABELS: [&str; Category::COUNT] =
    ["Narrativa", "Saggistica", "Scienza", "Arte", "Romanzo"];

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 5;

    /// Every category in ordinal order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Narrative,
        Category::NonFiction,
        Category::Science,
        Category::Art,
        Category::Novel,
    ];

    /// Zero-based position in [`Category::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Category at `ordinal`, or `None` when out of range.
    #[must_use]
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// Canonical name of this category.
    #[must_use]
    pub const fn name(self) -> &'static str {
        // SAFETY: every variant's ordinal is < COUNT == CATEGORY_NAMES.len().
        #[allow(clippy::indexing_slicing)]
        let name = CATEGORY_NAMES[self.ordinal()];
        name
    }

    /// Parse a category label, ASCII case-insensitively.
    ///
    /// Both the canonical names and the legacy labels are recognised; the
    /// table is scanned in ordinal order and the first match wins. Anything
    /// else, including an empty string, falls back to [`Category::Narrative`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or_default()
    }

    /// Like [`Category::parse`] but returns `None` instead of the fallback.
    #[must_use]
    pub fn try_parse(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .zip(CATEGORY_NAMES.iter().zip(LEGACY_LABELS.iter()))
            .find(|(_, (name, legacy))| {
                text.eq_ignore_ascii_case(name) || text.eq_ignore_ascii_case(legacy)
            })
            .map(|(category, _)| *category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
