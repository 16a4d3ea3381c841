//! Product search term type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The lowercase text of the product search box.
///
/// Matching is plain substring containment on the lowercased title; no
/// tokenization, fuzzy matching, or ranking. The empty term matches every
/// title.
///
/// ## Examples
///
/// ```
/// use shopfront_core::SearchTerm;
///
/// let term = SearchTerm::new("RED");
/// assert!(term.matches("Red Shirt"));
/// assert!(!term.matches("Blue Jeans"));
/// assert!(SearchTerm::default().matches("anything"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Build a term from raw search box text.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    /// Returns the lowercased term.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the term is empty and matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `title` contains the term, ignoring case.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        self.is_empty() || title.to_lowercase().contains(&self.0)
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
