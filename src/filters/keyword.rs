//! Keyword-based title filtering.

use super::Filter;
use crate::olx::Listing;

/// Filters listings by keywords in the title.
///
/// Matching is case-insensitive substring matching, so "car" also matches
/// "carpet".
pub struct KeywordFilter {
    /// At least one of these must appear, unless empty.
    required: Vec<String>,
    /// Terms that must NOT appear in the title.
    excluded: Vec<String>,
}

impl KeywordFilter {
    /// Creates a filter passing titles that contain at least one of `terms`.
    pub fn any_of<S: AsRef<str>>(terms: &[S]) -> Self {
        Self { required: lowercase_all(terms), excluded: Vec::new() }
    }

    /// Creates a filter rejecting titles that contain any of `terms`.
    pub fn excluded<S: AsRef<str>>(terms: &[S]) -> Self {
        Self { required: Vec::new(), excluded: lowercase_all(terms) }
    }
}

fn lowercase_all<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms.iter().map(|t| t.as_ref().to_lowercase()).collect()
}

impl Filter for KeywordFilter {
    fn matches(&self, listing: &Listing) -> bool {
        let title = listing.title.to_lowercase();

        if self.excluded.iter().any(|keyword| title.contains(keyword)) {
            return false;
        }

        self.required.is_empty() || self.required.iter().any(|term| title.contains(term))
    }

    fn description(&self) -> String {
        let mut parts = Vec::new();

        if !self.required.is_empty() {
            parts.push(format!("Must contain one of: {}", self.required.join(", ")));
        }

        if !self.excluded.is_empty() {
            parts.push(format!("Must not contain: {}", self.excluded.join(", ")));
        }

        if parts.is_empty() {
            "Keywords: any".to_string()
        } else {
            parts.join("; ")
        }
    }
}
