//! Data models for OLX listings and scrape results.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Placeholder for a title, location or date that could not be found.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a price that could not be found.
pub const PRICE_NOT_SPECIFIED: &str = "Not specified";

/// Placeholder for a description that could not be found.
pub const NO_DESCRIPTION: &str = "No description available";

/// Minimum title length (exclusive) for a candidate to count as a listing.
pub const MIN_TITLE_CHARS: usize = 5;

/// A single listing scraped from a search results page.
///
/// Fields are never empty by omission: anything the extractor could not find
/// holds one of the sentinel strings above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Listing title
    #[serde(rename = "Title")]
    pub title: String,
    /// Price as displayed, e.g. "₹ 1,200"
    #[serde(rename = "Price")]
    pub price: String,
    /// Short description
    #[serde(rename = "Description")]
    pub description: String,
    /// City or area
    #[serde(rename = "Location")]
    pub location: String,
    /// When the ad was posted, as displayed
    #[serde(rename = "Date")]
    pub date: String,
}

impl Listing {
    /// Creates a listing with the given title and price; other fields hold sentinels.
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            description: NO_DESCRIPTION.to_string(),
            location: NOT_AVAILABLE.to_string(),
            date: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Result of a single field lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Found(String),
    Missing,
}

impl Field {
    /// Wraps text, treating empty text as missing.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Field::Missing
        } else {
            Field::Found(text)
        }
    }

    /// Returns this field if found, otherwise evaluates the next lookup.
    pub fn or_else(self, next: impl FnOnce() -> Field) -> Field {
        match self {
            Field::Found(_) => self,
            Field::Missing => next(),
        }
    }

    /// Returns the found value or the given sentinel.
    pub fn unwrap_or_sentinel(self, sentinel: &str) -> String {
        match self {
            Field::Found(value) => value,
            Field::Missing => sentinel.to_string(),
        }
    }
}

/// Why a candidate element was not turned into a listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no title found")]
    MissingTitle,
    #[error("title too short ({len} chars)")]
    TitleTooShort { len: usize },
}

/// Strategy that located the candidate elements on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateStrategy {
    /// Explicit `data-aut-id="itemBox"` containers.
    ItemBox,
    /// Obfuscated class names from a specific site build.
    ClassPattern,
    /// Any `<li>` holding a link to an item page.
    ItemLink,
}

impl CandidateStrategy {
    /// All strategies in the order they are tried.
    pub fn all() -> &'static [CandidateStrategy] {
        &[CandidateStrategy::ItemBox, CandidateStrategy::ClassPattern, CandidateStrategy::ItemLink]
    }
}

impl fmt::Display for CandidateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateStrategy::ItemBox => write!(f, "item-box"),
            CandidateStrategy::ClassPattern => write!(f, "class-pattern"),
            CandidateStrategy::ItemLink => write!(f, "item-link"),
        }
    }
}

/// Raw extraction output for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Strategy that produced the candidates, if any did.
    pub strategy: Option<CandidateStrategy>,
    /// One outcome per candidate element, in document order.
    pub outcomes: Vec<Result<Listing, ExtractError>>,
}

impl Extraction {
    /// An extraction where no strategy found anything.
    pub fn empty() -> Self {
        Self { strategy: None, outcomes: Vec::new() }
    }

    /// Number of candidate elements found.
    pub fn candidates(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of candidates that were rejected.
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    /// Consumes the extraction, keeping only valid listings.
    pub fn into_listings(self) -> Vec<Listing> {
        self.outcomes.into_iter().filter_map(Result::ok).collect()
    }
}

/// Listings split by relevance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classified {
    pub relevant: Vec<Listing>,
    pub filtered_out: Vec<Listing>,
}

/// Everything a scrape run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Page that was scraped
    pub url: String,
    /// Strategy that located the candidates
    pub strategy: Option<CandidateStrategy>,
    /// Number of candidate elements found
    pub candidates: usize,
    /// Candidates dropped by the title gate
    pub skipped: usize,
    /// Listings judged to be car covers
    pub relevant: Vec<Listing>,
    /// Listings judged unrelated
    pub filtered_out: Vec<Listing>,
}

impl ScrapeReport {
    /// An empty report, used when the page could not be processed.
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            strategy: None,
            candidates: 0,
            skipped: 0,
            relevant: Vec::new(),
            filtered_out: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_new_uses_sentinels() {
        let listing = Listing::new("Car Cover Deluxe", "₹500");
        assert_eq!(listing.title, "Car Cover Deluxe");
        assert_eq!(listing.price, "₹500");
        assert_eq!(listing.description, NO_DESCRIPTION);
        assert_eq!(listing.location, NOT_AVAILABLE);
        assert_eq!(listing.date, NOT_AVAILABLE);
    }

    #[test]
    fn test_listing_serializes_column_names() {
        let json = serde_json::to_string(&Listing::new("Car Cover", "₹500")).unwrap();
        assert!(json.contains("\"Title\""));
        assert!(json.contains("\"Price\""));
        assert!(json.contains("\"Description\""));
        assert!(json.contains("\"Location\""));
        assert!(json.contains("\"Date\""));
    }

    #[test]
    fn test_field_fallback() {
        let field = Field::Missing.or_else(|| Field::from_text("second"));
        assert_eq!(field, Field::Found("second".to_string()));

        let field = Field::from_text("first").or_else(|| Field::from_text("second"));
        assert_eq!(field.unwrap_or_sentinel(NOT_AVAILABLE), "first");

        assert_eq!(Field::from_text(""), Field::Missing);
        assert_eq!(Field::Missing.unwrap_or_sentinel(NOT_AVAILABLE), "N/A");
    }

    #[test]
    fn test_extraction_counts() {
        let extraction = Extraction {
            strategy: Some(CandidateStrategy::ItemBox),
            outcomes: vec![
                Ok(Listing::new("Car Body Cover", "₹900")),
                Err(ExtractError::MissingTitle),
                Err(ExtractError::TitleTooShort { len: 3 }),
            ],
        };

        assert_eq!(extraction.candidates(), 3);
        assert_eq!(extraction.skipped(), 2);
        assert_eq!(extraction.into_listings().len(), 1);
    }

    #[test]
    fn test_strategy_display_and_order() {
        assert_eq!(CandidateStrategy::ItemBox.to_string(), "item-box");
        assert_eq!(CandidateStrategy::ClassPattern.to_string(), "class-pattern");
        assert_eq!(CandidateStrategy::ItemLink.to_string(), "item-link");
        assert_eq!(CandidateStrategy::all()[0], CandidateStrategy::ItemBox);
        assert_eq!(CandidateStrategy::all().len(), 3);
    }

    #[test]
    fn test_extract_error_messages() {
        assert_eq!(ExtractError::MissingTitle.to_string(), "no title found");
        assert_eq!(
            ExtractError::TitleTooShort { len: 4 }.to_string(),
            "title too short (4 chars)"
        );
    }

    #[test]
    fn test_empty_report() {
        let report = ScrapeReport::empty("https://www.olx.in/items/q-car-cover");
        assert!(report.strategy.is_none());
        assert_eq!(report.candidates, 0);
        assert!(report.relevant.is_empty());
        assert!(report.filtered_out.is_empty());
    }
}
