//! HTML extraction for OLX search result pages.

use crate::olx::models::{
    CandidateStrategy, ExtractError, Extraction, Field, Listing, MIN_TITLE_CHARS, NOT_AVAILABLE,
    NO_DESCRIPTION, PRICE_NOT_SPECIFIED,
};
use crate::olx::selectors::{candidates, fields};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

/// Currency glyph used to spot a price in unstructured markup.
pub const CURRENCY: char = '₹';

impl CandidateStrategy {
    /// Selects the listing containers this strategy recognises.
    fn select<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        match self {
            CandidateStrategy::ItemBox => document.select(&candidates::ITEM_BOX).collect(),
            CandidateStrategy::ClassPattern => {
                document.select(&candidates::CLASS_PATTERN).collect()
            }
            CandidateStrategy::ItemLink => document
                .select(&candidates::LIST_ITEM)
                .filter(|li| li.select(&candidates::ITEM_LINK).next().is_some())
                .collect(),
        }
    }
}

/// Extracts listings from rendered search result HTML.
///
/// The extractor holds no state; the same document always yields the same
/// extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts one outcome per candidate element found in the document.
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);

        let Some((strategy, elements)) = self.find_candidates(&document) else {
            debug!("No listing candidates matched any strategy");
            return Extraction::empty();
        };

        debug!("Found {} total listings via {} strategy", elements.len(), strategy);

        let outcomes = elements
            .into_iter()
            .map(|element| {
                let outcome = self.extract_listing(element);
                if let Err(e) = &outcome {
                    trace!("Skipping candidate: {}", e);
                }
                outcome
            })
            .collect();

        Extraction { strategy: Some(strategy), outcomes }
    }

    /// Tries each candidate strategy in order; the first non-empty one wins.
    fn find_candidates<'a>(
        &self,
        document: &'a Html,
    ) -> Option<(CandidateStrategy, Vec<ElementRef<'a>>)> {
        CandidateStrategy::all().iter().find_map(|strategy| {
            let elements = strategy.select(document);
            if elements.is_empty() {
                trace!("Strategy {} found nothing", strategy);
                None
            } else {
                Some((*strategy, elements))
            }
        })
    }

    /// Extracts a single listing, rejecting candidates without a usable title.
    pub fn extract_listing(&self, element: ElementRef) -> Result<Listing, ExtractError> {
        let title = self.title(element).unwrap_or_sentinel(NOT_AVAILABLE);

        if title.is_empty() || title == NOT_AVAILABLE {
            return Err(ExtractError::MissingTitle);
        }

        let len = title.chars().count();
        if len <= MIN_TITLE_CHARS {
            return Err(ExtractError::TitleTooShort { len });
        }

        Ok(Listing {
            title,
            price: self.price(element).unwrap_or_sentinel(PRICE_NOT_SPECIFIED),
            description: self.description(element).unwrap_or_sentinel(NO_DESCRIPTION),
            location: lookup(element, &fields::LOCATION).unwrap_or_sentinel(NOT_AVAILABLE),
            date: lookup(element, &fields::DATE).unwrap_or_sentinel(NOT_AVAILABLE),
        })
    }

    fn title(&self, element: ElementRef) -> Field {
        lookup(element, &fields::TITLE)
            .or_else(|| lookup(element, &fields::TITLE_LINK))
            .or_else(|| lookup(element, &fields::TITLE_SPAN))
    }

    fn price(&self, element: ElementRef) -> Field {
        lookup(element, &fields::PRICE).or_else(|| {
            // First bare text node carrying the currency glyph
            element
                .text()
                .find(|t| t.contains(CURRENCY))
                .map(|t| Field::from_text(t.trim()))
                .unwrap_or(Field::Missing)
        })
    }

    fn description(&self, element: ElementRef) -> Field {
        lookup(element, &fields::DESCRIPTION).or_else(|| {
            element
                .select(&fields::DESCRIPTION_DIV)
                .find(|div| div.value().classes().any(|c| c.to_lowercase().contains("description")))
                .map(|div| Field::Found(element_text(div)))
                .unwrap_or(Field::Missing)
        })
    }
}

/// Looks up the first element matching `selector` and takes its text.
///
/// Presence decides the fallback: a matching element with no text is still
/// `Found`, mirroring how the page marks up empty fields.
fn lookup(element: ElementRef, selector: &Selector) -> Field {
    match element.select(selector).next() {
        Some(found) => Field::Found(element_text(found)),
        None => Field::Missing,
    }
}

/// Concatenates the trimmed, non-empty text nodes of an element.
pub fn element_text(element: ElementRef) -> String {
    element.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}
