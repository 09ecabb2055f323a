//! Car-cover relevance rules.
//!
//! OLX search for "car cover" returns plenty of noise: flats near a "car
//! parking", phone covers, sofas. These rules split genuine car covers from
//! the rest. The keyword sets are fixed on purpose; they are not read from
//! configuration.

use super::{FilterChain, FilterChainBuilder};
use crate::olx::{Classified, Listing};
use std::sync::LazyLock;
use tracing::debug;

/// Terms that mark a title as real estate, electronics or an unrelated rental.
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "bhk",
    "flat",
    "apartment",
    "house",
    "villa",
    "sqft",
    "sq ft",
    "sq.ft",
    "parking for rent",
    "parking for sale",
    "floor",
    "room",
    "property",
    "rent",
    "sale at",
    "urgent sale",
    "for urgent",
    "iphone",
    "phone",
    "mobile",
    "laptop",
    "led",
    "tv",
    "furniture",
    "sofa",
];

/// Car covers above this price are almost certainly something else.
pub const PRICE_CEILING: u64 = 50_000;

/// At least one of these must appear in a relevant title.
pub const SUBJECT_TERMS: &[&str] = &["car", "vehicle", "auto"];

/// At least one of these must appear in a relevant title too.
pub const ACCESSORY_TERMS: &[&str] =
    &["cover", "body cover", "seat cover", "rain cover", "dust cover"];

static CAR_COVER_CHAIN: LazyLock<FilterChain> = LazyLock::new(car_cover_chain);

/// Builds the filter chain that recognises car covers.
///
/// Filters run in order and stop at the first rejection: exclusions, then
/// the price ceiling, then the subject/accessory co-occurrence check.
pub fn car_cover_chain() -> FilterChain {
    FilterChainBuilder::new()
        .exclude_keywords(EXCLUDE_KEYWORDS)
        .price_ceiling(PRICE_CEILING)
        .any_of(SUBJECT_TERMS)
        .any_of(ACCESSORY_TERMS)
        .build()
}

/// Returns true if a listing with this title and price is a car cover.
pub fn classify(title: &str, price: &str) -> bool {
    CAR_COVER_CHAIN.matches(&Listing::new(title, price))
}

/// Splits listings into relevant and filtered-out, keeping their order.
pub fn partition(listings: Vec<Listing>) -> Classified {
    let mut classified = Classified::default();
    debug!("Active filters: {}", CAR_COVER_CHAIN.descriptions().join(", "));

    for listing in listings {
        if CAR_COVER_CHAIN.matches(&listing) {
            debug!("Added: {} - {}", listing.title, listing.price);
            classified.relevant.push(listing);
        } else {
            classified.filtered_out.push(listing);
        }
    }

    classified
}
