//! Listing filtering system with composable filters.

pub mod keyword;
pub mod price;
pub mod relevance;

use crate::olx::Listing;

pub use keyword::KeywordFilter;
pub use price::{parse_price, PriceFilter};
pub use relevance::{car_cover_chain, classify, partition};

/// Trait for filtering listings.
pub trait Filter: Send + Sync {
    /// Returns true if the listing passes the filter.
    fn matches(&self, listing: &Listing) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass, checked in insertion order.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a listing passes all filters, stopping at the first failure.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.filters.iter().all(|f| f.matches(listing))
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds an excluded keywords filter.
    pub fn exclude_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        if !keywords.is_empty() {
            self.chain.add(KeywordFilter::excluded(keywords));
        }
        self
    }

    /// Adds a price ceiling filter.
    pub fn price_ceiling(mut self, ceiling: u64) -> Self {
        self.chain.add(PriceFilter::ceiling(ceiling));
        self
    }

    /// Adds a filter requiring at least one of `terms`.
    pub fn any_of<S: AsRef<str>>(mut self, terms: &[S]) -> Self {
        if !terms.is_empty() {
            self.chain.add(KeywordFilter::any_of(terms));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Filter that counts how often it runs.
    struct CountingFilter {
        calls: Arc<AtomicUsize>,
    }

    impl Filter for CountingFilter {
        fn matches(&self, _listing: &Listing) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }

        fn description(&self) -> String {
            "Counting".to_string()
        }
    }

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::default();
        assert!(chain.matches(&Listing::new("Anything", "₹1")));
    }

    #[test]
    fn test_filter_chain() {
        let mut chain = FilterChain::new();
        chain.add(PriceFilter::ceiling(1000));
        chain.add(KeywordFilter::any_of(&["cover"]));

        assert_eq!(chain.len(), 2);
        assert!(chain.matches(&Listing::new("Car cover", "₹500")));
        assert!(!chain.matches(&Listing::new("Car cover", "₹5,000")));
        assert!(!chain.matches(&Listing::new("Car mats", "₹500")));
    }

    #[test]
    fn test_filter_chain_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));

        let mut chain = FilterChain::new();
        chain.add(KeywordFilter::excluded(&["bhk"]));
        chain.add(CountingFilter { calls: Arc::clone(&calls) });

        assert!(!chain.matches(&Listing::new("2 BHK flat", "₹1")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(chain.matches(&Listing::new("Car cover", "₹1")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_builder_skips_empty_sets() {
        let empty: &[&str] = &[];
        let chain = FilterChainBuilder::default().exclude_keywords(empty).any_of(empty).build();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_builder_order() {
        let chain = FilterChainBuilder::new()
            .exclude_keywords(&["bhk"])
            .price_ceiling(100)
            .any_of(&["car"])
            .build();

        let descriptions = chain.descriptions();
        assert_eq!(descriptions.len(), 3);
        assert!(descriptions[0].contains("Must not contain"));
        assert!(descriptions[1].contains("Price"));
        assert!(descriptions[2].contains("Must contain one of"));
    }
}
