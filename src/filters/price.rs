//! Price ceiling filter.

use super::Filter;
use crate::olx::models::PRICE_NOT_SPECIFIED;
use crate::olx::parser::CURRENCY;
use crate::olx::Listing;

/// Parses a displayed price like "₹ 1,23,000" into whole rupees.
///
/// Every decimal digit in the text counts, in ASCII or Devanagari script,
/// and everything else is ignored. Returns `None` for the "not specified"
/// sentinel and for text without digits. A value too large for a `u64`
/// saturates to `u64::MAX`.
pub fn parse_price(text: &str) -> Option<u64> {
    let stripped = text.replace(CURRENCY, "").replace(',', "");
    let stripped = stripped.trim();

    if stripped.is_empty() || stripped == PRICE_NOT_SPECIFIED {
        return None;
    }

    stripped.chars().filter_map(decimal_digit).fold(None, |acc, digit| {
        Some(acc.unwrap_or(0u64).saturating_mul(10).saturating_add(u64::from(digit)))
    })
}

/// Value of a decimal digit in ASCII or Devanagari script.
fn decimal_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '\u{0966}'..='\u{096F}' => Some(c as u32 - 0x0966),
        _ => None,
    }
}

/// Rejects listings priced above a ceiling.
pub struct PriceFilter {
    ceiling: u64,
}

impl PriceFilter {
    /// Creates a filter rejecting prices strictly above `ceiling`.
    pub fn ceiling(ceiling: u64) -> Self {
        Self { ceiling }
    }
}

impl Filter for PriceFilter {
    fn matches(&self, listing: &Listing) -> bool {
        // Listings without a readable price pass the filter
        match parse_price(&listing.price) {
            Some(price) => price <= self.ceiling,
            None => true,
        }
    }

    fn description(&self) -> String {
        format!("Price: <= {}{}", CURRENCY, self.ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_listing(price: &str) -> Listing {
        Listing::new("Car body cover", price)
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("₹ 1,200"), Some(1200));
        assert_eq!(parse_price("₹75,000"), Some(75000));
        assert_eq!(parse_price("₹ 1,23,456"), Some(123456));
        assert_eq!(parse_price("1200"), Some(1200));
    }

    #[test]
    fn test_parse_price_strips_other_characters() {
        assert_eq!(parse_price("₹ 500 onwards"), Some(500));
        assert_eq!(parse_price("Rs. 450/-"), Some(450));
    }

    #[test]
    fn test_parse_price_inconclusive() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("₹"), None);
        assert_eq!(parse_price(PRICE_NOT_SPECIFIED), None);
        assert_eq!(parse_price("Free"), None);
    }

    #[test]
    fn test_parse_price_saturates() {
        assert_eq!(parse_price("₹ 99999999999999999999999"), Some(u64::MAX));
        assert_eq!(parse_price("₹ 500 (was ₹ 99,99,99,99,99,99,99,99,99,99,999)"), Some(u64::MAX));
        assert_eq!(parse_price("18446744073709551615"), Some(u64::MAX));
    }

    #[test]
    fn test_parse_price_devanagari_digits() {
        assert_eq!(parse_price("₹ ७५,०००"), Some(75000));
        assert_eq!(parse_price("₹ १,२००"), Some(1200));
        assert_eq!(parse_price("₹ 1,५००"), Some(1500));
    }

    #[test]
    fn test_ceiling() {
        let filter = PriceFilter::ceiling(50000);

        assert!(filter.matches(&make_listing("₹ 1,200")));
        assert!(filter.matches(&make_listing("₹ 50,000")));
        assert!(!filter.matches(&make_listing("₹ 50,001")));
        assert!(!filter.matches(&make_listing("₹75,000")));
        assert!(!filter.matches(&make_listing("₹ ७५,०००")));
        assert!(!filter.matches(&make_listing("₹ 99,99,99,99,99,99,99,99,99,99,999")));
    }

    #[test]
    fn test_unreadable_price_passes() {
        let filter = PriceFilter::ceiling(50000);
        assert!(filter.matches(&make_listing(PRICE_NOT_SPECIFIED)));
        assert!(filter.matches(&make_listing("")));
        assert!(filter.matches(&make_listing("Contact seller")));
    }

    #[test]
    fn test_description() {
        assert_eq!(PriceFilter::ceiling(50000).description(), "Price: <= ₹50000");
    }
}
