//! CSS selectors for OLX HTML parsing.
//!
//! This file contains all CSS selectors used for parsing OLX search pages.
//! Update this file when OLX changes their HTML structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors that locate listing containers, one per candidate strategy.
pub mod candidates {
    use super::*;

    /// Listing container marked with `data-aut-id="itemBox"`.
    pub static ITEM_BOX: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li[data-aut-id='itemBox']").unwrap());

    /// Listing containers by obfuscated class name.
    ///
    /// These identifiers are pinned to one OLX front-end build and break
    /// whenever the site is redeployed. Keep them only as a middle fallback.
    pub static CLASS_PATTERN: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "li[class*='_1DNjI'], \
             li[class*='EIR5N']",
        )
        .unwrap()
    });

    /// Any list item, checked for an item link afterwards.
    pub static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

    /// Link to an item detail page.
    pub static ITEM_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a[href*='item']").unwrap());
}

/// Selectors for fields inside a listing container.
pub mod fields {
    use super::*;

    /// Structured title.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-aut-id='itemTitle']").unwrap());

    /// Title fallback: first link.
    pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    /// Title fallback: first inline text element.
    pub static TITLE_SPAN: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span").unwrap());

    /// Structured price.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-aut-id='itemPrice']").unwrap());

    /// Structured description.
    pub static DESCRIPTION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-aut-id='itemDescription']").unwrap());

    /// Description fallback: any div, matched on class name afterwards.
    pub static DESCRIPTION_DIV: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[class]").unwrap());

    /// Structured location.
    pub static LOCATION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-aut-id='item-location']").unwrap());

    /// Structured posting date.
    pub static DATE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[data-aut-id='item-date']").unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*candidates::ITEM_BOX;
        let _ = &*candidates::CLASS_PATTERN;
        let _ = &*candidates::LIST_ITEM;
        let _ = &*candidates::ITEM_LINK;
        let _ = &*fields::TITLE;
        let _ = &*fields::TITLE_LINK;
        let _ = &*fields::TITLE_SPAN;
        let _ = &*fields::PRICE;
        let _ = &*fields::DESCRIPTION;
        let _ = &*fields::DESCRIPTION_DIV;
        let _ = &*fields::LOCATION;
        let _ = &*fields::DATE;
    }

    #[test]
    fn test_item_box_matching() {
        let html = Html::parse_document(
            r#"<ul>
                <li data-aut-id="itemBox"><span data-aut-id="itemTitle">Car Cover</span></li>
                <li data-aut-id="other">Ignored</li>
            </ul>"#,
        );

        let results: Vec<_> = html.select(&candidates::ITEM_BOX).collect();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_class_pattern_matching() {
        let html = Html::parse_document(
            r#"<ul>
                <li class="_1DNjIabc">One</li>
                <li class="foo EIR5N">Two</li>
                <li class="plain">Three</li>
            </ul>"#,
        );

        let results: Vec<_> = html.select(&candidates::CLASS_PATTERN).collect();
        assert_eq!(results.len(), 2);
    }
}
