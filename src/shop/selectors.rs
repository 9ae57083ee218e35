//! CSS selectors for the shop's listing fragments and product pages.
//!
//! Update this file when the shop changes its markup, and add a fixture
//! under `tests/fixtures/` that reproduces the new structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the `/ajax/products` listing fragment.
pub mod listing {
    use super::*;

    /// One product card.
    pub static PRODUCT: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div.product-item.flex.flex-col.items-center.rounded-lg").unwrap()
    });

    /// Link to the detail page (first anchor in the card).
    pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    /// Product image; only images carrying a `src` attribute count.
    pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());

    pub static NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.product-name").unwrap());

    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.product-price").unwrap());
}

/// Selectors for a single product page.
pub mod detail {
    use super::*;

    /// WooCommerce description tab panel.
    pub static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "div.woocommerce-Tabs-panel.woocommerce-Tabs-panel--description.panel.entry-content.wc-tab",
        )
        .unwrap()
    });

    /// Paragraphs inside the description panel.
    pub static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

    /// SKU, tried in order: the span form first, then the div form.
    pub static SKU: LazyLock<[Selector; 2]> = LazyLock::new(|| {
        [Selector::parse("span.sku").unwrap(), Selector::parse("div.sku").unwrap()]
    });
}
