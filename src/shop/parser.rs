//! HTML parser for listing fragments and product detail pages.

use crate::shop::models::{Price, ProductDetail, ProductSummary};
use crate::shop::selectors::{detail, listing};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Asset host path that real product images are served from.
pub const DEFAULT_IMAGE_PREFIX: &str = "https://scrapingcourse.com/ecommerce/wp-content";

/// Parser for the shop's HTML. Parsing never fails: anything missing from
/// the markup becomes an absent field.
#[derive(Debug, Clone)]
pub struct Parser {
    image_prefix: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_PREFIX)
    }
}

impl Parser {
    /// Creates a parser that accepts images under `image_prefix`.
    pub fn new(image_prefix: impl Into<String>) -> Self {
        Self { image_prefix: image_prefix.into() }
    }

    /// Parses a listing fragment into product summaries, in page order.
    ///
    /// An empty result means the listing has no more products.
    pub fn parse_listing(&self, html: &str) -> Vec<ProductSummary> {
        let document = Html::parse_document(html);

        let products: Vec<ProductSummary> = document
            .select(&listing::PRODUCT)
            .map(|card| {
                let product = self.parse_product_card(card);
                trace!("Parsed product: {:?}", product.name);
                product
            })
            .collect();

        debug!("Parsed {} products from listing", products.len());
        products
    }

    /// Parses a product page into its description and SKU.
    pub fn parse_detail(&self, html: &str) -> ProductDetail {
        let document = Html::parse_document(html);

        let description = document.select(&detail::DESCRIPTION).next().map(|panel| {
            panel
                .select(&detail::PARAGRAPH)
                .map(|p| p.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        });

        let sku = detail::SKU
            .iter()
            .find_map(|selector| document.select(selector).next())
            .map(|e| e.text().collect::<String>().trim().to_string());

        ProductDetail { description, sku }
    }

    /// Parses a single product card.
    fn parse_product_card(&self, card: ElementRef) -> ProductSummary {
        let product_url = card
            .select(&listing::LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(String::from);

        // Placeholder and lazy-load images live outside the asset host
        let image_url = card
            .select(&listing::IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .filter(|src| src.starts_with(&self.image_prefix))
            .map(String::from);

        let name = text_of(card, &listing::NAME);

        let price_text = text_of(card, &listing::PRICE);
        let amount = price_text.as_deref().map(parse_price).unwrap_or(0.0);

        ProductSummary { product_url, image_url, name, price: Price::new(price_text, amount) }
    }
}

/// Trimmed text of the first element matching `selector` inside `element`.
fn text_of(element: ElementRef, selector: &scraper::Selector) -> Option<String> {
    element.select(selector).next().map(|e| e.text().collect::<String>().trim().to_string())
}

/// Parses a price such as `$1,234.50` into a number.
///
/// Only `$` and `,` are dropped; anything else that is not a plain number,
/// ranges and free text included, yields 0.0.
pub fn parse_price(text: &str) -> f64 {
    text.trim().replace(['$', ','], "").parse().unwrap_or(0.0)
}
