//! Price ranking and detail-page enrichment of the top products.

use crate::shop::{EnrichedProduct, Parser, ProductDetail, ProductSummary, ShopSource};
use tracing::{debug, info, warn};

/// Returns the `n` highest priced products, most expensive first.
///
/// The sort is stable, so equal prices keep their crawl order. Fewer than
/// `n` products are returned whole.
pub fn top_by_price(mut products: Vec<ProductSummary>, n: usize) -> Vec<ProductSummary> {
    products.sort_by(|a, b| b.price.amount.total_cmp(&a.price.amount));
    products.truncate(n);
    products
}

/// Fetches the detail page of each product, one at a time, and merges in
/// its description and SKU. A failed fetch leaves both fields absent for
/// that product only.
pub async fn enrich(
    source: &impl ShopSource,
    parser: &Parser,
    products: Vec<ProductSummary>,
) -> Vec<EnrichedProduct> {
    let mut enriched = Vec::with_capacity(products.len());

    for summary in products {
        let detail = fetch_detail(source, parser, &summary).await;
        enriched.push(EnrichedProduct::new(summary, detail));
    }

    info!("Enriched {} products", enriched.len());
    enriched
}

async fn fetch_detail(
    source: &impl ShopSource,
    parser: &Parser,
    summary: &ProductSummary,
) -> ProductDetail {
    let Some(url) = summary.product_url.as_deref() else {
        warn!("Product {:?} has no URL, skipping detail page", summary.name);
        return ProductDetail::absent();
    };

    match source.product(url).await {
        Ok(html) => {
            let detail = parser.parse_detail(&html);
            debug!("Detail for {}: sku={:?}", url, detail.sku);
            detail
        }
        Err(e) => {
            warn!("Failed to retrieve product page: {}", e);
            ProductDetail::absent()
        }
    }
}
