//! Single-product detail projection.

use promocat_core::{DetailPage, RelatedItem, StockIndex};

use crate::normalize::{first_variant_kind, normalize_detail, primary_image};
use crate::types::RawProduct;

/// Maximum number of related items shown under a product.
pub const MAX_RELATED: usize = 6;

/// Looks up `id` by exact parent SKU and builds its detail page.
///
/// Returns `None` when no product has that SKU; callers render a not-found
/// state rather than an error.
#[must_use]
pub fn project_detail(
    id: &str,
    products: &[RawProduct],
    stocks: &StockIndex,
) -> Option<DetailPage> {
    let product = products.iter().find(|p| p.parent_sku == id)?;
    Some(DetailPage {
        product: normalize_detail(product, stocks),
        related: related_items(product, products, stocks),
    })
}

/// Up to [`MAX_RELATED`] other products in the same category, in source order.
#[must_use]
pub fn related_items(
    product: &RawProduct,
    products: &[RawProduct],
    stocks: &StockIndex,
) -> Vec<RelatedItem> {
    products
        .iter()
        .filter(|p| p.category == product.category && p.parent_sku != product.parent_sku)
        .take(MAX_RELATED)
        .map(|p| RelatedItem {
            id: p.parent_sku.clone(),
            name: p.name.clone(),
            image_url: primary_image(p),
            product_type: first_variant_kind(p),
            stock: stocks.get(&p.parent_sku),
        })
        .collect()
}
