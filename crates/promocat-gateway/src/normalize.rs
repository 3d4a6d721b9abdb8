//! Normalization from raw catalog API records to [`promocat_core`] view models.
//!
//! Every function here is total: missing optional data resolves to empty
//! strings, empty lists, zero stock, or blank detail rows.

use promocat_core::{CatalogItem, ColorStock, ProductDetail, ProductDetails, StockIndex};

use crate::colors::{color_label, resolve_color_hex};
use crate::types::{RawPackaging, RawProduct, RawStockEntry};

/// Folds the stock rows into a [`StockIndex`].
///
/// Duplicate material codes should not occur; when they do, the later row
/// wins and a warning is logged.
#[must_use]
pub fn build_stock_index(entries: &[RawStockEntry]) -> StockIndex {
    let mut index = StockIndex::new();
    for entry in entries {
        if let Some(previous) = index.insert(entry.material.clone(), entry.quantity) {
            tracing::warn!(
                material = %entry.material,
                previous,
                replacement = entry.quantity,
                "duplicate stock code; later entry wins"
            );
        }
    }
    index
}

/// Normalizes every product for the catalog listing, preserving source order.
#[must_use]
pub fn normalize_catalog(products: &[RawProduct], stocks: &StockIndex) -> Vec<CatalogItem> {
    products
        .iter()
        .map(|product| normalize_item(product, stocks))
        .collect()
}

fn normalize_item(product: &RawProduct, stocks: &StockIndex) -> CatalogItem {
    CatalogItem {
        id: product.parent_sku.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        category: product.category.clone(),
        image_url: primary_image(product),
        product_type: first_variant_kind(product),
        stock: stocks.get(&product.parent_sku),
    }
}

/// Builds the detail projection of one product.
#[must_use]
pub fn normalize_detail(product: &RawProduct, stocks: &StockIndex) -> ProductDetail {
    let images = product
        .images
        .iter()
        .chain(product.variants.first().into_iter().flat_map(|v| &v.images))
        .cloned()
        .collect();

    let colors = product
        .variants
        .iter()
        .map(|variant| ColorStock {
            name: color_label(variant.color.as_deref()),
            stock: stocks.get(&variant.sku),
            color_hex: resolve_color_hex(variant.color_hex.as_deref(), variant.color.as_deref()),
        })
        .collect();

    ProductDetail {
        id: product.parent_sku.clone(),
        name: product.name.clone(),
        images,
        description: product.description.clone(),
        category: product.category.clone(),
        product_type: first_variant_kind(product),
        stock: stocks.get(&product.parent_sku),
        details: detail_block(product),
        colors,
    }
}

fn detail_block(product: &RawProduct) -> ProductDetails {
    let print = product.print.as_ref();
    let packaging = product.packaging.as_ref();

    ProductDetails {
        description: non_empty(Some(&product.description)),
        category: non_empty(Some(&product.category)),
        material: non_empty(product.material.as_ref()),
        product_dimensions: non_empty(product.dimensions.as_ref()),
        print_technique: non_empty(print.and_then(|p| p.technique.as_ref())),
        print_area: non_empty(print.and_then(|p| p.area.as_ref())),
        gross_weight: packaging.and_then(|p| weight(p.gross_weight.as_ref(), p)),
        net_weight: packaging.and_then(|p| weight(p.net_weight.as_ref(), p)),
        pieces_per_box: non_empty(packaging.and_then(|p| p.pieces_per_box.as_ref())),
    }
}

/// `"<value> <unit>"`, or the bare value when no unit is given.
fn weight(value: Option<&String>, packaging: &RawPackaging) -> Option<String> {
    let value = non_empty(value)?;
    match non_empty(packaging.weight_unit.as_ref()) {
        Some(unit) => Some(format!("{value} {unit}")),
        None => Some(value),
    }
}

pub(crate) fn primary_image(product: &RawProduct) -> Option<String> {
    product.images.first().cloned()
}

pub(crate) fn first_variant_kind(product: &RawProduct) -> String {
    product
        .variants
        .first()
        .map(|v| v.kind.clone())
        .unwrap_or_default()
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
