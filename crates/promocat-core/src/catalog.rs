//! Normalized view models built from the remote product and stock lists.
//!
//! All of these are snapshots: they are rebuilt from scratch on every load
//! and never mutated in place afterwards.

use serde::{Deserialize, Serialize};

/// One product as shown in the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Parent SKU.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Single opaque category string; grouping is by equality only.
    pub category: String,
    /// First parent image, if the product has any.
    pub image_url: Option<String>,
    /// Type of the first variant, or `""` when the product has no variants.
    pub product_type: String,
    pub stock: u64,
}

impl CatalogItem {
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Full detail projection for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    /// Parent images followed by the first variant's images. Duplicates are kept.
    pub images: Vec<String>,
    pub description: String,
    pub category: String,
    pub product_type: String,
    pub stock: u64,
    pub details: ProductDetails,
    /// One row per variant, in source order.
    pub colors: Vec<ColorStock>,
}

/// Structured attribute block of a [`ProductDetail`].
///
/// Every field is optional; absent values render as blank rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub description: Option<String>,
    pub category: Option<String>,
    pub material: Option<String>,
    pub product_dimensions: Option<String>,
    pub print_technique: Option<String>,
    pub print_area: Option<String>,
    /// Gross packaging weight with its unit, e.g. `"12.5 kg"`.
    pub gross_weight: Option<String>,
    /// Net packaging weight with its unit.
    pub net_weight: Option<String>,
    pub pieces_per_box: Option<String>,
}

/// A labelled line of the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    pub label: String,
    /// Empty when the source field was absent.
    pub value: String,
}

impl ProductDetails {
    /// Rows in display order. Absent fields produce rows with an empty value.
    #[must_use]
    pub fn rows(&self) -> Vec<DetailRow> {
        [
            ("Descripcion", &self.description),
            ("Categoria", &self.category),
            ("Material", &self.material),
            ("Medidas Producto", &self.product_dimensions),
            ("Tecnica Impresion", &self.print_technique),
            ("Area Impresion", &self.print_area),
            ("Peso Bruto", &self.gross_weight),
            ("Peso Neto", &self.net_weight),
            ("Piezas Por Caja", &self.pieces_per_box),
        ]
        .into_iter()
        .map(|(label, value)| DetailRow {
            label: label.to_string(),
            value: value.clone().unwrap_or_default(),
        })
        .collect()
    }
}

/// Stock of a single variant color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStock {
    /// Variant color, or `"Sin color"` when the variant has none.
    pub name: String,
    pub stock: u64,
    /// CSS hex color used for the swatch, e.g. `"#ff0000"`.
    pub color_hex: String,
}

/// Lightweight card for a product sharing the current product's category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedItem {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub product_type: String,
    pub stock: u64,
}

/// What the detail view renders: the product plus up to six related items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPage {
    pub product: ProductDetail,
    pub related: Vec<RelatedItem>,
}
