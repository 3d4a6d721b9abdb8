//! Wire types for the catalog API's `all-products` and `all-stocks` payloads.
//!
//! ## Shape notes
//!
//! ### Field names
//! The API speaks Spanish camelCase (`skuPadre`, `imagenesPadre`, `hijos`)
//! with the odd capitalized key (`PiezasCaja`, and `Material`/`Stock` on
//! stock rows). Rust field names are English; serde renames map them back.
//!
//! ### Loose scalars
//! Weights, piece counts and dimensions arrive as strings on some products and
//! as bare numbers on others. Every free-text scalar goes through
//! [`text_or_empty`] or [`optional_text`], which accept strings, numbers and
//! booleans and treat `null` as absent.
//!
//! ### Stock quantities
//! Usually integers, occasionally floats or numeric strings. Anything
//! negative or unparseable is read as `0` so the stock index never holds a
//! negative quantity.
//!
//! ### Malformed sub-records
//! `impresion` and `paquete` are sometimes `""` or `[]` instead of an object,
//! and `hijos` can contain `null`. Anything that is not an object is read as
//! absent so one odd product never fails the whole payload.
//!
//! ### Empty strings
//! `color` and `colorHex` are sometimes `""` rather than absent. They are kept
//! as-is here; normalization treats empty as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A parent product with its variants.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    /// Parent SKU; unique per product and the product's identity.
    #[serde(rename = "skuPadre", deserialize_with = "required_text")]
    pub parent_sku: String,

    #[serde(rename = "nombrePadre", default, deserialize_with = "text_or_empty")]
    pub name: String,

    #[serde(rename = "descripcion", default, deserialize_with = "text_or_empty")]
    pub description: String,

    /// Single category string, e.g. `"Tazas"`.
    #[serde(rename = "categorias", default, deserialize_with = "text_or_empty")]
    pub category: String,

    #[serde(rename = "imagenesPadre", default, deserialize_with = "string_list")]
    pub images: Vec<String>,

    #[serde(rename = "hijos", default, deserialize_with = "variant_list")]
    pub variants: Vec<RawVariant>,

    #[serde(default, deserialize_with = "optional_text")]
    pub material: Option<String>,

    /// Product dimensions, free text such as `"9.5 x 8 cm"`.
    #[serde(rename = "medidas", default, deserialize_with = "optional_text")]
    pub dimensions: Option<String>,

    #[serde(rename = "impresion", default, deserialize_with = "optional_object")]
    pub print: Option<RawPrintInfo>,

    #[serde(rename = "paquete", default, deserialize_with = "optional_object")]
    pub packaging: Option<RawPackaging>,
}

/// A color/type variant of a [`RawProduct`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawVariant {
    /// Variant SKU; stock rows may reference it.
    #[serde(rename = "skuHijo", default, deserialize_with = "text_or_empty")]
    pub sku: String,

    #[serde(default, deserialize_with = "optional_text")]
    pub color: Option<String>,

    #[serde(rename = "colorHex", default, deserialize_with = "optional_text")]
    pub color_hex: Option<String>,

    #[serde(rename = "tipo", default, deserialize_with = "text_or_empty")]
    pub kind: String,

    #[serde(rename = "imagenesHijo", default, deserialize_with = "string_list")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrintInfo {
    #[serde(rename = "tecnicaImpresion", default, deserialize_with = "optional_text")]
    pub technique: Option<String>,

    #[serde(rename = "areaImpresion", default, deserialize_with = "optional_text")]
    pub area: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPackaging {
    #[serde(rename = "pesoBruto", default, deserialize_with = "optional_text")]
    pub gross_weight: Option<String>,

    #[serde(rename = "pesoNeto", default, deserialize_with = "optional_text")]
    pub net_weight: Option<String>,

    /// Unit shared by both weights, e.g. `"kg"`.
    #[serde(rename = "unidadPeso", default, deserialize_with = "optional_text")]
    pub weight_unit: Option<String>,

    #[serde(rename = "PiezasCaja", default, deserialize_with = "optional_text")]
    pub pieces_per_box: Option<String>,
}

/// One row of the `all-stocks` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStockEntry {
    /// Parent or variant SKU.
    #[serde(rename = "Material", default, deserialize_with = "text_or_empty")]
    pub material: String,

    #[serde(rename = "Stock", default, deserialize_with = "stock_quantity")]
    pub quantity: u64,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_text(value).ok_or_else(|| serde::de::Error::custom("expected a string or number"))
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

/// Accepts `null` or an array; non-string entries are dropped.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Accepts `null` or an array; entries that are not objects are dropped.
fn variant_list<'de, D>(deserializer: D) -> Result<Vec<RawVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values,
        _ => return Ok(Vec::new()),
    };
    values
        .into_iter()
        .filter(Value::is_object)
        .map(|v| serde_json::from_value(v).map_err(serde::de::Error::custom))
        .collect()
}

/// `Some` only for a JSON object; every other shape is read as absent.
fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn stock_quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map_or(0, |v| match v {
        Value::Number(n) => number_to_quantity(&n),
        Value::String(s) => s
            .trim()
            .parse::<serde_json::Number>()
            .map_or(0, |n| number_to_quantity(&n)),
        _ => 0,
    }))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn number_to_quantity(n: &serde_json::Number) -> u64 {
    if let Some(u) = n.as_u64() {
        return u;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f > 0.0 => f.trunc().min(u64::MAX as f64) as u64,
        _ => 0,
    }
}
