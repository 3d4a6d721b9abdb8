//! Domain model for the promotional-products catalog browser.
//!
//! Everything here is pure: view models, the stock index, the filter and
//! pagination engine, route resolution, and environment-driven configuration.
//! Fetching and raw-record decoding live in `promocat-gateway`.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod route;
pub mod stock;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    CatalogItem, ColorStock, DetailPage, DetailRow, ProductDetail, ProductDetails, RelatedItem,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{
    apply_default_view, categories, filter_by_availability, filter_by_category, load_more, search,
    Availability, CatalogQuery, CatalogView, DEFAULT_PAGE_SIZE,
};
pub use route::Route;
pub use stock::StockIndex;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
