pub mod client;
pub mod colors;
pub mod detail;
pub mod entities;
pub mod error;
pub mod normalize;
pub mod session;
pub mod types;

pub use client::{CatalogSource, Credentials, GatewayClient, GatewayConfig};
pub use detail::{project_detail, related_items};
pub use error::{GatewayError, LoadError};
pub use normalize::{build_stock_index, normalize_catalog, normalize_detail};
pub use session::{
    load_snapshot, BrowseSession, CatalogSnapshot, LoadCoordinator, LoadTicket, ViewState,
};
pub use types::{RawProduct, RawStockEntry, RawVariant};
