//! HTTP client for the promotional-products catalog API.
//!
//! Both endpoints are `POST`s whose body is the account credential object.
//! Responses are wrapped in a `{"success": bool, ...}` envelope; the payload
//! key differs per endpoint (`response` for products, `Stocks` for stocks).
//! Anything other than `"success": true` surfaces as
//! [`GatewayError::ApiRejected`]. There are no retries: a failed fetch fails
//! the whole load.

use std::future::Future;
use std::time::Duration;

use promocat_core::config::DEFAULT_API_BASE_URL;
use promocat_core::AppConfig;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::entities::decode_entities_in_place;
use crate::error::GatewayError;
use crate::types::{RawProduct, RawStockEntry};

const PRODUCTS_ENDPOINT: &str = "all-products";
const PRODUCTS_PAYLOAD_KEY: &str = "response";
const STOCKS_ENDPOINT: &str = "all-stocks";
const STOCKS_PAYLOAD_KEY: &str = "Stocks";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "promocat/0.1 (catalog-browser)";

/// Account credentials sent as the JSON body of every request.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Everything the gateway needs, injected at construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Decode HTML entities in every string of both payloads.
    pub decode_entities: bool,
}

impl GatewayConfig {
    /// Config with default timeout, user agent, and entity decoding on.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            decode_entities: true,
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            credentials: Credentials::new(&config.api_user, &config.api_password),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            decode_entities: config.decode_entities,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, Credentials::new("", ""))
    }
}

/// Source of the two raw datasets a load cycle joins.
///
/// [`GatewayClient`] is the production implementation; tests substitute
/// in-memory sources.
pub trait CatalogSource: Send + Sync {
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<RawProduct>, GatewayError>> + Send;

    fn fetch_stocks(&self) -> impl Future<Output = Result<Vec<RawStockEntry>, GatewayError>> + Send;
}

/// Client for the catalog API.
pub struct GatewayClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    decode_entities: bool,
}

impl GatewayClient {
    /// Builds the client from an injected [`GatewayConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GatewayError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment (`/api`).
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GatewayError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            credentials: config.credentials,
            decode_entities: config.decode_entities,
        })
    }

    /// Fetches the full product catalog.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Http`] on network failure.
    /// - [`GatewayError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GatewayError::ApiRejected`] when `success` is not `true` or the
    ///   `response` payload is missing.
    /// - [`GatewayError::Deserialize`] if the body or payload is malformed.
    pub async fn fetch_products(&self) -> Result<Vec<RawProduct>, GatewayError> {
        self.fetch_payload(PRODUCTS_ENDPOINT, PRODUCTS_PAYLOAD_KEY).await
    }

    /// Fetches every stock row.
    ///
    /// # Errors
    ///
    /// Same as [`GatewayClient::fetch_products`], with `Stocks` as the
    /// payload key.
    pub async fn fetch_stocks(&self) -> Result<Vec<RawStockEntry>, GatewayError> {
        self.fetch_payload(STOCKS_ENDPOINT, STOCKS_PAYLOAD_KEY).await
    }

    async fn fetch_payload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload_key: &str,
    ) -> Result<Vec<T>, GatewayError> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(endpoint, url = %url, "requesting catalog endpoint");

        let body = self.request_json(&url).await?;
        let mut payload = Self::extract_payload(body, endpoint, payload_key)?;
        if self.decode_entities {
            decode_entities_in_place(&mut payload);
        }

        let records: Vec<T> =
            serde_json::from_value(payload).map_err(|e| GatewayError::Deserialize {
                context: format!("{endpoint} payload"),
                source: e,
            })?;

        tracing::info!(endpoint, count = records.len(), "fetched catalog endpoint");
        Ok(records)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| GatewayError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends the credential `POST`, asserts a 2xx status, and parses the body
    /// as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, GatewayError> {
        let response = self
            .client
            .post(url.clone())
            .json(&self.credentials)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the envelope's `success` flag and takes the payload out of it.
    fn extract_payload(
        mut body: Value,
        endpoint: &str,
        payload_key: &str,
    ) -> Result<Value, GatewayError> {
        if body.get("success").and_then(Value::as_bool) != Some(true) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request was not successful")
                .to_string();
            return Err(GatewayError::ApiRejected {
                endpoint: endpoint.to_string(),
                message,
            });
        }

        match body.get_mut(payload_key).map(Value::take) {
            Some(payload) if !payload.is_null() => Ok(payload),
            _ => Err(GatewayError::ApiRejected {
                endpoint: endpoint.to_string(),
                message: format!("success response is missing the `{payload_key}` payload"),
            }),
        }
    }
}

impl CatalogSource for GatewayClient {
    fn fetch_products(
        &self,
    ) -> impl Future<Output = Result<Vec<RawProduct>, GatewayError>> + Send {
        GatewayClient::fetch_products(self)
    }

    fn fetch_stocks(
        &self,
    ) -> impl Future<Output = Result<Vec<RawStockEntry>, GatewayError>> + Send {
        GatewayClient::fetch_stocks(self)
    }
}
