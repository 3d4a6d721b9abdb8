use thiserror::Error;

/// Errors returned by the remote catalog gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The envelope's `success` flag was not `true`, or its payload was missing.
    #[error("catalog API rejected {endpoint}: {message}")]
    ApiRejected { endpoint: String, message: String },

    /// The response body or payload did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl GatewayError {
    /// `true` for network failures and non-2xx responses.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}

/// Outcome of a load cycle that did not produce a view.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A newer navigation started before this load finished.
    #[error("load superseded by a newer navigation")]
    Superseded,
}
