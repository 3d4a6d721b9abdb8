use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub api_base_url: String,
    pub api_user: String,
    pub api_password: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Catalog window increment; also the initial number of visible items.
    pub page_size: usize,
    /// Run the HTML-entity decoder over every string in remote payloads.
    pub decode_entities: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("api_user", &self.api_user)
            .field("api_password", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("decode_entities", &self.decode_entities)
            .finish()
    }
}
