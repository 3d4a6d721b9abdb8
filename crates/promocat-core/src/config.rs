use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://promocionalesenlinea.net/api";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let api_user = require("PROMOCAT_API_USER")?;
    let api_password = require("PROMOCAT_API_PASSWORD")?;

    let env = parse_environment(&or_default("PROMOCAT_ENV", "development"))?;

    let bind_addr = or_default("PROMOCAT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PROMOCAT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PROMOCAT_LOG_LEVEL", "info");
    let api_base_url = or_default("PROMOCAT_API_BASE_URL", DEFAULT_API_BASE_URL);
    let request_timeout_secs = parse_u64("PROMOCAT_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "PROMOCAT_REQUEST_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }
    let user_agent = or_default("PROMOCAT_USER_AGENT", "promocat/0.1 (catalog-browser)");

    let page_size = or_default("PROMOCAT_PAGE_SIZE", "24")
        .parse::<usize>()
        .map_err(|e| invalid("PROMOCAT_PAGE_SIZE", e.to_string()))?;
    if page_size == 0 {
        return Err(invalid("PROMOCAT_PAGE_SIZE", "must be at least 1".to_string()));
    }

    let decode_entities = parse_bool(
        "PROMOCAT_DECODE_ENTITIES",
        &or_default("PROMOCAT_DECODE_ENTITIES", "true"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        api_base_url,
        api_user,
        api_password,
        request_timeout_secs,
        user_agent,
        page_size,
        decode_entities,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything but `development`,
/// `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PROMOCAT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
