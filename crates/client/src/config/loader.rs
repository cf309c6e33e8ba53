//! Configuration loader
//!
//! Resolves client configuration from explicit arguments with environment
//! fallback. Resolution happens exactly once, at client construction;
//! nothing reads the environment after that.
//!
//! ## Resolution Order
//! 1. Explicit constructor/builder argument
//! 2. Environment variable
//! 3. Built-in default (timeout only; a missing base URL is an error)
//!
//! ## Environment Variables
//! - `RESTLINE_BASE_URL`: Base URL all request paths resolve against
//! - `RESTLINE_API_KEY`: Bearer credential attached to every request
//! - `RESTLINE_TIMEOUT_SECS`: Per-call timeout in seconds

use std::time::Duration;

use restline_domain::constants::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_TIMEOUT_SECS, TIMEOUT_ENV};
use restline_domain::{ClientConfig, ClientError, Result};
use url::Url;

/// Resolve a full client configuration.
///
/// # Errors
/// Returns `ClientError::Config` if:
/// - No base URL is available from either source
/// - The base URL does not parse as an http(s) URL
/// - The timeout environment variable is not an integer
pub fn resolve(
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
) -> Result<ClientConfig> {
    let base_url = resolve_base_url(base_url)?;
    let api_key = resolve_api_key(api_key);
    let timeout = resolve_timeout(timeout)?;

    tracing::info!(%base_url, has_api_key = api_key.is_some(), "client configuration resolved");

    Ok(ClientConfig { base_url, api_key, timeout, ..ClientConfig::default() })
}

/// Resolve the base URL from an explicit value or the environment.
///
/// Trailing slashes are normalized away so path joining always inserts
/// exactly one separator.
///
/// # Errors
/// Returns `ClientError::Config` if no value is available or the value is
/// not a valid http(s) URL.
pub fn resolve_base_url(explicit: Option<String>) -> Result<String> {
    let raw = match explicit {
        Some(value) => value,
        None => match std::env::var(BASE_URL_ENV) {
            Ok(value) => {
                tracing::debug!(var = BASE_URL_ENV, "base URL resolved from environment");
                value
            }
            Err(_) => {
                return Err(ClientError::Config(format!(
                    "base URL must be provided either directly or through \
                     environment variable '{BASE_URL_ENV}'"
                )));
            }
        },
    };

    let normalized = raw.trim_end_matches('/').to_string();
    let parsed = Url::parse(&normalized)
        .map_err(|e| ClientError::Config(format!("invalid base URL '{normalized}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(normalized),
        other => {
            Err(ClientError::Config(format!("unsupported base URL scheme '{other}'")))
        }
    }
}

/// Resolve the API key from an explicit value or the environment.
///
/// A missing key is not an error; requests simply go out unauthenticated.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    explicit.or_else(|| {
        let key = std::env::var(API_KEY_ENV).ok();
        if key.is_some() {
            tracing::debug!(var = API_KEY_ENV, "API key resolved from environment");
        }
        key
    })
}

/// Resolve the per-call timeout from an explicit value or the environment.
///
/// # Errors
/// Returns `ClientError::Config` if the environment value is not an integer
/// number of seconds.
pub fn resolve_timeout(explicit: Option<Duration>) -> Result<Duration> {
    if let Some(timeout) = explicit {
        return Ok(timeout);
    }

    match std::env::var(TIMEOUT_ENV) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ClientError::Config(format!("invalid timeout '{raw}': {e}"))),
        Err(_) => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    }
}
