//! Client configuration structures

use std::time::Duration;

use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Configuration for the request facade
///
/// Immutable after construction; owned by exactly one client instance.
/// Resolution of environment fallbacks happens in `restline-client` before
/// this struct is built, never afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all request paths resolve against (trailing slashes
    /// normalized away).
    pub base_url: String,
    /// Bearer credential attached to every request unless the caller
    /// overrides the `Authorization` header per call.
    pub api_key: Option<String>,
    /// Fixed per-call timeout.
    pub timeout: Duration,
    /// Whether to validate TLS certificates.
    pub verify_tls: bool,
    /// Headers attached to every request, merged under per-call headers.
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify_tls: true,
            default_headers: Vec::new(),
        }
    }
}
