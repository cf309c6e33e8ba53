//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! workspace.

// Environment variables resolved once at client construction
pub const BASE_URL_ENV: &str = "RESTLINE_BASE_URL";
pub const API_KEY_ENV: &str = "RESTLINE_API_KEY";
pub const TIMEOUT_ENV: &str = "RESTLINE_TIMEOUT_SECS";

// Transport defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("restline/", env!("CARGO_PKG_VERSION"));
