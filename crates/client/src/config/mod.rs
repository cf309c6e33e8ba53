//! Configuration resolution
//!
//! This module provides utilities for resolving client configuration from
//! explicit arguments with environment-variable fallback.

pub mod loader;

// Re-export commonly used items
pub use loader::{resolve, resolve_api_key, resolve_base_url, resolve_timeout};
