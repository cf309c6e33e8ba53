//! Request facade
//!
//! This module provides the HTTP-based API client. It assembles
//! fully-qualified requests from per-call parameters, delegates
//! transmission to the blocking transport, and normalizes responses and
//! errors into domain types.
//!
//! # Architecture
//!
//! - Uses the crate's `Transport` (no direct reqwest in callers)
//! - Bearer authentication from a configured API key
//! - No retry, backoff, caching, or pagination of any kind

pub mod client;

pub use client::{ApiClient, ApiClientBuilder};
