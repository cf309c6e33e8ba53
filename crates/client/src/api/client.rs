//! Generic API client over the blocking transport
//!
//! Builds requests (method, path, query, body, headers), attaches base-URL
//! and authentication configuration, performs the call, and translates the
//! outcome into a normalized payload or a typed error.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use restline_domain::constants::DEFAULT_USER_AGENT;
use restline_domain::{ClientConfig, ClientError, Method, Payload, RequestSpec, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::loader;
use crate::http::Transport;

/// Generic client for a JSON REST API.
///
/// Owns one transport session for its entire lifetime: the session is
/// acquired at construction and released exactly once, either by
/// [`ApiClient::close`] or by dropping the client. After `close()` every
/// request operation fails with [`ClientError::Closed`].
#[derive(Debug)]
pub struct ApiClient {
    transport: Option<Transport>,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a builder for fluent configuration.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Create a client resolved entirely from environment variables.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if no base URL is configured in the
    /// environment.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    fn from_config(config: ClientConfig) -> Result<Self> {
        let headers = build_default_headers(&config)?;

        let transport = Transport::builder()
            .timeout(config.timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .accept_invalid_certs(!config.verify_tls)
            .build()?;

        info!(base_url = %config.base_url, "API client initialized");

        Ok(Self { transport: Some(transport), config })
    }

    /// Base URL all request paths resolve against.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Whether the transport session has been released.
    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    /// Release the transport session.
    ///
    /// Idempotent. Every request operation after this returns
    /// [`ClientError::Closed`] without touching the network. Dropping the
    /// client without calling `close()` releases the session as well.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            info!(base_url = %self.config.base_url, "API client closed");
        }
    }

    /// Execute a fully described request.
    ///
    /// This is the single generic operation; the verb methods are thin
    /// specializations of it.
    ///
    /// # Errors
    /// - `InvalidArgument` for conflicting per-call parameters
    /// - `Closed` after the client was closed
    /// - `Connection` for transport-level failures
    /// - `Http` for non-2xx responses
    pub fn request(&self, spec: RequestSpec) -> Result<Payload> {
        spec.validate()?;

        let Some(transport) = self.transport.as_ref() else {
            return Err(ClientError::Closed);
        };

        let url = join_url(&self.config.base_url, &spec.path);
        debug!(method = %spec.method, %url, "dispatching request");

        let mut builder = transport.request(map_method(spec.method), url.as_str());

        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        if let Some(body) = &spec.json_body {
            builder = builder.json(body);
        }
        if let Some(form) = &spec.form_body {
            builder = builder.form(form);
        }
        for (name, value) in &spec.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ClientError::InvalidArgument(format!("invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ClientError::InvalidArgument(format!("invalid value for header '{name}': {e}"))
            })?;
            builder = builder.header(header_name, header_value);
        }

        let response = match transport.execute(builder) {
            Ok(response) => response,
            Err(err) => {
                warn!(method = %spec.method, %url, error = %err, "request failed");
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(
                method = %spec.method,
                %url,
                status = status.as_u16(),
                "request returned error status"
            );
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: if body.is_empty() { None } else { Some(body) },
            });
        }

        let text = response.text().map_err(|err| {
            let transport_err: crate::errors::TransportError = err.into();
            ClientError::from(transport_err)
        })?;

        info!(method = %spec.method, %url, status = status.as_u16(), "request succeeded");
        Ok(normalize_body(text))
    }

    /// Send a GET request.
    pub fn get(&self, path: &str) -> Result<Payload> {
        self.request(RequestSpec::new(Method::Get, path))
    }

    /// Send a POST request with a JSON body.
    pub fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Payload> {
        self.request(RequestSpec::new(Method::Post, path).json(to_json(body)?))
    }

    /// Send a PUT request with a JSON body.
    pub fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Payload> {
        self.request(RequestSpec::new(Method::Put, path).json(to_json(body)?))
    }

    /// Send a PATCH request with a JSON body.
    pub fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Payload> {
        self.request(RequestSpec::new(Method::Patch, path).json(to_json(body)?))
    }

    /// Send a DELETE request.
    pub fn delete(&self, path: &str) -> Result<Payload> {
        self.request(RequestSpec::new(Method::Delete, path))
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    verify_tls: Option<bool>,
    default_headers: Vec<(String, String)>,
}

impl ApiClientBuilder {
    /// Set the base URL (falls back to `RESTLINE_BASE_URL`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key (falls back to `RESTLINE_API_KEY`).
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the fixed per-call timeout (falls back to
    /// `RESTLINE_TIMEOUT_SECS`, then 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Toggle TLS certificate validation.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Append a header attached to every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the API client.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if configuration cannot be resolved or
    /// the transport cannot be constructed.
    pub fn build(self) -> Result<ApiClient> {
        let mut config = loader::resolve(self.base_url, self.api_key, self.timeout)?;
        if let Some(verify) = self.verify_tls {
            config.verify_tls = verify;
        }
        config.default_headers = self.default_headers;

        ApiClient::from_config(config)
    }
}

/// Session-wide header set: content negotiation, caller defaults, then the
/// bearer credential unless a caller default already claimed Authorization.
fn build_default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in &config.default_headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ClientError::Config(format!("invalid default header name '{name}': {e}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            ClientError::Config(format!("invalid value for default header '{name}': {e}"))
        })?;
        headers.insert(header_name, header_value);
    }

    if let Some(api_key) = &config.api_key {
        if !headers.contains_key(AUTHORIZATION) {
            let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| ClientError::Config(format!("invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
    }

    Ok(headers)
}

/// Join the base URL and a request path with exactly one separating slash,
/// regardless of leading/trailing slashes on either side.
fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn map_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Normalize a success body into the tagged payload form.
///
/// JSON parse failure is a soft failure: the body is returned verbatim as
/// text instead of propagating an error.
fn normalize_body(text: String) -> Payload {
    if text.is_empty() {
        return Payload::Empty;
    }
    match serde_json::from_str(&text) {
        Ok(value) => Payload::Json(value),
        Err(err) => {
            debug!(error = %err, "response body is not JSON, returning raw text");
            Payload::Text(text)
        }
    }
}

fn to_json<T: Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::InvalidArgument(format!("failed to serialize request body: {e}")))
}
