//! Blocking HTTP transport
//!
//! Thin wrapper over `reqwest::blocking::Client`. Each call is a single
//! attempt that blocks until the server answers or the configured timeout
//! elapses; connection pooling and TLS are delegated entirely to reqwest.

use std::time::Duration;

use reqwest::blocking::{Client as ReqwestClient, RequestBuilder, Response};
use reqwest::Method;
use restline_domain::{ClientError, Result};
use tracing::debug;

use crate::errors::TransportError;

/// Blocking HTTP transport with a fixed per-call timeout.
#[derive(Debug, Clone)]
pub struct Transport {
    client: ReqwestClient,
}

impl Transport {
    /// Start building a new transport.
    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder in a single attempt.
    pub fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(|err| {
            let transport: TransportError = err.into();
            ClientError::from(transport)
        })?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request) {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                let transport: TransportError = err.into();
                Err(ClientError::from(transport))
            }
        }
    }
}

/// Builder for [`Transport`].
#[derive(Debug)]
pub struct TransportBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
    accept_invalid_certs: bool,
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
            default_headers: None,
            accept_invalid_certs: false,
        }
    }
}

impl TransportBuilder {
    /// Fixed timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// User agent sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers attached to every request unless the request sets the same
    /// header itself.
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Skip TLS certificate validation (e.g., self-signed certs).
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Returns `ClientError::Config` if the underlying client cannot be
    /// constructed.
    pub fn build(self) -> Result<Transport> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| {
            ClientError::Config(format!("failed to build HTTP transport: {err}"))
        })?;

        Ok(Transport { client })
    }
}
