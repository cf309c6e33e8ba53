//! Per-call request descriptions

use serde_json::Value;

use crate::errors::{ClientError, Result};
use crate::types::Method;

/// Transient description of one API call
///
/// Built fluently, consumed by a single request, then discarded. Carries no
/// connection state; the client owns the transport.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP verb.
    pub method: Method,
    /// Resource path, resolved against the client's base URL.
    pub path: String,
    /// Query parameters, appended percent-encoded.
    pub query: Vec<(String, String)>,
    /// JSON body. Mutually exclusive with `form_body`.
    pub json_body: Option<Value>,
    /// Form-encoded body. Mutually exclusive with `json_body`.
    pub form_body: Option<Vec<(String, String)>>,
    /// Extra headers, merged over the client's defaults.
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Start a request description for the given verb and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            json_body: None,
            form_body: None,
            headers: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }

    /// Append a form field, attaching a form body if none exists yet.
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_body.get_or_insert_with(Vec::new).push((key.into(), value.into()));
        self
    }

    /// Append a per-call header, overriding any client default of the same
    /// name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Reject malformed per-call parameter combinations.
    ///
    /// Called before any network activity.
    pub fn validate(&self) -> Result<()> {
        if self.json_body.is_some() && self.form_body.is_some() {
            return Err(ClientError::InvalidArgument(
                "request cannot carry both a JSON body and a form body".to_string(),
            ));
        }
        Ok(())
    }
}
