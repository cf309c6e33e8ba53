//! Common data types used throughout the request facade

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ClientError, Result};

/// HTTP verbs supported by the facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Wire representation of the verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized success payload of a request
///
/// A 2xx response is tagged by what the body actually contained: decoded
/// JSON, raw text (body present but not parseable as JSON), or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Body parsed as a JSON value (object, array, or scalar).
    Json(Value),
    /// Body present but not valid JSON; carried verbatim.
    Text(String),
    /// Body was empty.
    Empty,
}

impl Payload {
    /// Decoded JSON value, if the body parsed as JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Raw text, if the body did not parse as JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the response carried no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Decode the payload into a typed value.
    ///
    /// `Empty` decodes through JSON `null`, so unit-style responses work.
    /// A `Text` payload cannot be decoded and fails with
    /// [`ClientError::Decode`].
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            Self::Json(value) => value,
            Self::Empty => Value::Null,
            Self::Text(_) => {
                return Err(ClientError::Decode("response body is not JSON".to_string()));
            }
        };
        serde_json::from_value(value)
            .map_err(|e| ClientError::Decode(format!("failed to decode response: {e}")))
    }
}
