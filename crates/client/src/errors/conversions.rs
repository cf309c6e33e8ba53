//! Conversions from external transport errors into domain errors.

use reqwest::Error as HttpError;
use restline_domain::ClientError;

/// Error newtype that keeps conversions on the transport side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct TransportError(pub ClientError);

impl From<TransportError> for ClientError {
    fn from(value: TransportError) -> Self {
        value.0
    }
}

impl From<ClientError> for TransportError {
    fn from(value: ClientError) -> Self {
        TransportError(value)
    }
}

/// Extension trait to make the conversion logic explicit within this module.
trait IntoClientError {
    fn into_client_error(self) -> ClientError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ClientError */
/* -------------------------------------------------------------------------- */

impl IntoClientError for HttpError {
    fn into_client_error(self) -> ClientError {
        if self.is_timeout() {
            return ClientError::Connection("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ClientError::Connection("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ClientError::Config(format!("failed to build HTTP request: {self}"));
        }

        ClientError::Connection(self.to_string())
    }
}

impl From<HttpError> for TransportError {
    fn from(value: HttpError) -> Self {
        TransportError(value.into_client_error())
    }
}
