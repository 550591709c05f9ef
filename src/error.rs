use std::{error::Error, fmt};

use lambda_http::http::StatusCode;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Unified error type for the inference proxy.
///
/// Nothing in the crate catches or retries these. The raw event handler hands
/// them straight to the Lambda runtime; the HTTP front door turns them into a
/// JSON body of the form `{"error": "<kind>", "message": "<details>"}`.
#[derive(Debug)]
pub enum ProxyError {
    Config(String),
    MissingField(&'static str),
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    Invocation {
        endpoint: String,
        message: String,
        source: BoxError,
    },
    Decode(String),
}

impl ProxyError {
    pub fn invocation(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        ProxyError::Invocation {
            endpoint: endpoint.into(),
            message: source.to_string(),
            source,
        }
    }

    /// Like [`ProxyError::invocation`], for sources whose `Display` omits the
    /// detail (SDK errors print only their category).
    pub fn invocation_with_message(
        endpoint: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        ProxyError::Invocation {
            endpoint: endpoint.into(),
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Config(_) => "config_error",
            ProxyError::MissingField(_) => "missing_field",
            ProxyError::InvalidField { .. } => "invalid_field",
            ProxyError::Invocation { .. } => "invocation_error",
            ProxyError::Decode(_) => "decode_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingField(_) | ProxyError::InvalidField { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::Invocation { .. } | ProxyError::Decode(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ProxyError::MissingField(field) => {
                write!(f, "Missing field: event has no `{field}` key")
            }
            ProxyError::InvalidField { field, expected } => {
                write!(f, "Invalid field: `{field}` must be {expected}")
            }
            ProxyError::Invocation {
                endpoint, message, ..
            } => {
                write!(f, "Endpoint invocation failed for {endpoint}: {message}")
            }
            ProxyError::Decode(msg) => write!(f, "Response decode failed: {msg}"),
        }
    }
}

impl Error for ProxyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProxyError::Invocation { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
