use serde::Serialize;
use serde_json::Value;

use crate::error::ProxyError;

pub const IMAGE_NAME_FIELD: &str = "image_name";

/// Inbound invocation event. Only `image_name` is consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationEvent {
    pub image_name: String,
}

impl InvocationEvent {
    /// Explicit presence check over an untyped event. Extra keys are ignored
    /// and the payload is taken verbatim.
    pub fn from_value(event: &Value) -> Result<Self, ProxyError> {
        let field = event
            .as_object()
            .and_then(|map| map.get(IMAGE_NAME_FIELD))
            .ok_or(ProxyError::MissingField(IMAGE_NAME_FIELD))?;

        match field {
            Value::String(payload) => Ok(Self {
                image_name: payload.clone(),
            }),
            _ => Err(ProxyError::InvalidField {
                field: IMAGE_NAME_FIELD,
                expected: "a string",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    pub predict: String,
}

impl InvocationResult {
    pub fn from_body(body: &[u8]) -> Result<Self, ProxyError> {
        let text = std::str::from_utf8(body)
            .map_err(|e| ProxyError::Decode(format!("response body is not UTF-8: {e}")))?;

        Ok(Self {
            predict: text.trim().to_string(),
        })
    }
}
