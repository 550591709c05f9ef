use std::sync::Arc;

use serde_json::Value;

use crate::{
    config::EndpointConfig,
    endpoint::{EndpointRequest, InferenceEndpoint},
    error::ProxyError,
    event::{InvocationEvent, InvocationResult},
};

/// Forwards `image_name` to the configured endpoint and wraps the decoded
/// answer as `{"predict": ...}`. Holds no per-request state.
#[derive(Clone)]
pub struct InferenceProxy {
    config: EndpointConfig,
    endpoint: Arc<dyn InferenceEndpoint>,
}

impl InferenceProxy {
    pub fn new(config: EndpointConfig, endpoint: Arc<dyn InferenceEndpoint>) -> Self {
        Self { config, endpoint }
    }

    pub async fn handle(&self, event: Value) -> Result<InvocationResult, ProxyError> {
        tracing::info!(event = %event, "Received invocation event");

        let event = InvocationEvent::from_value(&event).inspect_err(|e| {
            tracing::error!(error = %e, "Rejected invocation event");
        })?;

        let endpoint_name = self.config.endpoint_name();
        tracing::info!(endpoint_name, "Resolved endpoint");
        tracing::info!(payload = %event.image_name, "Forwarding payload");

        let body = self
            .endpoint
            .invoke(EndpointRequest::csv(endpoint_name, &event.image_name))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Endpoint invocation failed"))?;

        tracing::info!(
            bytes = body.len(),
            body = %String::from_utf8_lossy(&body),
            "Received endpoint response"
        );

        let result = InvocationResult::from_body(&body)?;
        tracing::info!(predict = %result.predict, "Built result");

        Ok(result)
    }
}
