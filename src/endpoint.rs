use std::{error::Error, sync::Arc};

use async_trait::async_trait;
use aws_sdk_sagemakerruntime::{error::DisplayErrorContext, primitives::Blob};

use crate::{
    config::{EndpointBackend, EndpointConfig},
    error::ProxyError,
};

pub const CONTENT_TYPE_CSV: &str = "text/csv";
pub const ACCEPT_JSON: &str = "application/json";

/// One synchronous call against a named inference endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndpointRequest<'a> {
    pub endpoint_name: &'a str,
    pub payload: &'a str,
    pub content_type: &'a str,
    pub accept: &'a str,
}

impl<'a> EndpointRequest<'a> {
    pub fn csv(endpoint_name: &'a str, payload: &'a str) -> Self {
        Self {
            endpoint_name,
            payload,
            content_type: CONTENT_TYPE_CSV,
            accept: ACCEPT_JSON,
        }
    }
}

/// Remote inference abstraction. Implementations return the raw response
/// body and must not retry on their own.
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    async fn invoke(&self, request: EndpointRequest<'_>) -> Result<Vec<u8>, ProxyError>;
}

/// SageMaker runtime backend. Needs `sagemaker:InvokeEndpoint` on the
/// configured endpoint and nothing else.
pub struct SageMakerEndpoint {
    client: aws_sdk_sagemakerruntime::Client,
}

impl SageMakerEndpoint {
    pub fn new(client: aws_sdk_sagemakerruntime::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    async fn invoke(&self, request: EndpointRequest<'_>) -> Result<Vec<u8>, ProxyError> {
        let response = self
            .client
            .invoke_endpoint()
            .endpoint_name(request.endpoint_name)
            .content_type(request.content_type)
            .accept(request.accept)
            .body(Blob::new(request.payload.as_bytes()))
            .send()
            .await
            .map_err(|e| invocation_error(request.endpoint_name, e))?;

        tracing::debug!(
            content_type = ?response.content_type(),
            variant = ?response.invoked_production_variant(),
            "SageMaker endpoint responded"
        );

        Ok(body_bytes(response.body))
    }
}

/// SDK errors display only their category ("service error"), so the message
/// is taken from the full error chain while the SDK error stays the source.
fn invocation_error<E>(endpoint_name: &str, err: E) -> ProxyError
where
    E: Error + Send + Sync + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    ProxyError::invocation_with_message(endpoint_name, message, err)
}

fn body_bytes(body: Option<Blob>) -> Vec<u8> {
    body.map(Blob::into_inner).unwrap_or_default()
}

/// Local backend that answers with the payload it was given.
#[derive(Clone, Default)]
pub struct EchoEndpoint;

#[async_trait]
impl InferenceEndpoint for EchoEndpoint {
    async fn invoke(&self, request: EndpointRequest<'_>) -> Result<Vec<u8>, ProxyError> {
        Ok(request.payload.as_bytes().to_vec())
    }
}

pub async fn sagemaker() -> Arc<dyn InferenceEndpoint> {
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_sagemakerruntime::Client::new(&config);
    Arc::new(SageMakerEndpoint::new(client))
}

pub fn echo() -> Arc<dyn InferenceEndpoint> {
    Arc::new(EchoEndpoint)
}

pub async fn from_config(config: &EndpointConfig) -> Arc<dyn InferenceEndpoint> {
    match config.backend() {
        EndpointBackend::Echo => {
            tracing::info!("Using echo endpoint backend");
            echo()
        }
        EndpointBackend::SageMaker => {
            tracing::info!("Using SageMaker endpoint backend");
            sagemaker().await
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_sagemakerruntime::{
        error::SdkError, operation::invoke_endpoint::InvokeEndpointError,
        types::error::ModelError,
    };
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;

    use super::*;

    fn model_error(message: &str) -> SdkError<InvokeEndpointError, Response> {
        let status = StatusCode::try_from(424).unwrap();
        SdkError::service_error(
            InvokeEndpointError::ModelError(ModelError::builder().message(message).build()),
            Response::new(status, SdkBody::empty()),
        )
    }

    #[test]
    fn test_invocation_error_keeps_model_message() {
        let err = invocation_error(
            "ethnicity-pred",
            model_error("Received client error (400) from model: boom"),
        );

        assert!(err.to_string().contains("boom"));
        match &err {
            ProxyError::Invocation { endpoint, .. } => assert_eq!(endpoint, "ethnicity-pred"),
            other => panic!("expected invocation error, got {other:?}"),
        }
        let source = err
            .source()
            .and_then(|s| s.downcast_ref::<SdkError<InvokeEndpointError, Response>>())
            .unwrap();
        assert!(matches!(
            source.as_service_error(),
            Some(InvokeEndpointError::ModelError(_))
        ));
    }

    #[test]
    fn test_missing_body_is_empty() {
        assert!(body_bytes(None).is_empty());
        assert_eq!(body_bytes(Some(Blob::new("0.87\n"))), b"0.87\n");
    }

    #[tokio::test]
    async fn test_from_config_echo_backend() {
        let config = EndpointConfig::new("local").with_backend(EndpointBackend::Echo);
        let endpoint = from_config(&config).await;
        let body = endpoint
            .invoke(EndpointRequest::csv("local", "1,2"))
            .await
            .unwrap();
        assert_eq!(body, b"1,2");
    }

    #[test]
    fn test_csv_request_headers() {
        let request = EndpointRequest::csv("ethnicity-pred", "1,2,3");
        assert_eq!(request.content_type, "text/csv");
        assert_eq!(request.accept, "application/json");
        assert_eq!(request.payload, "1,2,3");
    }

    #[tokio::test]
    async fn test_echo_returns_payload() {
        let endpoint = echo();
        let body = endpoint
            .invoke(EndpointRequest::csv("local", "a,b,c\n"))
            .await
            .unwrap();
        assert_eq!(body, b"a,b,c\n");
    }
}
