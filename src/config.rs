use std::env;

use crate::error::ProxyError;

pub const ENDPOINT_NAME_VAR: &str = "ENDPOINT_NAME";
pub const ENDPOINT_BACKEND_VAR: &str = "ENDPOINT_BACKEND";

/// Which client answers invocations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndpointBackend {
    #[default]
    SageMaker,
    Echo,
}

/// Remote inference endpoint settings, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    endpoint_name: String,
    backend: EndpointBackend,
}

impl EndpointConfig {
    pub fn new(endpoint_name: impl Into<String>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            backend: EndpointBackend::default(),
        }
    }

    pub fn with_backend(mut self, backend: EndpointBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn from_env() -> Result<Self, ProxyError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProxyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_name = lookup(ENDPOINT_NAME_VAR)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ProxyError::Config(format!("{ENDPOINT_NAME_VAR} environment variable must be set"))
            })?;

        let backend = match lookup(ENDPOINT_BACKEND_VAR).as_deref().map(str::trim) {
            Some("echo") => EndpointBackend::Echo,
            _ => EndpointBackend::SageMaker,
        };

        Ok(Self {
            endpoint_name,
            backend,
        })
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    pub fn backend(&self) -> EndpointBackend {
        self.backend
    }
}
