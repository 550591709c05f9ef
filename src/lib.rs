pub mod config;
pub mod endpoint;
pub mod error;
pub mod event;
pub mod http;
pub mod proxy;

pub use config::{EndpointBackend, EndpointConfig};
pub use error::ProxyError;
pub use event::{InvocationEvent, InvocationResult};
pub use proxy::InferenceProxy;
