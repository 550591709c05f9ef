use inference_proxy::{endpoint, http::handle_request, EndpointConfig, InferenceProxy};
use lambda_http::{run, service_fn, tracing, Error, Request};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = EndpointConfig::from_env()?;
    tracing::info!(endpoint_name = config.endpoint_name(), "Loaded configuration");

    let endpoint = endpoint::from_config(&config).await;
    let proxy = InferenceProxy::new(config, endpoint);

    run(service_fn(move |request: Request| {
        let proxy = proxy.clone();
        async move { handle_request(&proxy, request).await }
    }))
    .await
}
