use inference_proxy::{endpoint, EndpointConfig, InferenceProxy, InvocationResult};
use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Fail the cold start before any event is accepted.
    let config = EndpointConfig::from_env()?;
    tracing::info!(endpoint_name = config.endpoint_name(), "Loaded configuration");

    let endpoint = endpoint::from_config(&config).await;
    let proxy = InferenceProxy::new(config, endpoint);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let proxy = proxy.clone();
        async move { function_handler(&proxy, event).await }
    }))
    .await
}

async fn function_handler(
    proxy: &InferenceProxy,
    event: LambdaEvent<Value>,
) -> Result<InvocationResult, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling invocation");

    Ok(proxy.handle(event.payload).await?)
}
