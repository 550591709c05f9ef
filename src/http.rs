use lambda_http::{
    http::{header::CONTENT_TYPE, StatusCode},
    Body, Error, Request, Response,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{error::ProxyError, proxy::InferenceProxy};

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(body)?;
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;
    Ok(response)
}

pub fn error_response(
    status: StatusCode,
    kind: &str,
    message: &str,
) -> Result<Response<Body>, Error> {
    json_response(status, &json!({ "error": kind, "message": message }))
}

impl ProxyError {
    pub fn into_response(self) -> Result<Response<Body>, Error> {
        error_response(self.status(), self.kind(), &self.to_string())
    }
}

/// API Gateway front door: the request body is the invocation event.
pub async fn handle_request(
    proxy: &InferenceProxy,
    request: Request,
) -> Result<Response<Body>, Error> {
    let event = match serde_json::from_slice::<Value>(request.body().as_ref()) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Request body is not JSON");
            return error_response(
                StatusCode::BAD_REQUEST,
                "bad_request",
                "request body must be a JSON object",
            );
        }
    };

    match proxy.handle(event).await {
        Ok(result) => json_response(StatusCode::OK, &result),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EndpointConfig, endpoint::echo};

    fn proxy() -> InferenceProxy {
        InferenceProxy::new(EndpointConfig::new("ethnicity-pred"), echo())
    }

    fn body_json(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[tokio::test]
    async fn test_handle_request_ok() {
        let request = Request::new(Body::from(r#"{"image_name": "0.5\n"}"#));
        let response = handle_request(&proxy(), request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(&response), json!({ "predict": "0.5" }));
    }

    #[tokio::test]
    async fn test_handle_request_missing_field() {
        let request = Request::new(Body::from(r#"{"data": "1,2"}"#));
        let response = handle_request(&proxy(), request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(&response)["error"], "missing_field");
    }

    #[tokio::test]
    async fn test_handle_request_not_json() {
        let request = Request::new(Body::from("1,2,3"));
        let response = handle_request(&proxy(), request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(&response)["error"], "bad_request");
    }

    #[test]
    fn test_invocation_error_response() {
        let response = ProxyError::invocation("ethnicity-pred", "ThrottlingException")
            .into_response()
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
