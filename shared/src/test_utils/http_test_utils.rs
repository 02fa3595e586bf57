use axum::body::Body;
use http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;

/// Builds a request with an optional JSON body.
pub fn create_test_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Builds a request whose body is sent verbatim as JSON content.
pub fn create_raw_request(method: &str, uri: &str, raw: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap()
}

pub async fn response_to_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn response_to_json(response: Response<Body>) -> Value {
    let body = response_to_string(response).await;
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&body).unwrap()
}
