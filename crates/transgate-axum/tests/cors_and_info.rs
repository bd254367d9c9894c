//! CORS preflight handling and the auxiliary routes.

mod common;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use common::{StubBehavior, StubClient, json, post_json, send, test_router};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn assert_permissive_cors(headers: &HeaderMap) {
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET,POST,OPTIONS,PUT,DELETE"
    );
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "content-type,authorization,accept,x-requested-with"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
}

#[tokio::test]
async fn preflight_on_translate_short_circuits() {
    let client = StubClient::new(StubBehavior::Reply("never".into()));
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/translate")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let (response, body) = send(test_router(client.clone()), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body.is_empty());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for method in ["GET", "POST", "OPTIONS", "PUT", "DELETE"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    for name in ["content-type", "authorization", "accept", "x-requested-with"] {
        assert!(allowed.contains(name), "missing {name} in {allowed}");
    }
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn bare_options_request_is_also_answered() {
    let client = StubClient::new(StubBehavior::Reply("never".into()));
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/translate")
        .body(Body::empty())
        .unwrap();

    let (response, body) = send(test_router(client.clone()), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn simple_responses_carry_cors_headers() {
    let client = StubClient::new(StubBehavior::Reply("ok".into()));
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header(header::ORIGIN, "https://example.com")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text":"hi"}"#))
        .unwrap();

    let (response, _) = send(test_router(client), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_permissive_cors(response.headers());
    let exposed = response.headers()[header::ACCESS_CONTROL_EXPOSE_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("content-length"));
    assert!(exposed.contains("content-type"));
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let client = StubClient::new(StubBehavior::Echo);

    let (response, _) = send(test_router(client.clone()), get("/api/info")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_permissive_cors(response.headers());

    let (response, _) = send(test_router(client.clone()), post_json("/translate", "{}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_permissive_cors(response.headers());

    let (response, _) = send(test_router(client), get("/translate")).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_permissive_cors(response.headers());
}

#[tokio::test]
async fn info_lists_models_and_default() {
    let client = StubClient::new(StubBehavior::Echo);
    let (response, body) = send(test_router(client), get("/api/info")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json(&body),
        serde_json::json!({
            "defaultModel": "deepseek",
            "availableModels": ["deepseek", "openai"]
        })
    );
}

#[tokio::test]
async fn status_reports_running() {
    let client = StubClient::new(StubBehavior::Echo);
    let (response, body) = send(test_router(client), get("/api/status")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "running");
    assert!(body["uptime"].as_str().unwrap().ends_with('s'));
    assert!(chrono::DateTime::parse_from_rfc3339(body["startTime"].as_str().unwrap()).is_ok());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_and_home() {
    let client = StubClient::new(StubBehavior::Echo);

    let (response, body) = send(test_router(client.clone()), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body, b"OK");

    let (response, body) = send(test_router(client), get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(String::from_utf8(body).unwrap().contains("is running"));
}
