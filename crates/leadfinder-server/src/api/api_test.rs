use super::*;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_app(stripe_base: &str) -> Router {
    let stripe = StripeClient::with_base_url("sk_test_key", 5, stripe_base).expect("client");
    build_app(
        AppState {
            stripe,
            price_id: "price_5_scans".to_string(),
        },
        default_rate_limit_state(),
    )
}

fn checkout_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/create-checkout-session")
        .header("host", "leads.example.com")
        .header("x-forwarded-proto", "https")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

async fn mount_session_ok(server: &MockServer, expected_fragment: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains(expected_fragment))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "cs_test_abc" })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn health_returns_ok_with_request_id() {
    let app = test_app("http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["meta"]["request_id"], "req-42");
}

#[tokio::test]
async fn checkout_rejects_get_with_405() {
    let app = test_app("http://127.0.0.1:9");
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/create-checkout-session")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert_eq!(&body[..], b"Method Not Allowed");
}

#[tokio::test]
async fn checkout_returns_session_id() {
    let server = MockServer::start().await;
    mount_session_ok(&server, "line_items%5B0%5D%5Bquantity%5D=3").await;

    let response = test_app(&server.uri())
        .oneshot(checkout_request(r#"{"quantity": 3}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["sessionId"], "cs_test_abc");
}

#[tokio::test]
async fn checkout_redirects_back_to_requesting_host() {
    let server = MockServer::start().await;
    mount_session_ok(
        &server,
        "success_url=https%3A%2F%2Fleads.example.com%2F%3Fcheckout%3Dsuccess%26quantity%3D3",
    )
    .await;

    let response = test_app(&server.uri())
        .oneshot(checkout_request(r#"{"quantity": 3}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn checkout_malformed_body_uses_default_quantity() {
    let server = MockServer::start().await;
    mount_session_ok(&server, "line_items%5B0%5D%5Bquantity%5D=1").await;

    let response = test_app(&server.uri())
        .oneshot(checkout_request("{not json"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn checkout_empty_body_uses_default_quantity() {
    let server = MockServer::start().await;
    mount_session_ok(&server, "line_items%5B0%5D%5Bquantity%5D=1").await;

    let response = test_app(&server.uri())
        .oneshot(checkout_request(""))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn checkout_provider_failure_is_500_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Invalid API Key provided: sk_test_***key" }
        })))
        .mount(&server)
        .await;

    let response = test_app(&server.uri())
        .oneshot(checkout_request(r#"{"quantity": 1}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Invalid API Key provided: sk_test_***key");
}

#[tokio::test]
async fn checkout_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "cs_1" })))
        .mount(&server)
        .await;

    let stripe = StripeClient::with_base_url("sk_test_key", 5, &server.uri()).expect("client");
    let app = build_app(
        AppState {
            stripe,
            price_id: "price_5_scans".to_string(),
        },
        RateLimitState::new(1, Duration::from_secs(60)),
    );

    let first = app
        .clone()
        .oneshot(checkout_request("{}"))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(checkout_request("{}")).await.expect("response");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}
