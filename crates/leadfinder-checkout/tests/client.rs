//! Integration tests for `StripeClient` using wiremock HTTP mocks.

use leadfinder_checkout::{CheckoutError, CheckoutRequest, StripeClient};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> StripeClient {
    StripeClient::with_base_url("sk_test_key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn create_session_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(header("authorization", "Bearer sk_test_key"))
        .and(body_string_contains("mode=payment"))
        .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_5_scans"))
        .and(body_string_contains("line_items%5B0%5D%5Bquantity%5D=3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_test_123",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = CheckoutRequest::new("price_5_scans", 3, "https://leads.example.com");
    let session = client
        .create_checkout_session(&request)
        .await
        .expect("should create session");

    assert_eq!(session.id, "cs_test_123");
}

#[tokio::test]
async fn redirect_urls_are_form_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains(
            "success_url=https%3A%2F%2Fleads.example.com%2F%3Fcheckout%3Dsuccess%26quantity%3D1",
        ))
        .and(body_string_contains(
            "cancel_url=https%3A%2F%2Fleads.example.com%2F%3Fcheckout%3Dcancel",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "cs_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = CheckoutRequest::new("price_5_scans", 1, "https://leads.example.com");
    let session = client.create_checkout_session(&request).await.expect("session");
    assert_eq!(session.id, "cs_1");
}

#[tokio::test]
async fn provider_error_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "message": "No such price: 'price_missing'",
                "type": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = CheckoutRequest::new("price_missing", 1, "http://localhost");
    let err = client.create_checkout_session(&request).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "No such price: 'price_missing'");
}

#[tokio::test]
async fn non_json_error_body_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = CheckoutRequest::new("price_5_scans", 1, "http://localhost");
    let err = client.create_checkout_session(&request).await.unwrap_err();

    assert_eq!(err.to_string(), "unexpected HTTP status 502");
}

#[tokio::test]
async fn success_without_id_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "object": "checkout.session" })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let request = CheckoutRequest::new("price_5_scans", 1, "http://localhost");
    let err = client.create_checkout_session(&request).await.unwrap_err();

    assert!(matches!(err, CheckoutError::Deserialize { .. }));
}
