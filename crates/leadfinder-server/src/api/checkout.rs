use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use leadfinder_checkout::{quantity_from_body, site_base_url, CheckoutRequest};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionCreated {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub(super) struct CheckoutFailed {
    pub error: String,
}

/// Creates a payment session for `quantity` scan packs.
///
/// A missing or unusable body buys one pack. Provider failures become a 500
/// carrying the provider's message.
pub(super) async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let quantity = quantity_from_body(&body);

    let forwarded_proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok());
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost");
    let base_url = site_base_url(forwarded_proto, host);

    let request = CheckoutRequest::new(&state.price_id, quantity, &base_url);
    match state.stripe.create_checkout_session(&request).await {
        Ok(session) => (
            StatusCode::OK,
            Json(SessionCreated {
                session_id: session.id,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, quantity, "checkout session failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CheckoutFailed {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub(super) async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
