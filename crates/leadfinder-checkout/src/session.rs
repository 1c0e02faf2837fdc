//! Rules for turning an incoming checkout request into provider parameters.

/// Number of scan packs bought when the request does not say otherwise.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Read the requested quantity from a JSON request body.
///
/// Only a positive integer `quantity` is honoured. An empty body, malformed
/// JSON, or any other value falls back to [`DEFAULT_QUANTITY`].
#[must_use]
pub fn quantity_from_body(body: &[u8]) -> u32 {
    if body.iter().all(u8::is_ascii_whitespace) {
        return DEFAULT_QUANTITY;
    }

    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse request body, using default quantity");
            return DEFAULT_QUANTITY;
        }
    };

    value
        .get("quantity")
        .and_then(serde_json::Value::as_u64)
        .filter(|q| *q > 0)
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or(DEFAULT_QUANTITY)
}

/// Origin of the site that sent the request, e.g. `https://leads.example.com`.
///
/// The scheme comes from `x-forwarded-proto` when a proxy set it, otherwise `http`.
#[must_use]
pub fn site_base_url(forwarded_proto: Option<&str>, host: &str) -> String {
    let proto = forwarded_proto
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("http");
    format!("{proto}://{host}")
}

/// Parameters for a one-line-item payment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub quantity: u32,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Build a request whose redirect URLs point back at `base_url`.
    #[must_use]
    pub fn new(price_id: &str, quantity: u32, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            price_id: price_id.to_string(),
            quantity,
            success_url: format!("{base}/?checkout=success&quantity={quantity}"),
            cancel_url: format!("{base}/?checkout=cancel"),
        }
    }

    /// Form fields in the provider's bracketed notation.
    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            ("line_items[0][price]", self.price_id.clone()),
            ("line_items[0][quantity]", self.quantity.to_string()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
        ]
    }
}
