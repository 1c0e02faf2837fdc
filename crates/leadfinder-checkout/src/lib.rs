pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::StripeClient;
pub use error::CheckoutError;
pub use session::{quantity_from_body, site_base_url, CheckoutRequest, DEFAULT_QUANTITY};
pub use types::CheckoutSession;
