use std::net::SocketAddr;
use std::path::PathBuf;

/// Default number of scans a fresh install may run.
pub const DEFAULT_MAX_SCANS: u32 = 10;

/// Default Stripe API root; overridable for local mocks.
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// JSON file backing the persisted scan counter.
    pub state_path: PathBuf,
    pub max_scans: u32,
    pub request_timeout_secs: u64,
    pub stripe_secret_key: Option<String>,
    /// Price of the "5 scans" product in the Stripe dashboard.
    pub stripe_price_id: Option<String>,
    pub stripe_api_base: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("state_path", &self.state_path)
            .field("max_scans", &self.max_scans)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "stripe_secret_key",
                &self.stripe_secret_key.as_ref().map(|_| "[redacted]"),
            )
            .field("stripe_price_id", &self.stripe_price_id)
            .field("stripe_api_base", &self.stripe_api_base)
            .finish()
    }
}
