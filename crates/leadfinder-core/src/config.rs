use crate::app_config::{AppConfig, Environment, DEFAULT_MAX_SCANS, DEFAULT_STRIPE_API_BASE};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty secrets are treated the same as unset ones.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let bind_raw = or_default("LEADFINDER_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = bind_raw
        .parse::<SocketAddr>()
        .map_err(|e| invalid("LEADFINDER_BIND_ADDR", e.to_string()))?;

    let max_scans = or_default("LEADFINDER_MAX_SCANS", &DEFAULT_MAX_SCANS.to_string())
        .parse::<u32>()
        .map_err(|e| invalid("LEADFINDER_MAX_SCANS", e.to_string()))?;

    let request_timeout_secs = or_default("LEADFINDER_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("LEADFINDER_REQUEST_TIMEOUT_SECS", e.to_string()))?;

    let env = parse_environment(&or_default("LEADFINDER_ENV", "development"))?;
    let log_level = or_default("LEADFINDER_LOG_LEVEL", "info");
    let state_path = PathBuf::from(or_default(
        "LEADFINDER_STATE_PATH",
        "./.leadfinder/state.json",
    ));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        state_path,
        max_scans,
        request_timeout_secs,
        stripe_secret_key: optional("STRIPE_SECRET_KEY"),
        stripe_price_id: optional("STRIPE_PRICE_ID_5_SCANS"),
        stripe_api_base: or_default("STRIPE_API_BASE", DEFAULT_STRIPE_API_BASE),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADFINDER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
