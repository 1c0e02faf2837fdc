mod api;
mod middleware;

use leadfinder_checkout::StripeClient;
use leadfinder_core::ConfigError;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = leadfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let secret_key = config
        .stripe_secret_key
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("STRIPE_SECRET_KEY".to_string()))?;
    let price_id = config
        .stripe_price_id
        .clone()
        .ok_or_else(|| ConfigError::MissingEnvVar("STRIPE_PRICE_ID_5_SCANS".to_string()))?;

    let stripe = StripeClient::with_base_url(
        secret_key,
        config.request_timeout_secs,
        &config.stripe_api_base,
    )?;
    let app = build_app(AppState { stripe, price_id }, default_rate_limit_state());

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "starting checkout server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
