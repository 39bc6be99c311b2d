use anyhow::Context;
use tracing_subscriber::EnvFilter;

use product_api::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    config.validate()?;
    tracing::info!(
        "Starting Product API in {:?} mode with {:?} store",
        config.environment,
        config.database.backend
    );
    if product_api::is_development!() {
        tracing::warn!("Development defaults active; set APP_ENV and JWT_SECRET for real deployments");
    }

    let state = server::build_state(config).await?;
    let app = server::app(state, config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Product API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
