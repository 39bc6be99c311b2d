use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseManager, MemoryProductStore, PgProductStore, ProductStore};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the configured store and wrap it in handler state
pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn ProductStore> = match config.database.backend {
        StoreBackend::Memory => {
            info!("Using in-memory product store");
            Arc::new(MemoryProductStore::new())
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to Postgres")?;
            let store = PgProductStore::new(pool);
            store
                .ensure_table()
                .await
                .context("failed to prepare the products table")?;
            Arc::new(store)
        }
    };

    Ok(AppState::new(store, config.security.jwt_secret.clone()))
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(api_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    use protected::products;

    Router::new()
        .route("/api/user", get(protected::user_get))
        // Collection
        .route(
            "/api/products",
            get(products::products_get).post(products::products_post),
        )
        // Individual product
        .route(
            "/api/products/:id",
            get(products::product_get)
                .put(products::product_put)
                .delete(products::product_delete),
        )
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer.allow_origin(origins)
}

/// Resolves on Ctrl-C (and SIGTERM on unix)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl-C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
