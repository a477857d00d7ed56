//! # Storefront API Server
//!
//! ```text
//! ApiConfig::load ─► Database::new (migrations) ─► CartService ─► axum::serve
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use storefront_api::{build_router, init_tracing, ApiConfig, AppState, JwtManager};
use storefront_cart::CartService;
use storefront_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Storefront API server...");

    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        db_path = %config.database_path.display(),
        read_policy = %config.read_policy,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    let service = CartService::new(
        Arc::new(db.catalog()),
        Arc::new(db.carts()),
        config.cart_config(),
    );
    let jwt = JwtManager::new(&config.jwt_secret, config.jwt_lifetime_secs);
    let state = AppState::new(service, jwt).with_database(db.clone());

    let app = build_router(state, config.cors_layer()?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
