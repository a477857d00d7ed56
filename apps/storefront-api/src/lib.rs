//! # storefront-api
//!
//! HTTP JSON surface of the cart engine.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser                                                                │
//! │     │  PUT /api/v1/cart/update  Authorization: Bearer <jwt>             │
//! │     ▼                                                                   │
//! │  TraceLayer ─► CorsLayer ─► Router                                      │
//! │                               │                                         │
//! │                               ├── AuthUser extractor ── 401 on failure  │
//! │                               ├── Json<UpdateQuantityRequest> ── 400    │
//! │                               ▼                                         │
//! │                        CartService::update_quantity                     │
//! │                               │                                         │
//! │                 Ok(CartView) ─┴─ Err(CartError) ──► ApiError {code,msg} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use auth::{AuthUser, JwtManager};
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Mounts every route under `/api/v1`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn,tower_http=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
