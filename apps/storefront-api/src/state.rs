//! Shared application state.

use std::sync::Arc;

use axum::extract::FromRef;
use storefront_cart::CartService;
use storefront_db::Database;

use crate::auth::JwtManager;

/// Handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CartService>,
    pub jwt: Arc<JwtManager>,
    /// `None` when the service runs on non-SQL collaborators (tests).
    pub db: Option<Database>,
}

impl AppState {
    pub fn new(service: CartService, jwt: JwtManager) -> Self {
        AppState {
            service: Arc::new(service),
            jwt: Arc::new(jwt),
            db: None,
        }
    }

    pub fn with_database(mut self, db: Database) -> Self {
        self.db = Some(db);
        self
    }
}

impl FromRef<AppState> for Arc<JwtManager> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
