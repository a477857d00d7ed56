//! # Routes
//!
//! ```text
//! /api/v1
//! ├── GET    /healthcheck
//! └── /cart                      (Authorization: Bearer <jwt>)
//!     ├── GET    /               current cart
//!     ├── POST   /add            {productId, color, size, quantity?}
//!     ├── PUT    /update         {productId, color, size, quantity}
//!     ├── DELETE /remove         {productId, color, size}
//!     ├── DELETE /clear
//!     ├── POST   /reconcile      drop unavailable lines
//!     └── GET    /checkout       validate + summary
//! ```

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod health;

pub fn api_routes() -> Router<AppState> {
    let cart = Router::new()
        .route("/add", post(cart::add_item))
        .route("/update", put(cart::update_quantity))
        .route("/remove", delete(cart::remove_item))
        .route("/clear", delete(cart::clear_cart))
        .route("/reconcile", post(cart::reconcile_cart))
        .route("/checkout", get(cart::checkout));

    Router::new()
        .route("/healthcheck", get(health::healthcheck))
        .route("/cart", get(cart::get_cart))
        .nest("/cart", cart)
}
