//! # Cart Routes
//!
//! Thin adapters from HTTP to [`CartService`](storefront_cart::CartService):
//! authenticate, parse the body, call the service, serialize the view.
//!
//! The body extractor runs after [`AuthUser`], so a request without a token
//! is a 401 even when its body is malformed.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use storefront_cart::{
    AddItemRequest, CartView, CheckoutView, RemoveItemRequest, UpdateQuantityRequest,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// `GET /cart`
pub async fn get_cart(State(state): State<AppState>, AuthUser(user): AuthUser) -> ApiResult<CartView> {
    Ok(Json(state.service.get_cart(&user).await?))
}

/// `POST /cart/add`
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<AddItemRequest>, JsonRejection>,
) -> ApiResult<CartView> {
    let Json(request) = body?;
    Ok(Json(state.service.add_item(&user, request).await?))
}

/// `PUT /cart/update`
pub async fn update_quantity(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> ApiResult<CartView> {
    let Json(request) = body?;
    Ok(Json(state.service.update_quantity(&user, request).await?))
}

/// `DELETE /cart/remove`
pub async fn remove_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<RemoveItemRequest>, JsonRejection>,
) -> ApiResult<CartView> {
    let Json(request) = body?;
    Ok(Json(state.service.remove_item(&user, request).await?))
}

/// `DELETE /cart/clear`
pub async fn clear_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<CartView> {
    Ok(Json(state.service.clear_cart(&user).await?))
}

/// `POST /cart/reconcile`
pub async fn reconcile_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<CartView> {
    Ok(Json(state.service.reconcile_cart(&user).await?))
}

/// `GET /cart/checkout`
pub async fn checkout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<CheckoutView> {
    Ok(Json(state.service.checkout(&user).await?))
}
