//! # API Error Type
//!
//! Every failed request answers with the same JSON body:
//! ```json
//! { "code": "INSUFFICIENT_STOCK",
//!   "message": "insufficient stock for Oversized Tee: available 5, requested 7" }
//! ```
//!
//! ## Status Mapping
//! ```text
//! ┌───────────────────┬────────┬──────────────────────────────────────────┐
//! │ code              │ status │ raised by                                │
//! ├───────────────────┼────────┼──────────────────────────────────────────┤
//! │ VALIDATION_ERROR  │  400   │ bad/missing fields, malformed JSON,      │
//! │                   │        │ empty cart at checkout                   │
//! │ UNAUTHORIZED      │  401   │ missing/invalid bearer token             │
//! │ NOT_FOUND         │  404   │ product, variant, cart or item missing   │
//! │ INSUFFICIENT_STOCK│  409   │ quantity above live variant stock        │
//! │ INTERNAL          │  500   │ storage failures, persistent conflicts   │
//! └───────────────────┴────────┴──────────────────────────────────────────┘
//! ```
//! Internal errors are logged and answered with a generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use storefront_core::{CartError, ErrorKind};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    Unauthorized,
    NotFound,
    InsufficientStock,
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InsufficientStock => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => ErrorCode::ValidationError,
            ErrorKind::Auth => ErrorCode::Unauthorized,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::Stock => ErrorCode::InsufficientStock,
            ErrorKind::Internal => ErrorCode::Internal,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Logs `detail` and hides it from the client.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        ApiError::new(ErrorCode::Internal, "Internal server error")
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err.kind() {
            ErrorKind::Internal => ApiError::internal(err),
            kind => ApiError::new(kind.into(), err.to_string()),
        }
    }
}

/// Malformed JSON, wrong content type or wrongly typed fields.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}
