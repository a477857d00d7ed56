//! `GET /api/v1/healthcheck`

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `connected`, `unavailable`, or `none` when no database is attached.
    pub database: &'static str,
}

pub async fn healthcheck(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.db {
        Some(db) if db.health_check().await => "connected",
        Some(_) => "unavailable",
        None => "none",
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
