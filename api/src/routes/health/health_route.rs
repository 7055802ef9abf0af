use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{common::app_state::AppState, error_handler::AppResult};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub fruits: usize,
}

/// Handler: GET /health. Liveness plus a catalog read.
pub async fn health(State(state): State<Arc<AppState>>) -> AppResult<Json<HealthResponse>> {
    let fruits = state.catalog.list_all().await?.len();
    Ok(Json(HealthResponse {
        status: "ok",
        fruits,
    }))
}
