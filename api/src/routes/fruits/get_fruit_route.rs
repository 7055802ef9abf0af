//! GET /fruits/{name}: direct catalog lookup.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::{
    common::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::fruits::fruit_response::FruitResponse,
};

/// Handler: GET /fruits/{name}
///
/// The name is matched case-insensitively against the stored name.
///
/// # Example
/// ```bash
/// curl http://127.0.0.1:8000/fruits/banana
/// ```
#[instrument(name = "get_fruit_route", skip_all, fields(fruit = %name))]
pub async fn get_fruit(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<FruitResponse>> {
    let record = state
        .catalog
        .find_by_name(&name)
        .await?
        .ok_or(AppError::FruitNotFound)?;

    Ok(Json(record.into()))
}
