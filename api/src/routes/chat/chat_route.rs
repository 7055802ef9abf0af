//! POST /chat: answers a natural-language question about a fruit.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, instrument};

use crate::{
    common::app_state::AppState,
    error_handler::AppResult,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat
///
/// Domain failures come back as 422 (ambiguous or unsupported question) or
/// 404 (fruit not in the catalog) with a `detail` message.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"pergunta":"Quanto custa a banana?"}'
/// ```
#[instrument(name = "chat_route", skip_all)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    info!(question_len = body.pergunta.len(), "chat question received");

    let answer = state.assistant.answer(&body.pergunta).await?;
    Ok(Json(ChatResponse { answer }))
}
