use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::extract::ValidJson;
use super::AppState;
use crate::conversation::{ChatTurn, ConversationHistory};
use crate::error::AppError;
use crate::models::ChatRequest;

pub async fn chat(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ChatRequest>,
) -> Result<Json<ChatTurn>, AppError> {
    let turn = state.engine.process_turn(&req.user_id, &req.message).await?;
    Ok(Json(turn))
}

pub async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ConversationHistory>, AppError> {
    Ok(Json(state.engine.history(&user_id).await?))
}

pub async fn reset(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let existed = state.engine.reset(&user_id).await?;
    Ok(Json(json!({
        "message": format!("Conversation history cleared for {}", user_id),
        "status": "reset_complete",
        "existed": existed,
    })))
}
