use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;

const ENDPOINTS: &[&str] = &[
    "GET /health",
    "POST /chat",
    "POST /submit_idea",
    "GET /ideas",
    "GET /analyze_diversity/{id}",
    "POST /analyze_swot",
    "GET /get_combinations/{id1}/{id2}",
    "POST /generate_idea_variations",
    "GET /prompts",
    "GET /conversation_history/{user_id}",
    "DELETE /reset_conversation/{user_id}",
    "GET /system_stats",
    "GET /ws?username=",
];

const MODULES: &[&str] = &[
    "Diversity Meter",
    "Combination Engine",
    "Socratic Questioning",
    "SWOT Analysis",
    "Conversational Flow",
    "Memory System",
];

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Kaleidoscope ideation backend",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ENDPOINTS,
    }))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "status": "healthy",
        "database": state.database,
        "total_ideas": state.ideas.count().await?,
        "active_users": state.ideas.active_users().await.len(),
        "active_conversations": state.engine.count().await?,
    })))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let stats = state.ideas.stats().await?;
    Ok(Json(json!({
        "system_status": "operational",
        "database": state.database,
        "total_ideas": stats.total_ideas,
        "total_conversations": state.engine.count().await?,
        "average_diversity": stats.average_diversity,
        "collection_metrics": stats.collection,
        "modules_active": MODULES,
    })))
}

pub async fn prompts(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let prompts = state.prompts.prompts().await?;
    Ok(Json(json!({ "prompts": prompts })))
}
