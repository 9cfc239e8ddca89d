use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use super::extract::ValidJson;
use super::AppState;
use crate::error::AppError;
use crate::ideation::{CombinationReport, DiversityReport};
use crate::models::{SubmitIdeaRequest, SwotRequest, VariationRequest};

pub async fn submit_idea(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SubmitIdeaRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let submission = state.ideas.submit(&req.idea_text, &req.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Idea submitted and analyzed successfully!",
            "idea_id": submission.idea.id,
            "idea": submission.idea,
            "diversity_metrics": submission.diversity,
            "questions": submission.questions,
            "swot": submission.swot,
        })),
    ))
}

pub async fn list_ideas(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let ideas = state.ideas.list().await?;
    Ok(Json(json!({
        "total": ideas.len(),
        "ideas": ideas,
    })))
}

pub async fn analyze_diversity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DiversityReport>, AppError> {
    Ok(Json(state.ideas.analyze_diversity(id).await?))
}

pub async fn analyze_swot(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SwotRequest>,
) -> Json<Value> {
    let report = state.ideas.swot_report(&req.idea_text);
    Json(json!({
        "success": true,
        "idea_text": report.idea_text,
        "swot": report.swot,
        "strategic_questions": report.strategic_questions,
        "diversity_metrics": report.diversity_metrics,
        "timestamp": Utc::now(),
    }))
}

pub async fn get_combinations(
    State(state): State<AppState>,
    Path((id1, id2)): Path<(i64, i64)>,
) -> Result<Json<CombinationReport>, AppError> {
    Ok(Json(state.ideas.combinations(id1, id2).await?))
}

pub async fn generate_variations(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<VariationRequest>,
) -> Json<Value> {
    let variations = state.ideas.variations(&req.idea_text);
    Json(json!({
        "success": true,
        "original_idea": req.idea_text,
        "method_used": variations.method_used,
        "description": variations.description,
        "generated_ideas": variations.generated_ideas,
    }))
}
