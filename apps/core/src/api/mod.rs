//! HTTP surface.
//!
//! Handlers stay thin: parse with [`extract::ValidJson`], call the idea
//! service or the conversation engine, wrap the result in JSON. Errors are
//! rendered by `AppError`'s `IntoResponse`.

pub mod chat;
pub mod extract;
pub mod ideas;
pub mod system;
pub mod ws;

use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::conversation::ConversationEngine;
use crate::events::EventHub;
use crate::ideation::IdeaService;
use crate::prompts::PromptProvider;
use crate::store::{DatabaseStatus, Stores};

#[derive(Clone)]
pub struct AppState {
    pub ideas: Arc<IdeaService>,
    pub engine: Arc<ConversationEngine>,
    pub prompts: Arc<dyn PromptProvider>,
    pub database: DatabaseStatus,
}

impl AppState {
    pub fn new(stores: Stores, prompts: Arc<dyn PromptProvider>, config: &AppConfig) -> Self {
        let ideas = Arc::new(IdeaService::new(stores.ideas, EventHub::new(), config.seed));
        let engine = Arc::new(ConversationEngine::new(
            stores.conversations,
            ideas.clone(),
            config.history_cap,
            config.seed,
        ));
        Self {
            ideas,
            engine,
            prompts,
            database: stores.status,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/system_stats", get(system::stats))
        .route("/prompts", get(system::prompts))
        .route("/chat", post(chat::chat))
        .route("/conversation_history/:user_id", get(chat::history))
        .route("/reset_conversation/:user_id", delete(chat::reset))
        .route("/submit_idea", post(ideas::submit_idea))
        .route("/ideas", get(ideas::list_ideas))
        .route("/analyze_diversity/:id", get(ideas::analyze_diversity))
        .route("/analyze_swot", post(ideas::analyze_swot))
        .route("/get_combinations/:id1/:id2", get(ideas::get_combinations))
        .route("/generate_idea_variations", post(ideas::generate_variations))
        .route("/ws", get(ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
