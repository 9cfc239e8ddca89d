// Kaleidoscope Backend Entry Point
// Idea diversity, SWOT analysis and a Socratic conversation flow over HTTP

mod api;
mod brain;
mod config;
mod conversation;
mod error;
mod events;
mod ideation;
mod models;
mod prompts;
mod store;
mod telemetry;

#[cfg(test)]
mod tests;

use anyhow::Context;
use tracing::{info, warn};

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    let dotenv_result = dotenv::dotenv();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_subscriber(config.log_format)?;

    if let Err(e) = dotenv_result {
        warn!("No .env file loaded: {}", e);
    }

    let stores = store::connect(config.database_url.as_deref(), config.max_conversations).await;
    info!(database = ?stores.status, "Stores ready");

    let prompts = prompts::build_provider(config.openai.as_ref(), config.seed)?;
    let state = api::AppState::new(stores, prompts, &config);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Kaleidoscope listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Kaleidoscope stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
