//! Tracing subscriber setup.
//!
//! `RUST_LOG` drives filtering (default `info`). Output is either the
//! human-readable fmt layer or Bunyan-style JSON lines.

use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LogFormat;
use crate::error::AppError;

const SERVICE_NAME: &str = "kaleidoscope";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_subscriber(format: LogFormat) -> Result<(), AppError> {
    let result = match format {
        LogFormat::Pretty => {
            let subscriber = Registry::default()
                .with(env_filter())
                .with(fmt::layer().with_target(true));
            set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(env_filter())
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(SERVICE_NAME.into(), std::io::stdout));
            set_global_default(subscriber)
        }
    };
    result.map_err(|e| AppError::Config(format!("Failed to install tracing subscriber: {}", e)))
}
