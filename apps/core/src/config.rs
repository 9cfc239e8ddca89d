//! Runtime configuration read from the environment (and `.env`).

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_BIND: &str = "0.0.0.0:8001";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_HISTORY_CAP: usize = 8;
pub const DEFAULT_MAX_CONVERSATIONS: usize = 1024;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "KALEIDOSCOPE_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// Settings for the external prompt provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind: SocketAddr,
    /// Absent means in-memory stores.
    pub database_url: Option<String>,
    /// Absent means canned prompts.
    pub openai: Option<OpenAiConfig>,
    /// Messages kept per conversation before pruning.
    pub history_cap: usize,
    /// Conversations kept by the in-memory store.
    pub max_conversations: usize,
    /// Fixed seed for template selection; random when absent.
    pub seed: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8001)),
            database_url: None,
            openai: None,
            history_cap: DEFAULT_HISTORY_CAP,
            max_conversations: DEFAULT_MAX_CONVERSATIONS,
            seed: None,
            log_format: LogFormat::default(),
        }
    }
}

/// Non-empty value of `key`, if set.
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::Config(format!("{} is invalid ('{}'): {}", key, raw, e)))
        })
        .transpose()
}

impl AppConfig {
    /// Read configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let bind = match var("KALEIDOSCOPE_BIND") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                AppError::Config(format!("KALEIDOSCOPE_BIND is invalid ('{}'): {}", raw, e))
            })?,
            None => DEFAULT_BIND
                .parse()
                .map_err(|e| AppError::Config(format!("default bind address: {}", e)))?,
        };

        let openai = var("OPENAI_API_KEY").map(|api_key| OpenAiConfig {
            api_key,
            base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        });

        let history_cap = parse_var::<usize>("KALEIDOSCOPE_HISTORY_CAP")?.unwrap_or(DEFAULT_HISTORY_CAP);
        if history_cap < 2 {
            return Err(AppError::Config(
                "KALEIDOSCOPE_HISTORY_CAP must be at least 2".to_string(),
            ));
        }

        let max_conversations =
            parse_var::<usize>("KALEIDOSCOPE_MAX_CONVERSATIONS")?.unwrap_or(DEFAULT_MAX_CONVERSATIONS);
        if max_conversations == 0 {
            return Err(AppError::Config(
                "KALEIDOSCOPE_MAX_CONVERSATIONS must be positive".to_string(),
            ));
        }

        Ok(Self {
            bind,
            database_url: var("DATABASE_URL"),
            openai,
            history_cap,
            max_conversations,
            seed: parse_var::<u64>("KALEIDOSCOPE_SEED")?,
            log_format: parse_var::<LogFormat>("KALEIDOSCOPE_LOG_FORMAT")?.unwrap_or_default(),
        })
    }
}
