//! Configuration Tests
//!
//! Environment-driven configuration, isolated with `temp_env`.

use std::net::SocketAddr;

use crate::config::{AppConfig, LogFormat, DEFAULT_HISTORY_CAP, DEFAULT_OPENAI_BASE_URL};
use crate::error::AppError;

const KEYS: &[&str] = &[
    "KALEIDOSCOPE_BIND",
    "DATABASE_URL",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_MODEL",
    "KALEIDOSCOPE_HISTORY_CAP",
    "KALEIDOSCOPE_MAX_CONVERSATIONS",
    "KALEIDOSCOPE_SEED",
    "KALEIDOSCOPE_LOG_FORMAT",
];

/// Run `f` with every config variable unset except `set`.
fn with_env<R>(set: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let vars: Vec<(&str, Option<&str>)> = KEYS
        .iter()
        .map(|key| {
            let value = set.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(vars, f)
}

#[cfg(test)]
mod from_env_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = with_env(&[], AppConfig::from_env).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.history_cap, DEFAULT_HISTORY_CAP);
        assert!(config.database_url.is_none());
        assert!(config.openai.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = with_env(
            &[
                ("KALEIDOSCOPE_BIND", "127.0.0.1:9000"),
                ("DATABASE_URL", "sqlite://ideas.db"),
                ("KALEIDOSCOPE_HISTORY_CAP", "12"),
                ("KALEIDOSCOPE_SEED", "42"),
                ("KALEIDOSCOPE_LOG_FORMAT", "JSON"),
            ],
            AppConfig::from_env,
        )
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url.as_deref(), Some("sqlite://ideas.db"));
        assert_eq!(config.history_cap, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = with_env(&[("DATABASE_URL", "  "), ("OPENAI_API_KEY", "")], AppConfig::from_env)
            .unwrap();
        assert!(config.database_url.is_none());
        assert!(config.openai.is_none());
    }

    #[test]
    fn test_openai_settings() {
        let config = with_env(
            &[("OPENAI_API_KEY", "sk-test"), ("OPENAI_BASE_URL", "http://localhost:9999/v1/")],
            AppConfig::from_env,
        )
        .unwrap();
        let openai = config.openai.unwrap();
        assert_eq!(openai.api_key, "sk-test");
        assert_eq!(openai.base_url, "http://localhost:9999/v1");
        assert_eq!(openai.model, "gpt-3.5-turbo");

        let config = with_env(&[("OPENAI_API_KEY", "sk-test")], AppConfig::from_env).unwrap();
        assert_eq!(config.openai.unwrap().base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let cases: &[(&str, &str)] = &[
            ("KALEIDOSCOPE_BIND", "not-an-address"),
            ("KALEIDOSCOPE_HISTORY_CAP", "many"),
            ("KALEIDOSCOPE_HISTORY_CAP", "1"),
            ("KALEIDOSCOPE_MAX_CONVERSATIONS", "0"),
            ("KALEIDOSCOPE_SEED", "-3"),
            ("KALEIDOSCOPE_LOG_FORMAT", "xml"),
        ];
        for (key, value) in cases {
            let result = with_env(&[(*key, *value)], AppConfig::from_env);
            assert!(
                matches!(result, Err(AppError::Config(_))),
                "expected config error for {}={}",
                key,
                value
            );
        }
    }
}
