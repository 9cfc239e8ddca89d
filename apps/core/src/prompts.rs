//! Creative prompt providers.
//!
//! With an API key configured prompts come from an OpenAI-compatible chat
//! completion endpoint; any failure there falls back to the canned list.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use reqwest::Client;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::OpenAiConfig;
use crate::error::AppError;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(15);
const PROMPT_COUNT: usize = 5;
const MAX_TOKENS: u32 = 200;
const SYSTEM_INSTRUCTION: &str = "Generate 5 creative thinking prompts to inspire innovative ideas.";

const CANNED_PROMPTS: &[&str] = &[
    "What if we combined two existing features in an unexpected way?",
    "How would a child solve this problem?",
    "What's the opposite of our current approach?",
    "How can we make this 10x better, not just 10% better?",
    "What would this look like in a different industry?",
    "If you had unlimited resources, what would you build?",
    "What's the smallest change that could make the biggest impact?",
    "How would nature solve this problem?",
    "What if we removed the biggest constraint?",
    "What would a sci-fi version of this idea look like?",
];

/// Source of creative thinking prompts
#[async_trait]
pub trait PromptProvider: Send + Sync + 'static {
    async fn prompts(&self) -> Result<Vec<String>, AppError>;
}

/// Five distinct prompts sampled from the canned list
pub struct CannedPromptProvider {
    rng: Mutex<StdRng>,
}

impl CannedPromptProvider {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng: Mutex::new(rng) }
    }

    pub fn sample(&self) -> Vec<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        CANNED_PROMPTS
            .choose_multiple(&mut *rng, PROMPT_COUNT)
            .map(|p| p.to_string())
            .collect()
    }
}

#[async_trait]
impl PromptProvider for CannedPromptProvider {
    async fn prompts(&self) -> Result<Vec<String>, AppError> {
        Ok(self.sample())
    }
}

pub struct OpenAiPromptProvider {
    client: Client,
    config: OpenAiConfig,
    fallback: CannedPromptProvider,
}

impl OpenAiPromptProvider {
    pub fn new(config: OpenAiConfig, fallback: CannedPromptProvider) -> Result<Self, AppError> {
        let client = Client::builder().timeout(COMPLETION_TIMEOUT).build()?;
        Ok(Self {
            client,
            config,
            fallback,
        })
    }

    async fn fetch(&self) -> Result<Vec<String>, AppError> {
        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "system", "content": SYSTEM_INSTRUCTION }],
            "max_tokens": MAX_TOKENS,
        });

        let res = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Prompt request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::Internal("Prompt response has no content".to_string()))?;

        let prompts = parse_prompt_lines(content);
        if prompts.is_empty() {
            return Err(AppError::Internal("Prompt response was empty".to_string()));
        }
        Ok(prompts)
    }
}

#[async_trait]
impl PromptProvider for OpenAiPromptProvider {
    async fn prompts(&self) -> Result<Vec<String>, AppError> {
        match self.fetch().await {
            Ok(prompts) => Ok(prompts),
            Err(e) => {
                warn!(error = %e, "Prompt provider failed, using canned prompts");
                Ok(self.fallback.sample())
            }
        }
    }
}

/// One prompt per non-empty line, list markers stripped
fn parse_prompt_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim_matches(|c| c == '-' || c == ' ').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Provider for the configured credentials.
pub fn build_provider(
    openai: Option<&OpenAiConfig>,
    seed: Option<u64>,
) -> Result<Arc<dyn PromptProvider>, AppError> {
    let canned = CannedPromptProvider::new(seed);
    match openai {
        Some(config) => {
            info!(model = %config.model, "Using OpenAI prompt provider");
            Ok(Arc::new(OpenAiPromptProvider::new(config.clone(), canned)?))
        }
        None => {
            info!("No OPENAI_API_KEY configured, using canned prompts");
            Ok(Arc::new(canned))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_prompts_distinct() {
        let provider = CannedPromptProvider::new(Some(11));
        let prompts = provider.sample();
        assert_eq!(prompts.len(), 5);
        let mut unique = prompts.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
        assert!(prompts.iter().all(|p| CANNED_PROMPTS.contains(&p.as_str())));
    }

    #[test]
    fn test_parse_prompt_lines() {
        let parsed = parse_prompt_lines("- First idea\n\n  - Second idea -\n   \nThird");
        assert_eq!(parsed, vec!["First idea", "Second idea", "Third"]);
    }
}
