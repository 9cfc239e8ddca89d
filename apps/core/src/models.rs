use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Request bodies carry a static message reported when they fail to parse or validate.
pub trait Payload {
    const INVALID: &'static str;
}

/// Rejects strings that are empty or whitespace only.
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn default_api_user() -> String {
    "api_user".to_string()
}

fn default_chat_user() -> String {
    "anonymous_user".to_string()
}

/// A submitted idea. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Idea {
    /// Sequence-assigned identifier, starting at 0.
    pub id: i64,
    /// The idea as submitted.
    pub idea_text: String,
    /// The submitting user.
    pub user_id: String,
    /// Submission time.
    pub timestamp: DateTime<Utc>,
    /// Relative combined diversity at submission time.
    pub diversity_score: f32,
}

/// An idea before the store assigns its identifier.
#[derive(Debug, Clone)]
pub struct NewIdea {
    pub idea_text: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub diversity_score: f32,
}

impl NewIdea {
    pub fn new(idea_text: impl Into<String>, user_id: impl Into<String>, diversity_score: f32) -> Self {
        Self {
            idea_text: idea_text.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            diversity_score,
        }
    }

    pub fn into_idea(self, id: i64) -> Idea {
        Idea {
            id,
            idea_text: self.idea_text,
            user_id: self.user_id,
            timestamp: self.timestamp,
            diversity_score: self.diversity_score,
        }
    }
}

/// Body of `POST /submit_idea`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitIdeaRequest {
    #[validate(custom(function = "non_blank"))]
    pub idea_text: String,
    /// Accepted as `user_id` or `username`.
    #[serde(default = "default_api_user", alias = "username")]
    pub user_id: String,
}

impl Payload for SubmitIdeaRequest {
    const INVALID: &'static str = "idea_text is required";
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(custom(function = "non_blank"))]
    pub message: String,
    #[serde(default = "default_chat_user")]
    pub user_id: String,
}

impl Payload for ChatRequest {
    const INVALID: &'static str = "Message is required";
}

/// Body of `POST /analyze_swot`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SwotRequest {
    #[validate(custom(function = "non_blank"))]
    pub idea_text: String,
}

impl Payload for SwotRequest {
    const INVALID: &'static str = "Idea text is required";
}

/// Body of `POST /generate_idea_variations`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VariationRequest {
    #[validate(custom(function = "non_blank"))]
    pub idea_text: String,
}

impl Payload for VariationRequest {
    const INVALID: &'static str = "idea_text is required";
}

/// Query of `GET /ws`.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketQuery {
    #[serde(default = "default_socket_user")]
    pub username: String,
}

fn default_socket_user() -> String {
    "Anonymous".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_accepts_username_alias() {
        let req: SubmitIdeaRequest =
            serde_json::from_str(r#"{"idea_text":"Solar bikes","username":"alice"}"#).unwrap();
        assert_eq!(req.user_id, "alice");
        assert!(req.validate().is_ok());

        let req: SubmitIdeaRequest = serde_json::from_str(r#"{"idea_text":"Solar bikes"}"#).unwrap();
        assert_eq!(req.user_id, "api_user");
    }

    #[test]
    fn test_blank_text_fails_validation() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"   "}"#).unwrap();
        assert_eq!(req.user_id, "anonymous_user");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_new_idea_keeps_fields() {
        let idea = NewIdea::new("Solar bikes", "bob", 0.5).into_idea(3);
        assert_eq!(idea.id, 3);
        assert_eq!(idea.user_id, "bob");
        assert_eq!(idea.diversity_score, 0.5);
    }
}
