//! Per-user conversation memory.
//!
//! A [`ConversationState`] holds a bounded message history. Once the cap is
//! exceeded the two oldest messages are folded into a one-line summary and
//! the history is cut back to the cap. `exchange_count` counts every user
//! message ever appended and is not affected by pruning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::flow::FlowPhase;
use super::intent::Intent;
use crate::brain::keywords::{self, Domain, Theme};
use crate::brain::{Sentiment, Tone};

/// Messages considered when building the weighted context (four exchanges)
const CONTEXT_WINDOW: usize = 8;
/// Weighted context lines kept
const CONTEXT_LINES: usize = 6;
/// Messages folded into a summary on each prune
const SUMMARIZED_PER_PRUNE: usize = 2;
/// Final responses remembered for repetition checks
const RECENT_RESPONSES: usize = 5;

const EMPTY_CONTEXT: &str = "New conversation - no prior context";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Write-once annotations attached when a message is appended
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    pub phase: FlowPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: MessageMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    #[default]
    NewUser,
    Exploring,
    ModeratelyEngaged,
    HighlyEngaged,
}

impl EngagementLevel {
    /// Assess from the user's message texts.
    pub fn assess<'a>(user_messages: impl IntoIterator<Item = &'a str>) -> Self {
        let (count, total_len, asked) = user_messages.into_iter().fold(
            (0usize, 0usize, false),
            |(count, len, asked), m| (count + 1, len + m.chars().count(), asked || m.contains('?')),
        );
        if count == 0 {
            return EngagementLevel::NewUser;
        }
        let avg = total_len / count;
        if avg > 100 && asked {
            EngagementLevel::HighlyEngaged
        } else if avg > 50 {
            EngagementLevel::ModeratelyEngaged
        } else {
            EngagementLevel::Exploring
        }
    }
}

/// What the classifier and composer see of a conversation before a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub recent_context: String,
    pub user_topics: Vec<Domain>,
    pub conversation_themes: Vec<Theme>,
    pub conversation_flow: FlowPhase,
    pub last_intent: Option<Intent>,
    pub engagement_level: EngagementLevel,
    pub total_exchanges: u32,
    /// Messages the recent context was built from
    pub context_depth: usize,
}

/// Aggregate view returned by the history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationInsights {
    pub total_ideas_shared: usize,
    pub avg_message_length: usize,
    pub primary_interests: Vec<Domain>,
    pub conversation_depth: usize,
    pub engagement_indicators: EngagementLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub user_id: String,
    pub messages: Vec<ConversationMessage>,
    pub phase: FlowPhase,
    pub last_intent: Option<Intent>,
    pub engagement: EngagementLevel,
    /// Topics seen in user messages, first-seen order
    pub topics: Vec<Domain>,
    /// Lossy summaries of pruned messages
    pub summaries: Vec<String>,
    /// Last final responses, oldest first
    pub recent_responses: Vec<String>,
    pub exchange_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationState {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            messages: Vec::new(),
            phase: FlowPhase::Initial,
            last_intent: None,
            engagement: EngagementLevel::NewUser,
            topics: Vec::new(),
            summaries: Vec::new(),
            recent_responses: Vec::new(),
            exchange_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn user_texts(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(|m| m.sender == Sender::User)
            .map(|m| m.text.as_str())
    }

    /// Texts of the last `n` assistant messages, oldest first
    pub fn recent_assistant_texts(&self, n: usize) -> Vec<&str> {
        let mut texts: Vec<&str> = self
            .messages
            .iter()
            .rev()
            .filter(|m| m.sender == Sender::Assistant)
            .take(n)
            .map(|m| m.text.as_str())
            .collect();
        texts.reverse();
        texts
    }

    /// Append a message and prune past `cap`.
    pub fn push(&mut self, sender: Sender, text: &str, metadata: MessageMetadata, cap: usize) {
        self.messages.push(ConversationMessage {
            id: Uuid::new_v4(),
            sender,
            text: text.to_string(),
            timestamp: Utc::now(),
            metadata,
        });

        if sender == Sender::User {
            self.exchange_count += 1;
            for topic in keywords::extract_topics(text) {
                if !self.topics.contains(&topic) {
                    self.topics.push(topic);
                }
            }
            self.engagement = EngagementLevel::assess(self.user_texts());
        }

        if self.messages.len() > cap {
            let oldest = &self.messages[..SUMMARIZED_PER_PRUNE.min(self.messages.len())];
            let summary = summarize(oldest);
            self.summaries.push(summary);
            let excess = self.messages.len() - cap;
            self.messages.drain(..excess);
        }

        self.updated_at = Utc::now();
    }

    /// Record the final text of an assistant reply for repetition checks.
    pub fn remember_response(&mut self, response: &str) {
        self.recent_responses.push(response.to_string());
        if self.recent_responses.len() > RECENT_RESPONSES {
            let excess = self.recent_responses.len() - RECENT_RESPONSES;
            self.recent_responses.drain(..excess);
        }
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        if self.messages.is_empty() {
            return ContextSnapshot {
                recent_context: EMPTY_CONTEXT.to_string(),
                user_topics: Vec::new(),
                conversation_themes: Vec::new(),
                conversation_flow: self.phase,
                last_intent: self.last_intent,
                engagement_level: self.engagement,
                total_exchanges: self.exchange_count,
                context_depth: 0,
            };
        }

        let start = self.messages.len().saturating_sub(CONTEXT_WINDOW);
        let recent = &self.messages[start..];
        let user_text = self.user_texts().collect::<Vec<_>>().join(" ");

        ContextSnapshot {
            recent_context: weighted_context(recent),
            user_topics: keywords::extract_topics(&user_text),
            conversation_themes: keywords::identify_themes(&user_text),
            conversation_flow: self.phase,
            last_intent: self.last_intent,
            engagement_level: self.engagement,
            total_exchanges: self.exchange_count,
            context_depth: recent.len(),
        }
    }

    pub fn insights(&self) -> ConversationInsights {
        let user: Vec<&str> = self.user_texts().collect();
        let total_len: usize = user.iter().map(|m| m.chars().count()).sum();
        ConversationInsights {
            total_ideas_shared: user.len(),
            avg_message_length: total_len / user.len().max(1),
            primary_interests: keywords::extract_topics(&user.join(" ")),
            conversation_depth: self.messages.len() / 2,
            engagement_indicators: EngagementLevel::assess(user.iter().copied()),
        }
    }
}

/// Recent messages weighted by recency: the newest are kept whole, middle
/// ones truncated, the oldest reduced to key concepts.
fn weighted_context(messages: &[ConversationMessage]) -> String {
    let n = messages.len() as f32;
    let lines: Vec<String> = messages
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let weight = (i as f32 + 1.0) / n;
            let sender = match m.sender {
                Sender::User => "User",
                Sender::Assistant => "KAI",
            };
            let content = if weight > 0.7 {
                m.text.clone()
            } else if weight > 0.4 {
                keywords::preview(&m.text, 150)
            } else {
                keywords::key_concepts(&m.text)
            };
            format!("{}: {}", sender, content)
        })
        .collect();
    let start = lines.len().saturating_sub(CONTEXT_LINES);
    lines[start..].join("\n")
}

fn summarize(oldest: &[ConversationMessage]) -> String {
    match oldest.iter().find(|m| m.sender == Sender::User) {
        Some(m) => format!("Earlier discussion: {}...", keywords::truncate_chars(&m.text, 50)),
        None => "Previous conversation context".to_string(),
    }
}
