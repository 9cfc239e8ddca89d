//! Conversation turns.
//!
//! One turn loads the user's state, classifies the message, advances the
//! flow phase, runs any idea enrichment, composes the reply and saves the
//! state. An idea stored during the turn is the commit point: once it is in
//! the idea store the turn succeeds even if the conversation state cannot
//! be saved.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

use super::composer::{self, Enrichment, ResponseComposer, TurnInput};
use super::flow::{self, FlowPhase};
use super::intent::{Intent, IntentClassifier, IntentContext};
use super::memory::{
    ContextSnapshot, ConversationInsights, ConversationMessage, ConversationState, MessageMetadata,
    Sender,
};
use crate::brain::{SentimentAnalyzer, SentimentReport};
use crate::error::AppError;
use crate::ideation::IdeaService;
use crate::store::ConversationStore;

/// Assistant messages the personality filter looks back over
const PERSONALITY_LOOKBACK: usize = 3;

/// Result of one conversation turn
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub response: String,
    pub intent: Intent,
    pub intent_score: i32,
    pub conversation_flow: FlowPhase,
    pub sentiment_analysis: SentimentReport,
    /// Context as it stood before this turn
    pub context_insights: ContextSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationHistory {
    pub user_id: String,
    pub history: Vec<ConversationMessage>,
    pub message_count: usize,
    pub summaries: Vec<String>,
    pub conversation_flow: FlowPhase,
    pub insights: ConversationInsights,
}

/// Drives conversation turns: classify, transition, compose, persist.
pub struct ConversationEngine {
    conversations: Arc<dyn ConversationStore>,
    ideas: Arc<IdeaService>,
    history_cap: usize,
    rng: Mutex<StdRng>,
    /// Serializes turns so a state is never advanced by two at once
    turn_lock: tokio::sync::Mutex<()>,
    classifier: IntentClassifier,
    sentiment: SentimentAnalyzer,
    composer: ResponseComposer,
}

impl ConversationEngine {
    pub fn new(
        conversations: Arc<dyn ConversationStore>,
        ideas: Arc<IdeaService>,
        history_cap: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            conversations,
            ideas,
            history_cap,
            rng: Mutex::new(rng),
            turn_lock: tokio::sync::Mutex::new(()),
            classifier: IntentClassifier::new(),
            sentiment: SentimentAnalyzer::new(),
            composer: ResponseComposer::new(),
        }
    }

    #[instrument(skip(self, message))]
    pub async fn process_turn(&self, user_id: &str, message: &str) -> Result<ChatTurn, AppError> {
        let _turn = self.turn_lock.lock().await;

        let mut state = self
            .conversations
            .load(user_id)
            .await?
            .unwrap_or_else(|| ConversationState::new(user_id));

        let snapshot = state.snapshot();
        let sentiment = self.sentiment.analyze(message);
        let ctx = IntentContext {
            phase: state.phase,
            last_intent: state.last_intent,
            exchanges: state.exchange_count,
        };
        let classified = self.classifier.classify(message, &ctx);
        let intent = classified.intent;
        let next = flow::next_phase(state.phase, intent, classified.fallback, state.exchange_count);
        debug!(%intent, score = classified.score, from = %state.phase, to = %next, "Turn classified");

        let (enrichment, idea_id) = self.enrich(intent, message, user_id).await?;

        state.push(
            Sender::User,
            message,
            MessageMetadata {
                intent: Some(intent),
                sentiment: Some(sentiment.sentiment),
                phase: next,
                tone: None,
            },
            self.history_cap,
        );
        state.phase = next;
        state.last_intent = Some(intent);

        let response = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let flow_vars = composer::flow_variables(&snapshot, &mut *rng);
            let recent_assistant = state.recent_assistant_texts(PERSONALITY_LOOKBACK);
            let input = TurnInput {
                intent,
                phase: next,
                sentiment: &sentiment,
                snapshot: &snapshot,
                flow_vars: &flow_vars,
                recent_assistant: &recent_assistant,
                recent_responses: &state.recent_responses,
                enrichment: enrichment.as_ref(),
            };
            self.composer.compose(&input, &mut *rng)
        };

        state.push(
            Sender::Assistant,
            &response,
            MessageMetadata {
                intent: Some(intent),
                sentiment: None,
                phase: next,
                tone: Some(sentiment.recommended_tone),
            },
            self.history_cap,
        );
        state.remember_response(&response);
        if let Err(e) = self.conversations.save(&state).await {
            let Some(id) = idea_id else {
                return Err(e);
            };
            warn!(error = %e, user_id, idea_id = id, "Idea stored but conversation state was not saved");
        }

        info!(user_id, %intent, phase = %next, "Conversation turn complete");

        Ok(ChatTurn {
            response,
            intent,
            intent_score: classified.score,
            conversation_flow: next,
            sentiment_analysis: sentiment,
            context_insights: snapshot,
            idea_id,
            timestamp: Utc::now(),
        })
    }

    /// Analysis appended for intents that act on stored ideas.
    async fn enrich(
        &self,
        intent: Intent,
        message: &str,
        user_id: &str,
    ) -> Result<(Option<Enrichment>, Option<i64>), AppError> {
        match intent {
            Intent::IdeaSubmission => {
                let submission = self.ideas.submit(message, user_id).await?;
                let enrichment = Enrichment::QuickAnalysis {
                    level: submission.diversity.diversity_level,
                    question: submission.questions.first().cloned(),
                };
                Ok((Some(enrichment), Some(submission.idea.id)))
            }
            Intent::RequestingSwot => {
                let latest = self.ideas.latest(1).await?;
                let enrichment = latest.first().map(|idea| {
                    let swot = self.ideas.swot(&idea.idea_text);
                    Enrichment::KeyInsight {
                        strength: swot.strengths.first().cloned(),
                        threat: swot.threats.first().cloned(),
                    }
                });
                Ok((enrichment, None))
            }
            Intent::CombinationRequest => {
                let latest = self.ideas.latest(2).await?;
                let enrichment = match latest.as_slice() {
                    [first, second] => {
                        let report = self.ideas.combinations(first.id, second.id).await?;
                        Some(Enrichment::TopFusion(report.combinations.into_iter().next()))
                    }
                    _ => None,
                };
                Ok((enrichment, None))
            }
            _ => Ok((None, None)),
        }
    }

    pub async fn history(&self, user_id: &str) -> Result<ConversationHistory, AppError> {
        let state = self
            .conversations
            .load(user_id)
            .await?
            .unwrap_or_else(|| ConversationState::new(user_id));
        Ok(ConversationHistory {
            user_id: user_id.to_string(),
            message_count: state.messages.len(),
            insights: state.insights(),
            conversation_flow: state.phase,
            summaries: state.summaries,
            history: state.messages,
        })
    }

    /// Drop a user's conversation; returns whether one existed.
    pub async fn reset(&self, user_id: &str) -> Result<bool, AppError> {
        let _turn = self.turn_lock.lock().await;
        let removed = self.conversations.remove(user_id).await?;
        info!(user_id, removed, "Conversation reset");
        Ok(removed)
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.conversations.count().await
    }
}
