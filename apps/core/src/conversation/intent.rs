//! Context-aware intent classification.
//!
//! Each intent's base score is twice the number of its trigger phrases found
//! in the lower-cased message. Phase and depth bonuses are added, a repeat
//! of the previous intent is penalised, and the first maximum in declaration
//! order wins. A zero maximum falls back to an exchange-count ladder.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::flow::FlowPhase;

/// What the user is trying to do with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    IdeaSubmission,
    SeekingChallenge,
    RequestingSwot,
    WantingReframe,
    CombinationRequest,
    SeekingValidation,
    AskingQuestions,
    FollowUpDetail,
}

impl Intent {
    /// Declaration order, which is also the tie-break order.
    pub const ALL: [Intent; 8] = [
        Intent::IdeaSubmission,
        Intent::SeekingChallenge,
        Intent::RequestingSwot,
        Intent::WantingReframe,
        Intent::CombinationRequest,
        Intent::SeekingValidation,
        Intent::AskingQuestions,
        Intent::FollowUpDetail,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Intent::IdeaSubmission => "idea_submission",
            Intent::SeekingChallenge => "seeking_challenge",
            Intent::RequestingSwot => "requesting_swot",
            Intent::WantingReframe => "wanting_reframe",
            Intent::CombinationRequest => "combination_request",
            Intent::SeekingValidation => "seeking_validation",
            Intent::AskingQuestions => "asking_questions",
            Intent::FollowUpDetail => "follow_up_detail",
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            Intent::IdeaSubmission => &[
                "i want to", "i have an idea", "what about", "concept", "solution", "app that",
                "system for", "platform", "service that", "tool to", "create",
            ],
            Intent::SeekingChallenge => &[
                "challenge", "why", "assume", "what if", "problem with", "weakness", "risk",
                "downside", "limitation", "wrong with",
            ],
            Intent::RequestingSwot => &[
                "swot", "analyze", "strengths", "weaknesses", "opportunities", "threats",
                "evaluation", "assessment", "pros and cons", "strategic",
            ],
            Intent::WantingReframe => &[
                "different angle", "new perspective", "reframe", "alternative", "other way",
                "fresh approach", "twist on", "variation", "pivot",
            ],
            Intent::CombinationRequest => &[
                "combine", "merge", "together", "hybrid", "mix", "blend", "integrate", "cross",
                "fusion", "connect",
            ],
            Intent::SeekingValidation => &[
                "good idea", "think about", "what do you", "feedback", "opinion", "sounds like",
                "make sense", "viable",
            ],
            Intent::AskingQuestions => &[
                "how", "what", "when", "where", "who", "which", "should i", "can i",
            ],
            Intent::FollowUpDetail => &[
                "tell me more", "continue", "elaborate", "explain", "details", "go deeper",
                "more about", "expand on",
            ],
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Conversation context the classifier reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentContext {
    pub phase: FlowPhase,
    pub last_intent: Option<Intent>,
    /// User messages before this one
    pub exchanges: u32,
}

impl Default for IntentContext {
    fn default() -> Self {
        Self {
            phase: FlowPhase::Initial,
            last_intent: None,
            exchanges: 0,
        }
    }
}

/// Classification outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    pub score: i32,
    /// Trigger phrases of the winning intent found in the message
    pub matched_patterns: Vec<String>,
    /// True when no keyword signal existed and the exchange ladder decided
    pub fallback: bool,
}

/// Keyword points per matched trigger phrase
const PATTERN_WEIGHT: i32 = 2;
/// Penalty for repeating the previous intent
const REPEAT_PENALTY: i32 = 2;
/// Exchanges after which deeper analysis is favoured
const DEPTH_THRESHOLD: u32 = 3;

fn phase_bonus(phase: FlowPhase, intent: Intent) -> i32 {
    match (phase, intent) {
        (FlowPhase::IdeaExploration, Intent::SeekingChallenge) => 3,
        (FlowPhase::IdeaExploration, Intent::AskingQuestions) => 2,
        (FlowPhase::Challenging, Intent::RequestingSwot) => 3,
        (FlowPhase::Challenging, Intent::WantingReframe) => 3,
        (FlowPhase::Analysis, Intent::CombinationRequest) => 4,
        (FlowPhase::Analysis, Intent::SeekingValidation) => 3,
        _ => 0,
    }
}

fn depth_bonus(exchanges: u32, intent: Intent) -> i32 {
    if exchanges >= DEPTH_THRESHOLD
        && matches!(intent, Intent::SeekingChallenge | Intent::RequestingSwot)
    {
        2
    } else {
        0
    }
}

/// Default intent when the message carries no keyword signal.
pub fn fallback_intent(exchanges: u32) -> Intent {
    match exchanges {
        0 => Intent::SeekingValidation,
        1..=2 => Intent::SeekingChallenge,
        3..=4 => Intent::RequestingSwot,
        _ => Intent::CombinationRequest,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score of `intent` for the already lower-cased `message`
    pub fn score(&self, message: &str, intent: Intent, ctx: &IntentContext) -> i32 {
        let hits = intent
            .patterns()
            .iter()
            .filter(|p| message.contains(*p))
            .count() as i32;
        let mut score = hits * PATTERN_WEIGHT
            + phase_bonus(ctx.phase, intent)
            + depth_bonus(ctx.exchanges, intent);
        if ctx.last_intent == Some(intent) && ctx.exchanges > 1 {
            score -= REPEAT_PENALTY;
        }
        score
    }

    pub fn classify(&self, message: &str, ctx: &IntentContext) -> IntentResult {
        let lower = message.to_lowercase();

        let mut best = Intent::ALL[0];
        let mut best_score = self.score(&lower, best, ctx);
        for intent in Intent::ALL.into_iter().skip(1) {
            let score = self.score(&lower, intent, ctx);
            // strict comparison keeps the first maximum
            if score > best_score {
                best = intent;
                best_score = score;
            }
        }

        if best_score == 0 {
            return IntentResult {
                intent: fallback_intent(ctx.exchanges),
                score: 0,
                matched_patterns: Vec::new(),
                fallback: true,
            };
        }

        IntentResult {
            intent: best,
            score: best_score,
            matched_patterns: best
                .patterns()
                .iter()
                .filter(|p| lower.contains(*p))
                .map(|p| p.to_string())
                .collect(),
            fallback: false,
        }
    }
}
