//! Lightweight sentiment analysis used to pick a reply tone.

use serde::{Deserialize, Serialize};

use super::keywords;

const POSITIVE_WORDS: &[&str] = &[
    "excited", "love", "amazing", "great", "awesome", "brilliant", "fantastic", "wonderful",
    "perfect", "excellent", "thrilled",
];

const NEGATIVE_WORDS: &[&str] = &[
    "worried", "concerned", "frustrated", "difficult", "hard", "problem", "issue", "trouble",
    "stuck", "confused", "overwhelming",
];

const UNCERTAINTY_WORDS: &[&str] = &[
    "maybe", "perhaps", "not sure", "wondering", "thinking", "considering", "might", "possibly",
    "unsure", "hesitant",
];

const CONFIDENCE_WORDS: &[&str] = &[
    "definitely", "sure", "certain", "confident", "absolutely", "clearly", "obviously",
    "without doubt", "positive",
];

const REASSURANCE: &str =
    "Remember, every great idea starts with uncertainty - that's completely normal. ";

/// Primary emotional read of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Enthusiastic,
    Concerned,
    Uncertain,
    Curious,
    Neutral,
}

/// Reply tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Supportive,
    Reassuring,
    Encouraging,
    Collaborative,
    Curious,
    Analytical,
    Creative,
}

impl Sentiment {
    pub fn recommended_tone(self) -> Tone {
        match self {
            Sentiment::Enthusiastic => Tone::Supportive,
            Sentiment::Concerned => Tone::Reassuring,
            Sentiment::Uncertain => Tone::Encouraging,
            Sentiment::Curious => Tone::Collaborative,
            Sentiment::Neutral => Tone::Curious,
        }
    }
}

impl Tone {
    /// Opening phrase matching the tone, empty for tones without one
    pub fn prefix(self) -> &'static str {
        match self {
            Tone::Supportive => "That's a fantastic direction! ",
            Tone::Reassuring => "I understand your concerns - let's work through this together. ",
            Tone::Encouraging => "You're on the right track! Let's explore this further. ",
            Tone::Collaborative => "Great question! Let's think through this together. ",
            Tone::Curious => "Interesting! ",
            Tone::Analytical | Tone::Creative => "",
        }
    }
}

/// Result of [`SentimentAnalyzer::analyze`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    pub recommended_tone: Tone,
    /// confidence hits minus uncertainty hits
    pub confidence_level: i32,
    /// positive hits plus excitement minus negative hits
    pub energy_level: i32,
    pub needs_reassurance: bool,
}

impl SentimentReport {
    /// Prepend the tone prefix (and reassurance when needed) to `response`.
    pub fn apply_tone(&self, response: &str) -> String {
        let mut out = String::from(self.recommended_tone.prefix());
        if self.needs_reassurance {
            out.push_str(REASSURANCE);
        }
        out.push_str(response);
        out
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> SentimentReport {
        let lower = text.to_lowercase();

        let positive = keywords::count_hits(&lower, POSITIVE_WORDS) as i32;
        let negative = keywords::count_hits(&lower, NEGATIVE_WORDS) as i32;
        let uncertainty = keywords::count_hits(&lower, UNCERTAINTY_WORDS) as i32;
        let confidence = keywords::count_hits(&lower, CONFIDENCE_WORDS) as i32;

        let excitement = (lower.matches('!').count() + lower.matches("!!").count() * 2) as i32;
        let questioning = lower.matches('?').count();

        let sentiment = if negative > positive {
            Sentiment::Concerned
        } else if positive > 0 || excitement > 0 {
            Sentiment::Enthusiastic
        } else if uncertainty > confidence {
            Sentiment::Uncertain
        } else if questioning > 2 {
            Sentiment::Curious
        } else {
            Sentiment::Neutral
        };

        SentimentReport {
            sentiment,
            recommended_tone: sentiment.recommended_tone(),
            confidence_level: confidence - uncertainty,
            energy_level: positive + excitement - negative,
            needs_reassurance: negative > 1 || uncertainty > 2,
        }
    }
}
