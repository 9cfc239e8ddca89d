//! Keyword tables and tokenization.
//!
//! Every keyword lookup in the crate goes through the ordered tables declared
//! here. Tables are association lists, not maps: evaluation order decides
//! which domains, topics and themes are reported first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// NOTE: expect() is acceptable here: the pattern is a literal and compiled once.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("Invalid regex: word pattern"));

/// Filler words ignored when building embeddings
pub const COMMON_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Subject domain an idea can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Technology,
    Health,
    Education,
    Business,
    Social,
    Environment,
    Entertainment,
    Finance,
}

impl Domain {
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Technology => "technology",
            Domain::Health => "health",
            Domain::Education => "education",
            Domain::Business => "business",
            Domain::Social => "social",
            Domain::Environment => "environment",
            Domain::Entertainment => "entertainment",
            Domain::Finance => "finance",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Domain keywords used for idea analysis (substring match).
pub const DOMAIN_KEYWORDS: &[(Domain, &[&str])] = &[
    (
        Domain::Technology,
        &[
            "app", "mobile", "software", "digital", "ai", "data", "platform", "tech", "online",
            "web", "cloud", "algorithm",
        ],
    ),
    (
        Domain::Health,
        &[
            "health", "fitness", "medical", "wellness", "therapy", "exercise", "nutrition",
            "disease", "treatment",
        ],
    ),
    (
        Domain::Education,
        &[
            "education", "learning", "teaching", "student", "course", "training", "knowledge",
            "skill",
        ],
    ),
    (
        Domain::Business,
        &[
            "business", "market", "customer", "revenue", "sales", "profit", "service", "company",
            "enterprise",
        ],
    ),
    (
        Domain::Social,
        &[
            "social", "community", "people", "network", "collaboration", "sharing", "connect",
            "friend",
        ],
    ),
    (
        Domain::Environment,
        &[
            "environment", "sustainable", "green", "eco", "energy", "climate", "recycling",
            "conservation",
        ],
    ),
    (
        Domain::Entertainment,
        &["game", "entertainment", "music", "video", "media", "content", "creative", "art"],
    ),
    (
        Domain::Finance,
        &[
            "finance", "money", "payment", "banking", "investment", "cryptocurrency", "wallet",
            "transaction",
        ],
    ),
];

/// Conversation topic keywords (whole-word match).
pub const TOPIC_KEYWORDS: &[(Domain, &[&str])] = &[
    (
        Domain::Technology,
        &["app", "ai", "digital", "tech", "software", "platform", "algorithm"],
    ),
    (
        Domain::Business,
        &["market", "business", "startup", "revenue", "customer", "profit"],
    ),
    (
        Domain::Education,
        &["learn", "teach", "education", "student", "school", "training"],
    ),
    (
        Domain::Health,
        &["health", "medical", "fitness", "wellness", "mental", "care"],
    ),
    (
        Domain::Environment,
        &["green", "sustainable", "eco", "environment", "waste", "climate"],
    ),
    (
        Domain::Social,
        &["community", "social", "people", "culture", "collaboration", "network"],
    ),
];

/// Recurring theme of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    InnovationFocus,
    ProblemSolving,
    UserCentered,
    TechnologyDriven,
    BusinessOriented,
    ImpactFocused,
}

const THEME_KEYWORDS: &[(Theme, &[&str])] = &[
    (
        Theme::InnovationFocus,
        &["innovative", "creative", "new", "novel", "breakthrough", "unique"],
    ),
    (
        Theme::ProblemSolving,
        &["problem", "solve", "solution", "fix", "address", "challenge"],
    ),
    (
        Theme::UserCentered,
        &["user", "people", "customer", "audience", "community", "human"],
    ),
    (
        Theme::TechnologyDriven,
        &["ai", "tech", "digital", "algorithm", "data", "smart", "automated"],
    ),
    (
        Theme::BusinessOriented,
        &["market", "business", "profit", "revenue", "startup", "entrepreneur"],
    ),
    (
        Theme::ImpactFocused,
        &["impact", "change", "improve", "help", "benefit", "difference"],
    ),
];

const CONCEPT_STOPWORDS: &[&str] = &["that", "this", "with", "have", "been"];

const MAX_TOPICS: usize = 3;
const MAX_THEMES: usize = 3;

/// Lower-case `\w+` tokens of `text`
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True if any keyword is a substring of the already lower-cased `text`
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Number of keywords that are substrings of the already lower-cased `text`
pub fn count_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Topics mentioned in `text`, in table order, at most three.
pub fn extract_topics(text: &str) -> Vec<Domain> {
    let words = tokenize(text);
    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| words.iter().any(|w| w == k)))
        .map(|(topic, _)| *topic)
        .take(MAX_TOPICS)
        .collect()
}

/// Themes with at least two keyword hits, at most three.
pub fn identify_themes(text: &str) -> Vec<Theme> {
    let lower = text.to_lowercase();
    THEME_KEYWORDS
        .iter()
        .filter(|(_, keywords)| count_hits(&lower, keywords) >= 2)
        .map(|(theme, _)| *theme)
        .take(MAX_THEMES)
        .collect()
}

/// Compressed form of an older message: up to eight longer words.
pub fn key_concepts(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .filter(|w| w.chars().count() > 4 && !CONCEPT_STOPWORDS.contains(&w.as_str()))
        .take(8)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `text` cut to `max` characters with an ellipsis when it was longer.
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", truncate_chars(text, max))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let words = tokenize("A Mobile-App for community_recycling!");
        assert_eq!(words, vec!["a", "mobile", "app", "for", "community_recycling"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ?! ").is_empty());
    }

    #[test]
    fn test_topics_are_whole_word_and_ordered() {
        let topics = extract_topics("A community app for school students");
        assert_eq!(
            topics,
            vec![Domain::Technology, Domain::Education, Domain::Social]
        );

        // "apple" must not count as "app"
        assert!(extract_topics("an apple a day").is_empty());
    }

    #[test]
    fn test_topics_capped_at_three() {
        let topics = extract_topics("app market learn health green community");
        assert_eq!(topics.len(), 3);
    }

    #[test]
    fn test_themes_need_two_hits() {
        assert!(identify_themes("a new thing").is_empty());
        assert_eq!(
            identify_themes("a new and unique thing"),
            vec![Theme::InnovationFocus]
        );
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
    }

    #[test]
    fn test_key_concepts_keeps_long_words() {
        assert_eq!(key_concepts("This platform helps with local recycling"), "platform helps local recycling");
    }
}
