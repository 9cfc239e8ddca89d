//! Heuristic text analyzer.
//!
//! Turns raw idea text into the features every other scorer reads: word
//! lists, keyword hits per domain, vocabulary richness and a small
//! length-based complexity ratio. Empty input yields zero-valued features.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::keywords::{self, Domain, DOMAIN_KEYWORDS};

/// Average unique-word length that maps to full complexity
const REFERENCE_WORD_LENGTH: f32 = 8.0;

/// Features derived from one piece of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    /// Lower-cased tokens in order of appearance
    pub words: Vec<String>,
    /// Distinct tokens
    pub unique_words: BTreeSet<String>,
    /// Keyword hits per domain, only domains with at least one hit
    pub domain_hits: Vec<(Domain, usize)>,
    pub char_count: usize,
    /// Unique words / total words
    pub vocabulary_richness: f32,
    /// Mean character length of unique words
    pub avg_word_length: f32,
    /// min(1, avg_word_length / 8 * vocabulary_richness)
    pub complexity: f32,
}

impl TextFeatures {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Domains touched, in declaration order
    pub fn domains(&self) -> Vec<Domain> {
        self.domain_hits.iter().map(|(d, _)| *d).collect()
    }
}

/// Stateless analyzer over the shared keyword tables
#[derive(Debug, Clone, Copy, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze `text`. Never fails.
    pub fn analyze(&self, text: &str) -> TextFeatures {
        let lower = text.to_lowercase();
        let words = keywords::tokenize(&lower);

        if words.is_empty() {
            return TextFeatures {
                char_count: text.chars().count(),
                ..Default::default()
            };
        }

        let unique_words: BTreeSet<String> = words.iter().cloned().collect();

        let domain_hits = DOMAIN_KEYWORDS
            .iter()
            .filter_map(|(domain, kws)| {
                let hits = keywords::count_hits(&lower, kws);
                (hits > 0).then_some((*domain, hits))
            })
            .collect();

        let vocabulary_richness = unique_words.len() as f32 / words.len() as f32;
        let avg_word_length = unique_words
            .iter()
            .map(|w| w.chars().count())
            .sum::<usize>() as f32
            / unique_words.len() as f32;
        let complexity = (avg_word_length / REFERENCE_WORD_LENGTH * vocabulary_richness).min(1.0);

        TextFeatures {
            words,
            unique_words,
            domain_hits,
            char_count: text.chars().count(),
            vocabulary_richness,
            avg_word_length,
            complexity,
        }
    }
}
