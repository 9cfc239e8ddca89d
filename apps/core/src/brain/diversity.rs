//! Diversity scoring.
//!
//! Two independent modes with their own weights and grade thresholds:
//!
//! - **standalone**: intrinsic richness, complexity, domain breadth and
//!   embedding variance of a single idea. High > 0.6, Medium > 0.35.
//! - **relative**: distance from previously seen ideas (max cosine over
//!   feature embeddings) blended with keyword non-overlap. High > 0.7,
//!   Medium > 0.4.
//!
//! Grades are computed from the unrounded score; reported numbers are
//! rounded to three decimals.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::analyzer::{TextAnalyzer, TextFeatures};
use super::embedding::{cosine_similarity, feature_embedding, hashed_embedding, variance};
use super::keywords::{self, Domain};

const WEIGHT_RICHNESS: f32 = 0.25;
const WEIGHT_COMPLEXITY: f32 = 0.25;
const WEIGHT_DOMAINS: f32 = 0.30;
const WEIGHT_SEMANTIC: f32 = 0.20;

const WEIGHT_RELATIVE_SEMANTIC: f32 = 0.7;
const WEIGHT_RELATIVE_KEYWORD: f32 = 0.3;

/// Domain count that saturates the breadth component
const DOMAIN_SATURATION: f32 = 3.0;
/// Unique word count that saturates a first idea's keyword diversity
const FIRST_IDEA_WORD_SATURATION: f32 = 20.0;
/// Word count that saturates elaboration
const ELABORATION_WORDS: f32 = 20.0;

/// Qualitative grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiversityLevel {
    High,
    Medium,
    Low,
}

impl DiversityLevel {
    /// Grade in standalone mode
    pub fn standalone(score: f32) -> Self {
        if score > 0.6 {
            DiversityLevel::High
        } else if score > 0.35 {
            DiversityLevel::Medium
        } else {
            DiversityLevel::Low
        }
    }

    /// Grade in relative mode
    pub fn relative(score: f32) -> Self {
        if score > 0.7 {
            DiversityLevel::High
        } else if score > 0.4 {
            DiversityLevel::Medium
        } else {
            DiversityLevel::Low
        }
    }
}

/// Intrinsic diversity of one idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandaloneDiversity {
    pub semantic_diversity: f32,
    pub keyword_diversity: f32,
    pub combined_diversity: f32,
    pub diversity_level: DiversityLevel,
    pub domains_detected: Vec<Domain>,
    pub vocabulary_richness: f32,
    pub complexity_score: f32,
}

/// Diversity of an idea relative to earlier ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeDiversity {
    pub semantic_diversity: f32,
    pub keyword_diversity: f32,
    pub combined_diversity: f32,
    pub diversity_level: DiversityLevel,
}

/// Aggregate creativity metrics over a set of ideas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetrics {
    /// Number of ideas
    pub fluency: usize,
    /// Distinct domains across all ideas
    pub flexibility: usize,
    pub originality: f32,
    pub elaboration: f32,
    /// Ideas touching each domain
    pub domain_distribution: BTreeMap<String, usize>,
}

/// Round to three decimals for reporting
pub fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Stateless scorer; callers pass prior ideas explicitly
#[derive(Debug, Clone, Copy, Default)]
pub struct DiversityScorer {
    analyzer: TextAnalyzer,
}

impl DiversityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standalone(&self, text: &str) -> StandaloneDiversity {
        let features = self.analyzer.analyze(text);
        self.standalone_from(text, &features)
    }

    /// Standalone score from precomputed features of `text`
    pub fn standalone_from(&self, text: &str, features: &TextFeatures) -> StandaloneDiversity {
        let domains = features.domains();
        let domain_score = (domains.len() as f32 / DOMAIN_SATURATION).min(1.0);
        let semantic = (variance(&feature_embedding(text)) * 100.0).min(1.0);

        let combined = features.vocabulary_richness * WEIGHT_RICHNESS
            + features.complexity * WEIGHT_COMPLEXITY
            + domain_score * WEIGHT_DOMAINS
            + semantic * WEIGHT_SEMANTIC;

        StandaloneDiversity {
            semantic_diversity: round3(semantic),
            keyword_diversity: round3(features.vocabulary_richness),
            combined_diversity: round3(combined),
            diversity_level: DiversityLevel::standalone(combined),
            domains_detected: domains,
            vocabulary_richness: round3(features.vocabulary_richness),
            complexity_score: round3(features.complexity),
        }
    }

    /// Score `text` against the texts of `prior` ideas.
    pub fn relative<S: AsRef<str>>(&self, text: &str, prior: &[S]) -> RelativeDiversity {
        let embedding = feature_embedding(text);
        let max_similarity = prior
            .iter()
            .filter_map(|p| cosine_similarity(&embedding, &feature_embedding(p.as_ref())))
            .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.max(s))));
        let semantic = match max_similarity {
            Some(similarity) => (1.0 - similarity).clamp(0.0, 1.0),
            None => 1.0,
        };

        let words: HashSet<String> = keywords::tokenize(text).into_iter().collect();
        let existing: HashSet<String> = prior
            .iter()
            .flat_map(|p| keywords::tokenize(p.as_ref()))
            .collect();

        let keyword = if existing.is_empty() {
            (words.len() as f32 / FIRST_IDEA_WORD_SATURATION).min(1.0)
        } else if words.is_empty() {
            0.0
        } else {
            let overlap = words.intersection(&existing).count() as f32 / words.len() as f32;
            1.0 - overlap
        };

        let combined = semantic * WEIGHT_RELATIVE_SEMANTIC + keyword * WEIGHT_RELATIVE_KEYWORD;

        RelativeDiversity {
            semantic_diversity: round3(semantic),
            keyword_diversity: round3(keyword),
            combined_diversity: round3(combined),
            diversity_level: DiversityLevel::relative(combined),
        }
    }

    /// Fluency, flexibility, originality and elaboration of a collection.
    pub fn collection<S: AsRef<str>>(&self, texts: &[S]) -> CollectionMetrics {
        if texts.is_empty() {
            return CollectionMetrics::default();
        }

        let features: Vec<TextFeatures> =
            texts.iter().map(|t| self.analyzer.analyze(t.as_ref())).collect();

        let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut all_domains: BTreeSet<Domain> = BTreeSet::new();
        for f in &features {
            for domain in f.domains() {
                all_domains.insert(domain);
                *distribution.entry(domain.label().to_string()).or_insert(0) += 1;
            }
        }

        let embeddings: Vec<Vec<f32>> = texts.iter().map(|t| hashed_embedding(t.as_ref())).collect();
        let originality = if embeddings.len() == 1 {
            1.0
        } else {
            let total: f32 = embeddings
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let max_sim = embeddings
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .filter_map(|(_, other)| cosine_similarity(e, other))
                        .fold(0.0f32, f32::max);
                    (1.0 - max_sim).clamp(0.0, 1.0)
                })
                .sum();
            total / embeddings.len() as f32
        };

        let elaboration = features
            .iter()
            .map(|f| (f.word_count() as f32 / ELABORATION_WORDS).min(1.0))
            .sum::<f32>()
            / features.len() as f32;

        CollectionMetrics {
            fluency: texts.len(),
            flexibility: all_domains.len(),
            originality: round3(originality),
            elaboration: round3(elaboration),
            domain_distribution: distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_thresholds() {
        assert_eq!(DiversityLevel::standalone(0.61), DiversityLevel::High);
        assert_eq!(DiversityLevel::standalone(0.6), DiversityLevel::Medium);
        assert_eq!(DiversityLevel::standalone(0.36), DiversityLevel::Medium);
        assert_eq!(DiversityLevel::standalone(0.35), DiversityLevel::Low);
    }

    #[test]
    fn test_relative_thresholds() {
        assert_eq!(DiversityLevel::relative(0.71), DiversityLevel::High);
        assert_eq!(DiversityLevel::relative(0.7), DiversityLevel::Medium);
        assert_eq!(DiversityLevel::relative(0.4), DiversityLevel::Low);
    }

    #[test]
    fn test_standalone_in_range_and_deterministic() {
        let scorer = DiversityScorer::new();
        for text in ["", "x", "A mobile app for community recycling", "!!!???"] {
            let a = scorer.standalone(text);
            let b = scorer.standalone(text);
            assert_eq!(a, b);
            assert!((0.0..=1.0).contains(&a.combined_diversity), "{text}");
        }

        let empty = scorer.standalone("");
        assert_eq!(empty.combined_diversity, 0.0);
        assert_eq!(empty.diversity_level, DiversityLevel::Low);
    }

    #[test]
    fn test_first_idea_is_fully_diverse() {
        let scorer = DiversityScorer::new();
        let report = scorer.relative::<&str>("solar bikes for city commuters", &[]);
        assert_eq!(report.semantic_diversity, 1.0);
        // five unique words / 20
        assert_eq!(report.keyword_diversity, 0.25);
        assert_eq!(report.diversity_level, DiversityLevel::High);
    }

    #[test]
    fn test_identical_idea_is_not_diverse() {
        let scorer = DiversityScorer::new();
        let text = "solar bikes for city commuters";
        let report = scorer.relative(text, &[text]);
        assert_eq!(report.semantic_diversity, 0.0);
        assert_eq!(report.keyword_diversity, 0.0);
        assert_eq!(report.diversity_level, DiversityLevel::Low);
    }

    #[test]
    fn test_collection_metrics() {
        let scorer = DiversityScorer::new();
        let metrics = scorer.collection(&["A mobile app", "Community garden for health"]);
        assert_eq!(metrics.fluency, 2);
        assert_eq!(metrics.flexibility, 3);
        assert_eq!(metrics.domain_distribution.get("technology"), Some(&1));
        assert!((0.0..=1.0).contains(&metrics.originality));

        let single = scorer.collection(&["one idea"]);
        assert_eq!(single.originality, 1.0);
        assert_eq!(scorer.collection::<&str>(&[]).fluency, 0);
    }
}
