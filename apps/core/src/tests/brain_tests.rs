//! Brain Module Tests
//!
//! Properties of the idea analyses that hold for any input: score ranges,
//! level boundaries, determinism and bounded output sizes.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::brain::combinations::generate_combinations;
use crate::brain::embedding::{feature_embedding, hashed_embedding, FEATURE_DIMENSIONS, HASHED_DIMENSIONS};
use crate::brain::variations::{variations_with, Technique};
use crate::brain::{DiversityLevel, DiversityScorer, QuestionGenerator, SwotGenerator};

const SAMPLE_IDEAS: &[&str] = &[
    "",
    "A mobile app for community recycling",
    "Blockchain ledger for tracking organic farm produce",
    "AI tutor that adapts lessons for students with dyslexia",
    "!!!",
    "Solar powered bus stops with free wifi and air quality sensors",
    "Une plateforme écologique pour les écoles",
];

#[cfg(test)]
mod diversity_tests {
    use super::*;

    #[test]
    fn test_level_boundaries_are_exclusive() {
        assert_eq!(DiversityLevel::standalone(0.6), DiversityLevel::Medium);
        assert_eq!(DiversityLevel::standalone(0.601), DiversityLevel::High);
        assert_eq!(DiversityLevel::standalone(0.35), DiversityLevel::Low);
        assert_eq!(DiversityLevel::standalone(0.351), DiversityLevel::Medium);

        assert_eq!(DiversityLevel::relative(0.7), DiversityLevel::Medium);
        assert_eq!(DiversityLevel::relative(0.701), DiversityLevel::High);
        assert_eq!(DiversityLevel::relative(0.4), DiversityLevel::Low);
        assert_eq!(DiversityLevel::relative(0.401), DiversityLevel::Medium);
    }

    #[test]
    fn test_standalone_scores_in_unit_range() {
        let scorer = DiversityScorer::new();
        for idea in SAMPLE_IDEAS {
            let d = scorer.standalone(idea);
            for score in [d.semantic_diversity, d.keyword_diversity, d.combined_diversity] {
                assert!((0.0..=1.0).contains(&score), "score {} out of range for '{}'", score, idea);
            }
            assert_eq!(d.diversity_level, DiversityLevel::standalone(d.combined_diversity));
        }
    }

    #[test]
    fn test_relative_scores_in_unit_range_and_deterministic() {
        let scorer = DiversityScorer::new();
        for (i, idea) in SAMPLE_IDEAS.iter().enumerate() {
            let prior = &SAMPLE_IDEAS[..i];
            let first = scorer.relative(idea, prior);
            let second = scorer.relative(idea, prior);
            assert_eq!(first, second);
            assert!((0.0..=1.0).contains(&first.combined_diversity));
        }
    }

    #[test]
    fn test_collection_counts_every_idea() {
        let scorer = DiversityScorer::new();
        let metrics = scorer.collection(SAMPLE_IDEAS);
        assert_eq!(metrics.fluency, SAMPLE_IDEAS.len());
        assert_eq!(metrics.flexibility, metrics.domain_distribution.len());
        assert_eq!(metrics, scorer.collection(SAMPLE_IDEAS));
    }

    #[test]
    fn test_embeddings_are_stable() {
        for idea in SAMPLE_IDEAS {
            assert_eq!(feature_embedding(idea).len(), FEATURE_DIMENSIONS);
            assert_eq!(hashed_embedding(idea).len(), HASHED_DIMENSIONS);
            assert_eq!(hashed_embedding(idea), hashed_embedding(idea));
        }
    }
}

#[cfg(test)]
mod analysis_tests {
    use super::*;

    #[test]
    fn test_swot_quadrants_hold_two_to_four() {
        let swot = SwotGenerator::new();
        for idea in SAMPLE_IDEAS {
            let analysis = swot.analyze(idea);
            for quadrant in [
                &analysis.strengths,
                &analysis.weaknesses,
                &analysis.opportunities,
                &analysis.threats,
            ] {
                assert!(
                    (2..=4).contains(&quadrant.len()),
                    "quadrant of {} entries for '{}'",
                    quadrant.len(),
                    idea
                );
            }
            assert_eq!(analysis, swot.analyze(idea));
        }
    }

    #[test]
    fn test_always_three_combinations() {
        for pair in SAMPLE_IDEAS.windows(2) {
            assert_eq!(generate_combinations(pair[0], pair[1]).len(), 3);
        }
    }

    #[test]
    fn test_questions_respect_count() {
        let generator = QuestionGenerator::new();
        let mut rng = StdRng::seed_from_u64(42);
        for idea in SAMPLE_IDEAS {
            assert_eq!(generator.generate(idea, 3, &mut rng).len(), 3);
            assert_eq!(generator.generate(idea, 5, &mut rng).len(), 5);
        }
    }

    #[test]
    fn test_same_seed_same_variations() {
        let idea = "A mobile app for community recycling";
        let a = variations_with(Technique::RandomWordAssociation, idea, &mut StdRng::seed_from_u64(9));
        let b = variations_with(Technique::RandomWordAssociation, idea, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.generated_ideas, b.generated_ideas);
        assert!(!a.generated_ideas.is_empty());
    }
}
