//! Socratic question generation.
//!
//! Question categories are visited in a fixed cycle (clarification,
//! assumptions, implications, alternatives); within a category a template is
//! drawn at random and its placeholders filled from the idea's own words.

use rand::seq::SliceRandom;
use rand::Rng;

use super::keywords;

const CLARIFICATION: &[&str] = &[
    "What exactly do you mean by '{concept}'?",
    "Could you give me a specific example of how {concept} would work?",
    "How does this differ from existing solutions like {comparison}?",
    "What would be the core features of this {concept}?",
];

const ASSUMPTIONS: &[&str] = &[
    "What assumptions are you making about your target users?",
    "What if people don't want to {action}? What's your backup plan?",
    "Are you assuming that {assumption}? What if that's not true?",
    "What evidence supports the need for this solution?",
];

const IMPLICATIONS: &[&str] = &[
    "What are the potential negative consequences of implementing this?",
    "How might this impact {stakeholder} in unexpected ways?",
    "What happens if this becomes widely adopted?",
    "What ethical considerations should we think about?",
];

const ALTERNATIVES: &[&str] = &[
    "What other approaches have you considered?",
    "How else might someone solve this problem?",
    "What if we approached this from {alternative_angle}?",
    "Could we achieve similar results with a simpler approach?",
];

const CATEGORIES: &[&[&str]] = &[CLARIFICATION, ASSUMPTIONS, IMPLICATIONS, ALTERNATIVES];

const ACTIONS: &[&str] = &["use this", "adopt this", "pay for this", "change their behavior"];
const STAKEHOLDERS: &[&str] = &["users", "businesses", "communities", "the environment"];
const COMPARISONS: &[&str] = &["the apps people already use", "traditional services", "a simple spreadsheet"];
const ASSUMED: &[&str] = &[
    "people will change their habits",
    "the problem is widespread",
    "users will trust a new solution",
];
const ANGLES: &[&str] = &["the opposite direction", "a non-profit angle", "the end user's daily routine"];

const FALLBACK_CONCEPT: &str = "idea";

/// Words long enough to stand in for `{concept}`
fn meaningful_words(idea_text: &str) -> Vec<String> {
    keywords::tokenize(idea_text)
        .into_iter()
        .filter(|w| w.chars().count() > 3)
        .collect()
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Template-driven Socratic question generator
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionGenerator;

impl QuestionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Up to `count` distinct questions about `idea_text`.
    pub fn generate<R: Rng + ?Sized>(&self, idea_text: &str, count: usize, rng: &mut R) -> Vec<String> {
        let concepts = meaningful_words(idea_text);
        let capacity: usize = CATEGORIES.iter().map(|c| c.len()).sum();
        let mut questions: Vec<String> = Vec::with_capacity(count.min(capacity));

        for i in 0..count.min(capacity) {
            let category = CATEGORIES[i % CATEGORIES.len()];
            let unused: Vec<&str> = category
                .iter()
                .copied()
                .filter(|t| !questions.iter().any(|q| q.starts_with(template_stem(t))))
                .collect();
            let Some(template) = unused.choose(rng) else {
                continue;
            };

            let concept = concepts
                .choose(rng)
                .map(String::as_str)
                .unwrap_or(FALLBACK_CONCEPT);
            let question = template
                .replace("{concept}", concept)
                .replace("{action}", pick(rng, ACTIONS))
                .replace("{stakeholder}", pick(rng, STAKEHOLDERS))
                .replace("{comparison}", pick(rng, COMPARISONS))
                .replace("{assumption}", pick(rng, ASSUMED))
                .replace("{alternative_angle}", pick(rng, ANGLES));
            questions.push(question);
        }

        questions
    }
}

/// Fixed leading text of a template, up to its first placeholder
fn template_stem(template: &str) -> &str {
    template.split('{').next().unwrap_or(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_three_questions_follow_category_cycle() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = QuestionGenerator::new().generate("A mobile app for community recycling", 3, &mut rng);
        assert_eq!(questions.len(), 3);
        assert!(CLARIFICATION.iter().any(|t| questions[0].starts_with(template_stem(t))));
        assert!(ASSUMPTIONS.iter().any(|t| questions[1].starts_with(template_stem(t))));
        assert!(IMPLICATIONS.iter().any(|t| questions[2].starts_with(template_stem(t))));
        assert!(questions.iter().all(|q| !q.contains('{')));
    }

    #[test]
    fn test_questions_are_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let questions = QuestionGenerator::new().generate("solar bikes", 16, &mut rng);
        assert_eq!(questions.len(), 16);
        let unique: std::collections::HashSet<_> = questions.iter().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn test_empty_idea_uses_fallback_concept() {
        let mut rng = StdRng::seed_from_u64(3);
        let questions = QuestionGenerator::new().generate("", 20, &mut rng);
        assert_eq!(questions.len(), 16);
        assert!(questions.iter().any(|q| q.contains("idea")));
    }
}
