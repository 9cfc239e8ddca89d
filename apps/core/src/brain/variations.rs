//! Idea variations via random word association or reverse brainstorming.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::keywords;

const RANDOM_WORDS: &[&str] = &[
    "ocean", "mountain", "lightning", "mirror", "clock", "garden", "bridge", "telescope", "compass",
    "butterfly", "volcano", "crystal", "orchestra", "library", "maze", "prism", "anchor", "horizon",
];

const REVERSE_PROMPTS: &[&str] = &[
    "How could we make this idea completely fail?",
    "What would be the worst possible implementation?",
    "How could we ensure nobody wants to use this?",
    "What assumptions make this idea seem impossible?",
];

const VARIATION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Technique {
    #[serde(rename = "Random Word Association")]
    RandomWordAssociation,
    #[serde(rename = "Reverse Brainstorming")]
    ReverseBrainstorming,
}

impl Technique {
    fn description(self) -> &'static str {
        match self {
            Technique::RandomWordAssociation => {
                "Combines unrelated concepts to spark creative connections"
            }
            Technique::ReverseBrainstorming => {
                "Inverts the problem to reveal hidden insights and constraints"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    pub variation_text: String,
    pub technique: Technique,
    pub stimulus: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariationSet {
    pub method_used: Technique,
    pub description: &'static str,
    pub generated_ideas: Vec<Variation>,
}

/// Three variations of `idea_text` using a randomly chosen technique.
pub fn generate_variations<R: Rng + ?Sized>(idea_text: &str, rng: &mut R) -> VariationSet {
    let technique = if rng.gen_bool(0.5) {
        Technique::RandomWordAssociation
    } else {
        Technique::ReverseBrainstorming
    };
    variations_with(technique, idea_text, rng)
}

pub fn variations_with<R: Rng + ?Sized>(technique: Technique, idea_text: &str, rng: &mut R) -> VariationSet {
    let generated_ideas = match technique {
        Technique::RandomWordAssociation => {
            let preview = keywords::truncate_chars(idea_text, 50);
            RANDOM_WORDS
                .choose_multiple(rng, VARIATION_COUNT)
                .map(|word| Variation {
                    variation_text: format!(
                        "What if we combine '{preview}...' with the concept of a {word}? \
                         This could lead to a {word}-inspired approach that transforms the original idea."
                    ),
                    technique,
                    stimulus: word.to_string(),
                    reasoning: format!(
                        "Associating with '{word}' opens unexpected neural pathways, \
                         potentially revealing innovative angles and creative solutions."
                    ),
                })
                .collect()
        }
        Technique::ReverseBrainstorming => {
            let preview = keywords::truncate_chars(idea_text, 40);
            REVERSE_PROMPTS
                .choose_multiple(rng, VARIATION_COUNT)
                .enumerate()
                .map(|(i, prompt)| Variation {
                    variation_text: format!(
                        "Reverse Challenge #{}: {prompt} By inverting this question, we discover: \
                         [The opposite approach reveals that {preview}... could be enhanced by \
                         addressing these inverse concerns.]",
                        i + 1
                    ),
                    technique,
                    stimulus: prompt.to_string(),
                    reasoning: "Identifying what NOT to do reveals critical success factors \
                                and highlights potential pitfalls to avoid."
                        .to_string(),
                })
                .collect()
        }
    };

    VariationSet {
        method_used: technique,
        description: technique.description(),
        generated_ideas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_word_association_uses_distinct_words() {
        let mut rng = StdRng::seed_from_u64(11);
        let set = variations_with(Technique::RandomWordAssociation, "Solar bikes", &mut rng);
        assert_eq!(set.generated_ideas.len(), 3);
        let mut stimuli: Vec<_> = set.generated_ideas.iter().map(|v| v.stimulus.clone()).collect();
        stimuli.dedup();
        assert_eq!(stimuli.len(), 3);
        assert!(set.generated_ideas[0].variation_text.contains("Solar bikes..."));
    }

    #[test]
    fn test_reverse_brainstorming_numbers_challenges() {
        let mut rng = StdRng::seed_from_u64(5);
        let set = variations_with(Technique::ReverseBrainstorming, "Solar bikes", &mut rng);
        assert_eq!(set.method_used, Technique::ReverseBrainstorming);
        assert!(set.generated_ideas[2].variation_text.starts_with("Reverse Challenge #3: "));
    }

    #[test]
    fn test_serializes_technique_names() {
        let mut rng = StdRng::seed_from_u64(2);
        let json = serde_json::to_value(generate_variations("x", &mut rng)).unwrap();
        let method = json["method_used"].as_str().unwrap();
        assert!(method == "Random Word Association" || method == "Reverse Brainstorming");
    }
}
