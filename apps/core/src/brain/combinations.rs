//! Idea combination: principle extraction and fusion strategies.

use serde::Serialize;

use super::keywords;

const PRINCIPLE_PATTERNS: &[(&str, &[&str])] = &[
    ("efficiency", &["fast", "quick", "efficient", "streamline", "optimize", "automate"]),
    ("accessibility", &["easy", "simple", "accessible", "user-friendly", "intuitive", "inclusive"]),
    ("sustainability", &["green", "eco", "sustainable", "renewable", "environment", "waste"]),
    ("collaboration", &["together", "community", "share", "collaborate", "network", "social"]),
    ("innovation", &["new", "novel", "creative", "innovative", "breakthrough", "unique"]),
    ("scalability", &["scale", "grow", "expand", "global", "mass", "widespread"]),
    ("personalization", &["custom", "personal", "individual", "tailored", "adapt", "flexible"]),
    ("integration", &["connect", "integrate", "combine", "unified", "seamless", "holistic"]),
];

const FOCUS_DOMAINS: &[(&str, &[&str])] = &[
    ("health", &["health", "medical", "fitness", "wellness"]),
    ("education", &["education", "learn", "teach", "school", "student"]),
    ("business", &["business", "startup", "entrepreneur", "market"]),
    ("technology", &["tech", "app", "software", "digital", "ai"]),
];

const PREVIEW_CHARS: usize = 30;

/// Principles and focus domains found in one idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorePrinciples {
    pub principles: Vec<&'static str>,
    pub domains: Vec<&'static str>,
    pub text_length: usize,
    /// Whitespace-separated word count
    pub complexity: usize,
}

fn matching(lower: &str, table: &[(&'static str, &[&str])]) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(_, kws)| keywords::contains_any(lower, kws))
        .map(|(name, _)| *name)
        .collect()
}

pub fn extract_principles(idea_text: &str) -> CorePrinciples {
    let lower = idea_text.to_lowercase();
    CorePrinciples {
        principles: matching(&lower, PRINCIPLE_PATTERNS),
        domains: matching(&lower, FOCUS_DOMAINS),
        text_length: idea_text.chars().count(),
        complexity: idea_text.split_whitespace().count(),
    }
}

/// Three fusion strategies for a pair of ideas.
pub fn generate_combinations(first: &str, second: &str) -> Vec<String> {
    let p1 = extract_principles(first);
    let p2 = extract_principles(second);

    let shared = p1.principles.first().copied().unwrap_or("innovation");
    let borrowed = p2.principles.first().copied().unwrap_or("efficiency");
    let domain1 = p1.domains.first().copied().unwrap_or("technology");
    let domain2 = p2.domains.first().copied().unwrap_or("social");

    vec![
        format!(
            "Merge {}... with {}... through shared {} approach",
            keywords::truncate_chars(first, PREVIEW_CHARS),
            keywords::truncate_chars(second, PREVIEW_CHARS),
            shared
        ),
        format!("Apply {borrowed} from idea 2 to enhance idea 1's core functionality"),
        format!("Create hybrid solution combining {domain1} and {domain2} domains"),
    ]
}
