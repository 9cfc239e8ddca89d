//! Rule-based SWOT generation.
//!
//! Rules are evaluated in declaration order; a rule fires when any of its
//! triggers is a substring of the lower-cased idea. Fired sentences are
//! appended to their category, topped up with generic fallbacks so each
//! category holds at least two entries, then capped at four.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::keywords;

const MAX_PER_CATEGORY: usize = 4;
const MIN_PER_CATEGORY: usize = 2;
/// Ideas with fewer distinct words are flagged as under-specified
const SHORT_IDEA_WORDS: usize = 10;

const DEFAULT_INDUSTRY: &str = "technology";
const DEFAULT_TECH: &str = "technology";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Strength,
    Weakness,
    Opportunity,
    Threat,
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    AnyOf(&'static [&'static str]),
    FewerWordsThan(usize),
}

struct SwotRule {
    category: Category,
    trigger: Trigger,
    /// May contain `{industry}` and `{tech}`
    sentence: &'static str,
}

const fn rule(category: Category, keywords: &'static [&'static str], sentence: &'static str) -> SwotRule {
    SwotRule {
        category,
        trigger: Trigger::AnyOf(keywords),
        sentence,
    }
}

use Category::{Opportunity as O, Strength as S, Threat as T, Weakness as W};

static RULES: &[SwotRule] = &[
    // Strengths: innovation and technology
    rule(S, &["ai", "artificial intelligence", "machine learning", "blockchain"], "Leverages cutting-edge {tech} for competitive advantage"),
    rule(S, &["innovative", "unique", "novel", "new approach"], "First-mover advantage in {industry} with innovative solution"),
    rule(S, &["platform", "ecosystem", "marketplace"], "Platform model enables network effects and scalability"),
    // Strengths: user experience
    rule(S, &["simple", "easy", "user-friendly", "intuitive"], "Low learning curve accelerates user adoption"),
    rule(S, &["mobile", "app", "accessible"], "Mobile-first approach captures growing smartphone user base"),
    rule(S, &["personalized", "customized", "tailored"], "Personalization increases user engagement and retention"),
    // Strengths: operational
    rule(S, &["automated", "automation", "efficient"], "Automation reduces operational costs and human error"),
    rule(S, &["real-time", "instant", "live"], "Real-time capabilities provide immediate value to users"),
    rule(S, &["integration", "integrated", "connect"], "Integration with existing tools reduces friction in adoption"),
    // Strengths: market fit
    rule(S, &["fitness", "health", "wellness", "medical"], "Addresses growing health consciousness trend"),
    rule(S, &["education", "learning", "training"], "Taps into expanding online education market"),
    rule(S, &["sustainability", "green", "eco", "environment"], "Aligns with increasing consumer demand for sustainable solutions"),
    // Weaknesses: technical
    rule(W, &["ai", "machine learning", "algorithm"], "Requires significant AI/ML expertise and continuous model training"),
    rule(W, &["blockchain", "decentralized", "distributed"], "Blockchain complexity may limit mainstream adoption"),
    rule(W, &["complex", "comprehensive", "advanced"], "Implementation complexity could extend development timeline"),
    rule(W, &["integration", "connect", "api"], "Dependency on third-party integrations creates technical risks"),
    // Weaknesses: resources
    rule(W, &["platform", "marketplace", "network"], "Two-sided platform requires critical mass for viability"),
    rule(W, &["data", "analytics", "insights"], "Data acquisition and quality maintenance requires ongoing investment"),
    rule(W, &["subscription", "premium"], "Subscription fatigue may limit user willingness to pay"),
    // Weaknesses: market
    rule(W, &["b2b", "enterprise", "business"], "B2B sales cycles are longer and require more resources"),
    rule(W, &["niche", "specific", "specialized"], "Narrow market focus limits addressable market size"),
    SwotRule {
        category: W,
        trigger: Trigger::FewerWordsThan(SHORT_IDEA_WORDS),
        sentence: "Concept needs further refinement and detailed feature planning",
    },
    // Opportunities: growth
    rule(O, &["mobile", "app"], "Mobile market growth in {industry} projected at 15-20% annually"),
    rule(O, &["ai", "automation", "smart"], "Rising AI adoption creates favorable market conditions"),
    rule(O, &["remote", "virtual", "online"], "Remote work trend expands addressable market globally"),
    // Opportunities: expansion
    rule(O, &["platform", "marketplace"], "Platform can expand into adjacent verticals and services"),
    rule(O, &["data", "analytics"], "Collected data enables new revenue streams through insights"),
    rule(O, &["social", "community", "network"], "Community features can drive viral growth"),
    // Opportunities: partnerships
    rule(O, &["integration", "connect", "partner"], "Strategic partnerships with established players for distribution"),
    rule(O, &["b2b", "enterprise"], "Enterprise contracts provide stable recurring revenue"),
    rule(O, &["api", "developer", "open"], "Developer ecosystem can accelerate innovation"),
    // Opportunities: global trends
    rule(O, &["global", "international", "worldwide"], "Geographic expansion into emerging markets"),
    rule(O, &["sustainable", "green", "eco"], "ESG investing trend attracts impact-focused investors"),
    // Threats: competition
    rule(T, &["mobile", "app"], "Saturated {industry} app market with high user acquisition costs"),
    rule(T, &["platform", "marketplace"], "Tech giants may enter market with superior resources"),
    rule(T, &["fitness", "health"], "Established players like Apple Health and Fitbit dominate market"),
    rule(T, &["todo", "task", "productivity"], "Intense competition from free alternatives (Todoist, Notion, etc.)"),
    // Threats: technology
    rule(T, &["ai", "machine learning"], "Rapid AI advancement may obsolete current approach"),
    rule(T, &["blockchain", "crypto", "decentralized"], "Regulatory uncertainty around blockchain/crypto technologies"),
    rule(T, &["technology", "digital", "software"], "Fast-paced technology changes require continuous innovation"),
    // Threats: regulation and privacy
    rule(T, &["data", "personal", "user information"], "Stricter data privacy regulations (GDPR, CCPA) increase compliance costs"),
    rule(T, &["health", "medical", "healthcare"], "Healthcare regulations (HIPAA) add complexity and costs"),
    rule(T, &["financial", "payment", "money"], "Financial regulations require licensing and compliance infrastructure"),
    // Threats: market dynamics
    rule(T, &["subscription", "saas", "recurring"], "Economic downturn may increase subscription churn rates"),
    rule(T, &["b2b", "enterprise"], "Enterprise budget cuts during economic uncertainty"),
];

/// Industry detection, first match wins
const INDUSTRIES: &[(&str, &[&str])] = &[
    ("health & wellness", &["health", "fitness", "wellness", "medical", "therapy"]),
    ("education", &["education", "learning", "teaching", "training", "course"]),
    ("fintech", &["finance", "payment", "banking", "crypto", "investment"]),
    ("e-commerce", &["marketplace", "shopping", "retail", "store", "commerce"]),
    ("productivity", &["productivity", "task", "todo", "project management"]),
    ("social", &["social", "community", "network", "connect", "chat"]),
    ("enterprise", &["enterprise", "b2b", "business", "corporate"]),
    ("consumer tech", &["mobile", "app", "consumer", "user"]),
];

const TECH_CONCEPTS: &[&str] = &["ai", "blockchain", "machine learning", "platform", "app", "software"];

/// Four-quadrant analysis of an idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl SwotAnalysis {
    fn category_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Strength => &mut self.strengths,
            Category::Weakness => &mut self.weaknesses,
            Category::Opportunity => &mut self.opportunities,
            Category::Threat => &mut self.threats,
        }
    }
}

/// Primary industry of an already lower-cased text
pub fn detect_industry(lower: &str) -> &'static str {
    INDUSTRIES
        .iter()
        .find(|(_, kws)| keywords::contains_any(lower, kws))
        .map(|(industry, _)| *industry)
        .unwrap_or(DEFAULT_INDUSTRY)
}

fn detect_tech(lower: &str) -> &'static str {
    TECH_CONCEPTS
        .iter()
        .find(|t| lower.contains(*t))
        .copied()
        .unwrap_or(DEFAULT_TECH)
}

/// Deterministic SWOT generator
#[derive(Debug, Clone, Copy, Default)]
pub struct SwotGenerator;

impl SwotGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, idea_text: &str) -> SwotAnalysis {
        let lower = idea_text.to_lowercase();
        let unique_words: BTreeSet<String> = keywords::tokenize(&lower).into_iter().collect();
        let industry = detect_industry(&lower);
        let tech = detect_tech(&lower);

        let mut swot = SwotAnalysis {
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            opportunities: Vec::new(),
            threats: Vec::new(),
        };

        for rule in RULES {
            let fired = match rule.trigger {
                Trigger::AnyOf(kws) => keywords::contains_any(&lower, kws),
                Trigger::FewerWordsThan(n) => unique_words.len() < n,
            };
            if fired {
                let sentence = rule
                    .sentence
                    .replace("{industry}", industry)
                    .replace("{tech}", tech);
                swot.category_mut(rule.category).push(sentence);
            }
        }

        top_up(
            &mut swot.strengths,
            [
                format!("Addresses genuine need in {industry} market"),
                "Clear value proposition for target users".to_string(),
            ],
            "Potential for strong user engagement and retention",
        );
        top_up(
            &mut swot.weaknesses,
            [
                "Requires substantial initial investment in development".to_string(),
                "User acquisition in competitive market poses challenges".to_string(),
            ],
            "Building brand awareness requires significant marketing budget",
        );
        top_up(
            &mut swot.opportunities,
            [
                format!("Growing demand in {industry} sector"),
                "Potential for geographic and demographic expansion".to_string(),
            ],
            "Strategic partnerships could accelerate growth",
        );
        top_up(
            &mut swot.threats,
            [
                "Well-funded competitors may replicate features quickly".to_string(),
                "Changing user preferences require continuous adaptation".to_string(),
            ],
            "Market saturation may limit growth potential",
        );

        for category in [&mut swot.strengths, &mut swot.weaknesses, &mut swot.opportunities, &mut swot.threats] {
            category.truncate(MAX_PER_CATEGORY);
        }
        swot
    }
}

/// Empty categories get both fallbacks, single-entry ones get the extra.
fn top_up(entries: &mut Vec<String>, when_empty: [String; 2], when_single: &str) {
    if entries.is_empty() {
        entries.extend(when_empty);
    } else if entries.len() < MIN_PER_CATEGORY {
        entries.push(when_single.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bounds(swot: &SwotAnalysis) {
        for category in [&swot.strengths, &swot.weaknesses, &swot.opportunities, &swot.threats] {
            assert!(category.len() >= MIN_PER_CATEGORY && category.len() <= MAX_PER_CATEGORY);
        }
    }

    #[test]
    fn test_empty_idea_gets_fallbacks() {
        let swot = SwotGenerator::new().analyze("");
        assert_bounds(&swot);
        assert_eq!(swot.strengths[0], "Addresses genuine need in technology market");
        // the short-idea weakness fires, then one fallback is appended
        assert_eq!(
            swot.weaknesses,
            vec![
                "Concept needs further refinement and detailed feature planning",
                "Building brand awareness requires significant marketing budget",
            ]
        );
    }

    #[test]
    fn test_mobile_app_rules_fill_industry() {
        let swot = SwotGenerator::new().analyze("A mobile app for community recycling");
        assert_bounds(&swot);
        assert!(swot
            .opportunities
            .contains(&"Mobile market growth in social projected at 15-20% annually".to_string()));
        assert!(swot
            .threats
            .contains(&"Saturated social app market with high user acquisition costs".to_string()));
    }

    #[test]
    fn test_caps_at_four_in_rule_order() {
        let swot = SwotGenerator::new().analyze(
            "An innovative AI platform, simple mobile app with automated real-time integration for health",
        );
        assert_eq!(swot.strengths.len(), 4);
        assert_eq!(swot.strengths[0], "Leverages cutting-edge ai for competitive advantage");
    }

    #[test]
    fn test_industry_detection_order() {
        assert_eq!(detect_industry("a health app"), "health & wellness");
        assert_eq!(detect_industry("a mobile game"), "consumer tech");
        assert_eq!(detect_industry("paper clips"), DEFAULT_INDUSTRY);
    }
}
