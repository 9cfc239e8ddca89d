//! Response composition.
//!
//! A reply starts from a template pool keyed by (intent, tone), filled from
//! the context snapshot. If that opening echoes a recent reply the flow's
//! turn template is used instead. Intent enrichment is appended, then three
//! filters run in order: tone prefix, personality consistency, repetition
//! avoidance.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{NoExpand, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

use super::flow::{self, FlowPhase, FlowVariables};
use super::intent::Intent;
use super::memory::ContextSnapshot;
use crate::brain::diversity::DiversityLevel;
use crate::brain::keywords::{self, Domain, Theme};
use crate::brain::{SentimentReport, Tone};

/// Similarity above which a reply counts as a repeat
const SIMILARITY_THRESHOLD: f32 = 0.75;
/// Replies compared by the personality and repetition filters
const LOOKBACK: usize = 3;
/// Opening characters compared when checking a template for repetition
const OPENING_CHARS: usize = 50;

const THINK_AGAIN: &str = "Let me think about this differently.";

type TonePools = &'static [(Tone, &'static [&'static str])];

const SEEKING_VALIDATION_POOLS: TonePools = &[
    (
        Tone::Supportive,
        &[
            "{context_hook} You're definitely on the right track! What feels most promising to you?",
            "{context_hook} This has strong fundamentals! Which aspect excites you most?",
            "{context_hook} Solid thinking here! What direction should we explore next?",
            "{context_hook} You've got something valuable! How do you want to develop this?",
        ],
    ),
    (
        Tone::Encouraging,
        &[
            "{context_hook} You're building something meaningful! What's your next step?",
            "{context_hook} This is worth pursuing! How can we strengthen it further?",
            "{context_hook} Great foundation work! What piece needs more development?",
            "{context_hook} You're solving a real problem! Where should we focus next?",
        ],
    ),
];

const TEMPLATE_POOLS: &[(Intent, TonePools)] = &[
    (
        Intent::IdeaSubmission,
        &[
            (
                Tone::Supportive,
                &[
                    "That's an exciting concept! {context_hook} What specific problem does this solve?",
                    "I love this direction! {context_hook} Who would benefit most from this?",
                    "Brilliant thinking! {context_hook} What makes this different from existing solutions?",
                    "This has real potential! {context_hook} How did you come up with this approach?",
                ],
            ),
            (
                Tone::Curious,
                &[
                    "Interesting approach! {context_hook} Help me understand the core value proposition.",
                    "That's a solid foundation. {context_hook} What's the key problem you're addressing?",
                    "Nice concept! {context_hook} What inspired this particular direction?",
                    "Good thinking! {context_hook} Walk me through the user experience.",
                ],
            ),
            (
                Tone::Encouraging,
                &[
                    "You're onto something here! {context_hook} Let's explore what makes this unique.",
                    "That's a promising start! {context_hook} What's your vision for how this works?",
                    "Great direction! {context_hook} How do you see people using this?",
                    "This could work well! {context_hook} What's the core benefit for users?",
                ],
            ),
        ],
    ),
    (
        Intent::SeekingChallenge,
        &[
            (
                Tone::Collaborative,
                &[
                    "Let's stress-test this! {context_hook} What if users don't want to {assumed_action}?",
                    "Good point to challenge! {context_hook} You're assuming {assumption} - what if that's not true?",
                    "Let's dig deeper! {context_hook} What's the biggest risk with this approach?",
                    "Time to push this further! {context_hook} How might this fail unexpectedly?",
                ],
            ),
            (
                Tone::Curious,
                &[
                    "Here's a tough question: {context_hook} What if {alternative_scenario}?",
                    "Let me challenge that: {context_hook} Is {assumption} really necessary?",
                    "Something to consider: {context_hook} How would competitors respond to this?",
                    "Worth questioning: {context_hook} What could make this obsolete quickly?",
                ],
            ),
        ],
    ),
    (
        Intent::RequestingSwot,
        &[(
            Tone::Analytical,
            &[
                "Strategic analysis time! {context_hook} Here's how I see the landscape:",
                "Let's break this down systematically! {context_hook} SWOT perspective:",
                "Time for strategic thinking! {context_hook} Here's the competitive analysis:",
                "Strategic evaluation: {context_hook} Key factors to consider:",
            ],
        )],
    ),
    (
        Intent::CombinationRequest,
        &[(
            Tone::Creative,
            &[
                "Perfect fusion opportunity! {context_hook} Here's how we could blend these:",
                "Cross-pollination time! {context_hook} I see these synthesis possibilities:",
                "Creative combination ahead! {context_hook} Let's merge these concepts:",
                "Hybrid innovation potential! {context_hook} Here are the fusion strategies:",
            ],
        )],
    ),
    (Intent::SeekingValidation, SEEKING_VALIDATION_POOLS),
];

/// Phrases that make the assistant sound generic when repeated
const AVOID_PHRASES: &[&str] = &[
    "That's interesting",
    "Tell me more",
    "Great question",
    "I love that",
    "That's a good point",
    "Absolutely",
];

// NOTE: expect() is acceptable here: the patterns are escaped literals and compiled once.
static AVOID_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    AVOID_PHRASES
        .iter()
        .map(|phrase| {
            let pattern = format!("(?i){}", regex::escape(phrase));
            (*phrase, Regex::new(&pattern).expect("Invalid regex: avoid phrase"))
        })
        .collect()
});

const PHRASE_REPLACEMENTS: &[(&str, &[&str])] = &[
    (
        "That's interesting",
        &["This opens up possibilities", "I see potential here", "This direction has merit"],
    ),
    (
        "Tell me more",
        &[
            "What's driving this thinking?",
            "How does this solve the core problem?",
            "What's the key insight behind this?",
        ],
    ),
    (
        "Great question",
        &[
            "That touches on something important",
            "This gets to the heart of it",
            "You're identifying a crucial factor",
        ],
    ),
    (
        "I love that",
        &[
            "This approach has strength",
            "There's solid thinking here",
            "This tackles the problem well",
        ],
    ),
    (
        "That's a good point",
        &[
            "You're onto something significant",
            "This insight matters",
            "This perspective adds value",
        ],
    ),
];

#[derive(Debug, Clone, Copy)]
enum Clause {
    Prefix(&'static str),
    Suffix(&'static str),
}

impl Clause {
    fn text(self) -> &'static str {
        match self {
            Clause::Prefix(text) | Clause::Suffix(text) => text,
        }
    }

    fn apply(self, response: &str) -> String {
        match self {
            Clause::Prefix(text) => format!("{}{}", text, response),
            Clause::Suffix(text) => format!("{}{}", response, text),
        }
    }
}

/// Diversifying clauses, tried in order
const DIVERSIFIERS: &[Clause] = &[
    Clause::Suffix(" Let's explore this from a different angle."),
    Clause::Suffix(" What other perspectives should we consider?"),
    Clause::Suffix(" How might we challenge this assumption differently?"),
    Clause::Prefix("Building on our discussion: "),
    Clause::Prefix("Taking a fresh approach: "),
    Clause::Suffix(" Let me ask this in a new way."),
    Clause::Prefix("Continuing our exploration: "),
    Clause::Suffix(" What if we reframe this completely?"),
    Clause::Prefix("Here's another lens to consider: "),
    Clause::Suffix(" Let's dig deeper into this aspect."),
];

const VARIATION_PREFIXES: &[&str] = &[
    "Here's a different take: ",
    "Let me approach this differently: ",
    "From another perspective: ",
    "Thinking about this more: ",
    "Building on that idea: ",
];

const ALTERNATIVE_ANGLES: &[&str] = &["user experience", "business model", "technology", "social impact"];

/// Analysis appended to a reply for intents that act on stored ideas
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    QuickAnalysis {
        level: DiversityLevel,
        question: Option<String>,
    },
    KeyInsight {
        strength: Option<String>,
        threat: Option<String>,
    },
    TopFusion(Option<String>),
}

impl Enrichment {
    pub fn render(&self) -> String {
        match self {
            Enrichment::QuickAnalysis { level, question } => format!(
                "\n\n📊 **Quick Analysis:**\n• Diversity: {:?}\n• Key Question: {}",
                level,
                question.as_deref().unwrap_or("How might this evolve?")
            ),
            Enrichment::KeyInsight { strength, threat } => format!(
                "\n\n**Key Insight:** {} vs. {}",
                strength.as_deref().unwrap_or("Strong foundation"),
                threat.as_deref().unwrap_or("Market competition")
            ),
            Enrichment::TopFusion(fusion) => format!(
                "\n\n💡 **Top Fusion:** {}",
                fusion.as_deref().unwrap_or("Hybrid innovation approach")
            ),
        }
    }
}

/// Values for the `{context_hook}`-style placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextVariables {
    pub context_hook: String,
    pub assumption: &'static str,
    pub assumed_action: &'static str,
    pub alternative_scenario: &'static str,
}

impl ContextVariables {
    pub fn from_snapshot(snapshot: &ContextSnapshot) -> Self {
        let lower = snapshot.recent_context.to_lowercase();
        Self {
            context_hook: context_hook(snapshot),
            assumption: implicit_assumption(&lower),
            assumed_action: assumed_action(&snapshot.recent_context),
            alternative_scenario: alternative_scenario(snapshot.user_topics.first().copied()),
        }
    }

    fn fill(&self, template: &str) -> String {
        template
            .replace("{context_hook}", &self.context_hook)
            .replace("{assumption}", self.assumption)
            .replace("{assumed_action}", self.assumed_action)
            .replace("{alternative_scenario}", self.alternative_scenario)
            .trim()
            .to_string()
    }
}

fn context_hook(snapshot: &ContextSnapshot) -> String {
    if let Some(topic) = snapshot.user_topics.first() {
        return format!("Since you're focused on {},", topic);
    }
    if snapshot.conversation_themes.contains(&Theme::InnovationFocus) {
        return "With your innovative approach,".to_string();
    }
    if snapshot.conversation_themes.contains(&Theme::ProblemSolving) {
        return "Given your problem-solving mindset,".to_string();
    }
    if snapshot.recent_context.chars().count() > 50 {
        let concept = snapshot.recent_context.split_whitespace().find(|w| {
            w.chars().count() > 5 && !matches!(w.to_lowercase().as_str(), "user:" | "kai:")
        });
        if let Some(word) = concept {
            return format!("Building on your {} concept,", word);
        }
    }
    "Thinking about this further,".to_string()
}

fn implicit_assumption(lower: &str) -> &'static str {
    if lower.contains("users will") || lower.contains("people will") {
        "users will behave predictably"
    } else if lower.contains("market") {
        "the market timing is right"
    } else if lower.contains("technology") || lower.contains("ai") {
        "the technology will work as expected"
    } else {
        "adoption will be straightforward"
    }
}

fn assumed_action(context: &str) -> &'static str {
    const ACTIONS: &[(&str, &str)] = &[
        ("use", "use this regularly"),
        ("buy", "purchase this solution"),
        ("adopt", "adopt this new approach"),
        ("try", "try this new method"),
        ("switch", "switch from current solutions"),
        ("change", "change their behavior"),
    ];
    let words = keywords::tokenize(context);
    ACTIONS
        .iter()
        .find(|(indicator, _)| words.iter().any(|w| w.as_str() == *indicator))
        .map(|(_, action)| *action)
        .unwrap_or("engage with this solution")
}

fn alternative_scenario(topic: Option<Domain>) -> &'static str {
    match topic {
        None => "user behavior changes unexpectedly",
        Some(Domain::Technology) => "new regulations restrict AI usage",
        Some(Domain::Business) => "economic conditions shift dramatically",
        Some(Domain::Health) => "privacy concerns become paramount",
        Some(Domain::Education) => "traditional institutions resist change",
        Some(Domain::Environment) => "climate priorities shift focus",
        Some(Domain::Social) => "user preferences evolve rapidly",
        Some(_) => "market conditions change significantly",
    }
}

/// Turn-template variables derived from the snapshot
pub fn flow_variables<R: Rng + ?Sized>(snapshot: &ContextSnapshot, rng: &mut R) -> FlowVariables {
    let lower = snapshot.recent_context.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let defaults = FlowVariables::default();
    let topic = snapshot.user_topics.first().map(|t| t.label().to_string());

    let problem_area = words
        .windows(2)
        .find(|pair| {
            matches!(pair[0], "problem" | "issue" | "challenge" | "difficulty" | "need")
        })
        .map(|pair| format!("{} with {}", pair[0], pair[1]))
        .unwrap_or(defaults.problem_area.clone());

    let assumption = ["users will", "people want", "market needs", "everyone", "all users"]
        .into_iter()
        .find(|p| lower.contains(p))
        .map(str::to_string)
        .unwrap_or(defaults.assumption.clone());

    let action = ["use", "buy", "adopt", "try", "change", "switch"]
        .into_iter()
        .find(|a| words.contains(a))
        .map(str::to_string)
        .unwrap_or(defaults.action.clone());

    FlowVariables {
        domain: topic.clone().unwrap_or(defaults.domain.clone()),
        concept_type: topic.unwrap_or(defaults.concept_type.clone()),
        problem_area,
        assumption,
        action,
        alternative_angle: ALTERNATIVE_ANGLES
            .choose(rng)
            .map(|a| a.to_string())
            .unwrap_or(defaults.alternative_angle.clone()),
        ..defaults
    }
}

/// Everything the composer reads for one turn
pub struct TurnInput<'a> {
    pub intent: Intent,
    /// Phase after this turn's transition
    pub phase: FlowPhase,
    pub sentiment: &'a SentimentReport,
    pub snapshot: &'a ContextSnapshot,
    pub flow_vars: &'a FlowVariables,
    /// Last assistant messages, oldest first
    pub recent_assistant: &'a [&'a str],
    /// Last final replies, oldest first
    pub recent_responses: &'a [String],
    pub enrichment: Option<&'a Enrichment>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// Filled template from the (intent, tone) pool
    pub fn template_response<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        tone: Tone,
        vars: &ContextVariables,
        rng: &mut R,
    ) -> String {
        let pools = TEMPLATE_POOLS
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, pools)| *pools)
            .unwrap_or(SEEKING_VALIDATION_POOLS);
        let templates = pools
            .iter()
            .find(|(t, _)| *t == tone)
            .or_else(|| pools.first())
            .map(|(_, templates)| *templates)
            .unwrap_or(&[]);
        templates
            .choose(rng)
            .map(|template| vars.fill(template))
            .unwrap_or_else(|| THINK_AGAIN.to_string())
    }

    pub fn compose<R: Rng + ?Sized>(&self, input: &TurnInput<'_>, rng: &mut R) -> String {
        let vars = ContextVariables::from_snapshot(input.snapshot);
        let candidate =
            self.template_response(input.intent, input.sentiment.recommended_tone, &vars, rng);

        let mut response = if is_repetitive(&candidate, input.recent_responses) {
            flow::turn_response(input.phase, input.snapshot.total_exchanges, input.flow_vars, rng)
                .unwrap_or_else(|| THINK_AGAIN.to_string())
        } else {
            candidate
        };

        if let Some(enrichment) = input.enrichment {
            response.push_str(&enrichment.render());
        }

        let toned = input.sentiment.apply_tone(&response);
        let consistent = self.enforce_personality(&toned, input.recent_assistant, rng);
        self.avoid_repetition(&consistent, input.recent_responses, rng)
    }

    /// Replace generic phrases that already appeared in the last three
    /// assistant messages.
    pub fn enforce_personality<R: Rng + ?Sized>(
        &self,
        response: &str,
        recent_assistant: &[&str],
        rng: &mut R,
    ) -> String {
        let start = recent_assistant.len().saturating_sub(LOOKBACK);
        let history = recent_assistant[start..].join(" ");
        let mut response = response.to_string();

        for (phrase, pattern) in AVOID_PATTERNS.iter() {
            if !pattern.is_match(&response) || !pattern.is_match(&history) {
                continue;
            }
            let replacement = PHRASE_REPLACEMENTS
                .iter()
                .find(|(p, _)| p == phrase)
                .and_then(|(_, alternatives)| alternatives.choose(rng));
            if let Some(replacement) = replacement {
                response = pattern.replace_all(&response, NoExpand(*replacement)).into_owned();
            }
        }
        response
    }

    /// Diversify `response` when it overlaps any of the last three replies.
    pub fn avoid_repetition<R: Rng + ?Sized>(
        &self,
        response: &str,
        recent_responses: &[String],
        rng: &mut R,
    ) -> String {
        let start = recent_responses.len().saturating_sub(LOOKBACK);
        let recent = &recent_responses[start..];

        if !recent.iter().any(|past| word_overlap(response, past) > SIMILARITY_THRESHOLD) {
            return response.to_string();
        }

        let used = recent.join(" ").to_lowercase();
        let fresh = DIVERSIFIERS
            .iter()
            .find(|clause| !used.contains(&clause.text().trim().to_lowercase()));
        if let Some(clause) = fresh {
            return clause.apply(response);
        }

        // every clause is in use; pick a prefix that does not reproduce a recent reply
        let offset = rng.gen_range(0..VARIATION_PREFIXES.len());
        let mut fallback = String::new();
        for i in 0..VARIATION_PREFIXES.len() {
            fallback = format!("{}{}", VARIATION_PREFIXES[(offset + i) % VARIATION_PREFIXES.len()], response);
            if !recent.contains(&fallback) {
                break;
            }
        }
        fallback
    }
}

/// Word-set overlap divided by the smaller set size
pub fn word_overlap(a: &str, b: &str) -> f32 {
    let a: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let b: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    a.intersection(&b).count() as f32 / a.len().min(b.len()) as f32
}

fn is_repetitive(response: &str, recent_responses: &[String]) -> bool {
    let opening: String = response.chars().take(OPENING_CHARS).collect::<String>().to_lowercase();
    recent_responses.iter().any(|recent| {
        let recent = recent.to_lowercase();
        recent.contains(&opening) || opening.contains(&recent)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::SentimentAnalyzer;
    use crate::conversation::memory::EngagementLevel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot(topics: Vec<Domain>, recent_context: &str) -> ContextSnapshot {
        ContextSnapshot {
            recent_context: recent_context.to_string(),
            user_topics: topics,
            conversation_themes: Vec::new(),
            conversation_flow: FlowPhase::IdeaExploration,
            last_intent: None,
            engagement_level: EngagementLevel::Exploring,
            total_exchanges: 1,
            context_depth: 2,
        }
    }

    #[test]
    fn test_context_variables() {
        let snap = snapshot(vec![Domain::Health], "User: people will buy this");
        let vars = ContextVariables::from_snapshot(&snap);
        assert_eq!(vars.context_hook, "Since you're focused on health,");
        assert_eq!(vars.assumption, "users will behave predictably");
        assert_eq!(vars.assumed_action, "purchase this solution");
        assert_eq!(vars.alternative_scenario, "privacy concerns become paramount");

        let empty = snapshot(Vec::new(), "short");
        let vars = ContextVariables::from_snapshot(&empty);
        assert_eq!(vars.context_hook, "Thinking about this further,");
        assert_eq!(vars.alternative_scenario, "user behavior changes unexpectedly");
    }

    #[test]
    fn test_missing_pool_falls_back() {
        let composer = ResponseComposer::new();
        let vars = ContextVariables::from_snapshot(&snapshot(Vec::new(), ""));
        let mut rng = StdRng::seed_from_u64(1);

        // asking_questions has no pools: seeking_validation, first tone
        let reply = composer.template_response(Intent::AskingQuestions, Tone::Curious, &vars, &mut rng);
        let supportive = SEEKING_VALIDATION_POOLS[0].1;
        assert!(supportive.iter().any(|t| vars.fill(t) == reply));

        // swot has only the analytical pool
        let reply = composer.template_response(Intent::RequestingSwot, Tone::Supportive, &vars, &mut rng);
        assert!(reply.contains("Thinking about this further,"));
        assert!(!reply.contains('{'));
    }

    #[test]
    fn test_personality_filter_needs_recent_use() {
        let composer = ResponseComposer::new();
        let mut rng = StdRng::seed_from_u64(2);

        let fresh = composer.enforce_personality("Great question about pricing.", &[], &mut rng);
        assert_eq!(fresh, "Great question about pricing.");

        let recent = ["Great question! Let's go."];
        let replaced = composer.enforce_personality("Great question about pricing.", &recent, &mut rng);
        assert!(!replaced.contains("Great question"));
        assert!(replaced.ends_with(" about pricing."));

        // detected but has no replacement list
        let kept = composer.enforce_personality("Absolutely.", &["absolutely"], &mut rng);
        assert_eq!(kept, "Absolutely.");
    }

    #[test]
    fn test_personality_filter_ignores_case() {
        let composer = ResponseComposer::new();
        let mut rng = StdRng::seed_from_u64(4);

        let recent = ["Great question! Let's go."];
        let replaced = composer.enforce_personality(
            "great question about pricing. GREAT QUESTION again.",
            &recent,
            &mut rng,
        );
        assert!(!replaced.to_lowercase().contains("great question"));
        assert!(replaced.contains(" about pricing. "));
        assert!(replaced.ends_with(" again."));
    }

    #[test]
    fn test_repetition_filter_diversifies() {
        let composer = ResponseComposer::new();
        let mut rng = StdRng::seed_from_u64(3);
        let first = "What specific problem does this solve?".to_string();

        let unrelated = composer.avoid_repetition("Tell me about pricing", &[first.clone()], &mut rng);
        assert_eq!(unrelated, "Tell me about pricing");

        let second = composer.avoid_repetition(&first, &[first.clone()], &mut rng);
        assert_ne!(second, first);
        assert!(second.ends_with("Let's explore this from a different angle."));

        // the first clause is now used, so the next one is picked
        let third = composer.avoid_repetition(&first, &[first.clone(), second.clone()], &mut rng);
        assert_ne!(third, second);
        assert!(third.ends_with("What other perspectives should we consider?"));
    }

    #[test]
    fn test_consecutive_similar_replies_differ() {
        let composer = ResponseComposer::new();
        let report = SentimentAnalyzer::new().analyze("a bike");
        let snap = snapshot(Vec::new(), "User: a bike");
        let flow_vars = FlowVariables::default();
        let mut recent: Vec<String> = Vec::new();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..6 {
            let input = TurnInput {
                intent: Intent::RequestingSwot,
                phase: FlowPhase::Analysis,
                sentiment: &report,
                snapshot: &snap,
                flow_vars: &flow_vars,
                recent_assistant: &[],
                recent_responses: &recent,
                enrichment: None,
            };
            let reply = composer.compose(&input, &mut rng);
            if let Some(previous) = recent.last() {
                if word_overlap(&reply, previous) > SIMILARITY_THRESHOLD {
                    assert_ne!(&reply, previous);
                }
            }
            recent.push(reply);
        }
    }

    #[test]
    fn test_enrichment_appended() {
        let composer = ResponseComposer::new();
        let report = SentimentAnalyzer::new().analyze("a bike");
        let snap = snapshot(Vec::new(), "");
        let flow_vars = FlowVariables::default();
        let enrichment = Enrichment::TopFusion(Some("Merge both".to_string()));
        let input = TurnInput {
            intent: Intent::CombinationRequest,
            phase: FlowPhase::Synthesis,
            sentiment: &report,
            snapshot: &snap,
            flow_vars: &flow_vars,
            recent_assistant: &[],
            recent_responses: &[],
            enrichment: Some(&enrichment),
        };
        let reply = composer.compose(&input, &mut StdRng::seed_from_u64(5));
        assert!(reply.starts_with("Interesting! "));
        assert!(reply.ends_with("💡 **Top Fusion:** Merge both"));
    }

    #[test]
    fn test_flow_variables_from_context() {
        let snap = snapshot(vec![Domain::Education], "User: the problem students face is that users will not try it");
        let vars = flow_variables(&snap, &mut StdRng::seed_from_u64(6));
        assert_eq!(vars.domain, "education");
        assert_eq!(vars.problem_area, "problem with students");
        assert_eq!(vars.assumption, "users will");
        assert_eq!(vars.action, "try");
        assert!(ALTERNATIVE_ANGLES.contains(&vars.alternative_angle.as_str()));
    }
}
