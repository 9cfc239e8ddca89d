//! Conversation flow state machine.
//!
//! [`next_phase`] is total: every (phase, intent) pair not listed in the
//! transition table maps back to the current phase. Auto-progression runs
//! after the table lookup and overrides it.
//!
//! Each phase also owns three ordered turn templates; `exchanges % 3`
//! picks the turn, and a template is drawn at random from its pool.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::intent::Intent;

/// Advisory depth of a conversation. Cycles indefinitely; no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowPhase {
    #[default]
    #[serde(rename = "initial")]
    Initial,
    #[serde(rename = "warm_up")]
    WarmUp,
    #[serde(rename = "idea_exploration")]
    IdeaExploration,
    #[serde(rename = "challenging_phase")]
    Challenging,
    #[serde(rename = "analysis_phase")]
    Analysis,
    #[serde(rename = "reframing_phase")]
    Reframing,
    #[serde(rename = "synthesis_phase")]
    Synthesis,
    #[serde(rename = "deep_dive")]
    DeepDive,
    #[serde(rename = "rigorous_questioning")]
    RigorousQuestioning,
}

impl FlowPhase {
    pub const ALL: [FlowPhase; 9] = [
        FlowPhase::Initial,
        FlowPhase::WarmUp,
        FlowPhase::IdeaExploration,
        FlowPhase::Challenging,
        FlowPhase::Analysis,
        FlowPhase::Reframing,
        FlowPhase::Synthesis,
        FlowPhase::DeepDive,
        FlowPhase::RigorousQuestioning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FlowPhase::Initial => "initial",
            FlowPhase::WarmUp => "warm_up",
            FlowPhase::IdeaExploration => "idea_exploration",
            FlowPhase::Challenging => "challenging_phase",
            FlowPhase::Analysis => "analysis_phase",
            FlowPhase::Reframing => "reframing_phase",
            FlowPhase::Synthesis => "synthesis_phase",
            FlowPhase::DeepDive => "deep_dive",
            FlowPhase::RigorousQuestioning => "rigorous_questioning",
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exchanges in idea exploration before challenging starts
const EXPLORATION_LIMIT: u32 = 3;
/// Exchanges in challenging before analysis starts
const CHALLENGE_LIMIT: u32 = 5;

/// Table-driven transition. `general` marks a message with no keyword
/// signal, which moves a fresh conversation into warm-up.
pub fn transition(phase: FlowPhase, intent: Intent, general: bool) -> FlowPhase {
    use FlowPhase as P;
    use Intent as I;

    match (phase, intent) {
        (P::Initial, I::IdeaSubmission) => P::IdeaExploration,
        (P::Initial, _) if general => P::WarmUp,

        (P::WarmUp, I::IdeaSubmission) => P::IdeaExploration,
        (P::WarmUp, I::SeekingChallenge) => P::Challenging,

        (P::IdeaExploration, I::SeekingChallenge) => P::Challenging,
        (P::IdeaExploration, I::RequestingSwot) => P::Analysis,
        (P::IdeaExploration, I::FollowUpDetail) => P::DeepDive,

        (P::Challenging, I::RequestingSwot) => P::Analysis,
        (P::Challenging, I::WantingReframe) => P::Reframing,
        (P::Challenging, I::FollowUpDetail) => P::RigorousQuestioning,

        (P::Analysis, I::CombinationRequest) => P::Synthesis,
        (P::Analysis, I::WantingReframe) => P::Reframing,
        (P::Analysis, I::IdeaSubmission) => P::IdeaExploration,

        (P::Synthesis, I::IdeaSubmission) => P::IdeaExploration,
        (P::Synthesis, I::RequestingSwot) => P::Analysis,

        (P::Reframing, I::IdeaSubmission) => P::IdeaExploration,
        (P::Reframing, I::RequestingSwot) => P::Analysis,
        (P::Reframing, I::CombinationRequest) => P::Synthesis,

        (P::DeepDive, I::SeekingChallenge) => P::Challenging,
        (P::DeepDive, I::RequestingSwot) => P::Analysis,
        (P::DeepDive, I::IdeaSubmission) => P::IdeaExploration,

        (P::RigorousQuestioning, I::RequestingSwot) => P::Analysis,
        (P::RigorousQuestioning, I::WantingReframe) => P::Reframing,
        (P::RigorousQuestioning, I::IdeaSubmission) => P::IdeaExploration,

        (current, _) => current,
    }
}

/// Next phase: table lookup first, then auto-progression by depth.
pub fn next_phase(phase: FlowPhase, intent: Intent, general: bool, exchanges: u32) -> FlowPhase {
    let next = transition(phase, intent, general);
    match phase {
        FlowPhase::IdeaExploration if exchanges >= EXPLORATION_LIMIT => FlowPhase::Challenging,
        FlowPhase::Challenging if exchanges >= CHALLENGE_LIMIT => FlowPhase::Analysis,
        _ => next,
    }
}

/// Named turn inside a phase, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Greet,
    Invite,
    Nudge,
    Acknowledge,
    Clarify,
    ChallengePreview,
    AssumptionChallenge,
    WeaknessProbe,
    AlternativeExplore,
    SwotIntro,
    StrengthAnalysis,
    OpportunitySynthesis,
    FlipPremise,
    ChangeAudience,
    ReframeCheck,
    CombinationIntro,
    FusionStrategy,
    NextSteps,
    Mechanics,
    EdgeCases,
    Metrics,
    Evidence,
    StressTest,
    Verdict,
}

/// The three ordered turns of a phase; `None` for phases without templates.
pub fn turns(phase: FlowPhase) -> Option<[Turn; 3]> {
    use Turn::*;
    match phase {
        FlowPhase::Initial => None,
        FlowPhase::WarmUp => Some([Greet, Invite, Nudge]),
        FlowPhase::IdeaExploration => Some([Acknowledge, Clarify, ChallengePreview]),
        FlowPhase::Challenging => Some([AssumptionChallenge, WeaknessProbe, AlternativeExplore]),
        FlowPhase::Analysis => Some([SwotIntro, StrengthAnalysis, OpportunitySynthesis]),
        FlowPhase::Reframing => Some([FlipPremise, ChangeAudience, ReframeCheck]),
        FlowPhase::Synthesis => Some([CombinationIntro, FusionStrategy, NextSteps]),
        FlowPhase::DeepDive => Some([Mechanics, EdgeCases, Metrics]),
        FlowPhase::RigorousQuestioning => Some([Evidence, StressTest, Verdict]),
    }
}

fn templates(turn: Turn) -> &'static [&'static str] {
    match turn {
        Turn::Greet => &[
            "Good to have you here. What problem has been on your mind lately?",
            "Let's warm up. Is there an everyday frustration you'd love to fix?",
            "Happy to brainstorm with you. What area do you want to explore?",
        ],
        Turn::Invite => &[
            "Share a rough idea, even half-formed, and we'll shape it together.",
            "What's one thing you wish existed in {domain}?",
            "Give me a first draft of an idea and I'll help sharpen it.",
        ],
        Turn::Nudge => &[
            "If you could change one thing about {domain} tomorrow, what would it be?",
            "Think of a tool you use daily. What would make it ten times better?",
            "Who do you know that struggles with {problem_area}? What would help them?",
        ],
        Turn::Acknowledge => &[
            "That's a compelling idea! I can see the potential in {domain}.",
            "Interesting approach to {problem_area}! You're thinking creatively.",
            "I like where you're going with this {concept_type} concept.",
        ],
        Turn::Clarify => &[
            "Help me understand - what specific problem does this solve for users?",
            "Who exactly would benefit most from this solution?",
            "What makes this different from existing approaches?",
        ],
        Turn::ChallengePreview => &[
            "This has strong potential. Ready for me to ask some challenging questions to strengthen it?",
            "I see several opportunities here. Want me to help stress-test the concept?",
            "Let's dig deeper - shall I challenge some assumptions to make this even stronger?",
        ],
        Turn::AssumptionChallenge => &[
            "You're assuming {assumption}. What if that's not true? How would that change your approach?",
            "I notice you believe {belief}. What evidence supports this? What if users behave differently?",
            "What if your target market doesn't want to {action}? What's your backup plan?",
        ],
        Turn::WeaknessProbe => &[
            "What's the biggest weakness in this concept right now?",
            "If this fails, what would be the most likely reason?",
            "What could a competitor do better than your approach?",
        ],
        Turn::AlternativeExplore => &[
            "How else might someone solve this same problem?",
            "What if we approached this from completely different angle - like {alternative_angle}?",
            "Could we achieve similar results with a simpler approach?",
        ],
        Turn::SwotIntro => &[
            "Let's analyze this strategically. I'll break down the strengths, weaknesses, opportunities, and threats:",
            "Time for strategic analysis! Here's how I see the SWOT breakdown:",
            "Let's get analytical. Here's the strategic landscape for your idea:",
        ],
        Turn::StrengthAnalysis => &[
            "Your core strengths are: {strengths}. These give you real competitive advantages.",
            "What's working in your favor: {strengths}. Build on these foundation elements.",
            "Key advantages: {strengths}. These are your differentiators.",
        ],
        Turn::OpportunitySynthesis => &[
            "The biggest opportunity I see: {opportunity}. How might you capitalize on this?",
            "Strategic opportunity: {opportunity}. This could be your breakthrough moment.",
            "Market opening: {opportunity}. Perfect timing to move forward.",
        ],
        Turn::FlipPremise => &[
            "Let's flip it: what if the opposite of {assumption} were true?",
            "Imagine this idea had to work without technology. What remains?",
            "What would this look like as a service instead of a product?",
        ],
        Turn::ChangeAudience => &[
            "Who is the least obvious user of this idea, and what would they need?",
            "How would this change if it were built for {alternative_angle} first?",
            "What if this served businesses instead of individuals, or the reverse?",
        ],
        Turn::ReframeCheck => &[
            "Which framing feels stronger now: the original or the flipped one?",
            "Does the new angle reveal a bigger problem worth solving?",
            "What did the reframe teach you about your core assumption?",
        ],
        Turn::CombinationIntro => &[
            "I see opportunities to combine your ideas in innovative ways:",
            "Let's create something powerful by merging concepts:",
            "Here's how we can synthesize your thinking:",
        ],
        Turn::FusionStrategy => &[
            "Combining {concept1} with {concept2} through {strategy}.",
            "Hybrid approach: {fusion_description} leveraging both concepts.",
            "Cross-pollination strategy: {synthesis_method}.",
        ],
        Turn::NextSteps => &[
            "Which direction excites you most? Let's develop that further.",
            "What aspect should we dive deeper into next?",
            "Ready to explore one of these combinations in detail?",
        ],
        Turn::Mechanics => &[
            "Walk me through how this works step by step, from the user's first touch.",
            "What happens behind the scenes when someone uses {concept_type} features?",
            "Which single piece has to work perfectly for the rest to matter?",
        ],
        Turn::EdgeCases => &[
            "What happens when a user does something you didn't expect?",
            "Where does this break down at ten times the scale?",
            "Which users would find this confusing or unusable?",
        ],
        Turn::Metrics => &[
            "How would you know in three months that this is working?",
            "What number would you watch every week?",
            "What does success look like for {domain} users specifically?",
        ],
        Turn::Evidence => &[
            "What's the strongest evidence that {assumption}?",
            "Have you seen anyone try this before? What happened?",
            "Which claim here would you bet on, and which would you hedge?",
        ],
        Turn::StressTest => &[
            "Suppose your main competitor copies this tomorrow. What's left?",
            "What if funding disappears halfway? Which part survives?",
            "What if the people you need most don't want to {action}?",
        ],
        Turn::Verdict => &[
            "Given all that, what's the one change that makes this idea stronger?",
            "Which weakness would you tackle first?",
            "Is this still the idea you want to pursue, or has a better one emerged?",
        ],
    }
}

/// Values substituted into turn templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowVariables {
    pub domain: String,
    pub concept_type: String,
    pub problem_area: String,
    pub assumption: String,
    pub belief: String,
    pub action: String,
    pub alternative_angle: String,
    pub strengths: String,
    pub opportunity: String,
    pub concept1: String,
    pub concept2: String,
    pub strategy: String,
    pub fusion_description: String,
    pub synthesis_method: String,
}

impl Default for FlowVariables {
    fn default() -> Self {
        Self {
            domain: "this area".to_string(),
            concept_type: "innovative".to_string(),
            problem_area: "user challenges".to_string(),
            assumption: "users will adopt this easily".to_string(),
            belief: "this approach will work".to_string(),
            action: "use this solution".to_string(),
            alternative_angle: "user experience".to_string(),
            strengths: "a clear value proposition".to_string(),
            opportunity: "growing demand for better solutions".to_string(),
            concept1: "your first idea".to_string(),
            concept2: "your second idea".to_string(),
            strategy: "a shared core principle".to_string(),
            fusion_description: "a blend of your strongest ideas".to_string(),
            synthesis_method: "apply one idea's strength to the other's weakness".to_string(),
        }
    }
}

impl FlowVariables {
    fn fill(&self, template: &str) -> String {
        [
            ("{domain}", &self.domain),
            ("{concept_type}", &self.concept_type),
            ("{problem_area}", &self.problem_area),
            ("{assumption}", &self.assumption),
            ("{belief}", &self.belief),
            ("{action}", &self.action),
            ("{alternative_angle}", &self.alternative_angle),
            ("{strengths}", &self.strengths),
            ("{opportunity}", &self.opportunity),
            ("{concept1}", &self.concept1),
            ("{concept2}", &self.concept2),
            ("{strategy}", &self.strategy),
            ("{fusion_description}", &self.fusion_description),
            ("{synthesis_method}", &self.synthesis_method),
        ]
        .iter()
        .fold(template.to_string(), |acc, (key, value)| acc.replace(key, value))
    }
}

/// Filled turn template for `phase` at `exchanges`, `None` if the phase has none.
pub fn turn_response<R: Rng + ?Sized>(
    phase: FlowPhase,
    exchanges: u32,
    vars: &FlowVariables,
    rng: &mut R,
) -> Option<String> {
    let turn = turns(phase)?[(exchanges % 3) as usize];
    let template = templates(turn).choose(rng)?;
    Some(vars.fill(template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_table_transitions() {
        assert_eq!(
            next_phase(FlowPhase::Initial, Intent::IdeaSubmission, false, 0),
            FlowPhase::IdeaExploration
        );
        assert_eq!(
            next_phase(FlowPhase::Initial, Intent::SeekingValidation, true, 0),
            FlowPhase::WarmUp
        );
        assert_eq!(
            next_phase(FlowPhase::Initial, Intent::SeekingValidation, false, 0),
            FlowPhase::Initial
        );
        assert_eq!(
            next_phase(FlowPhase::Analysis, Intent::CombinationRequest, false, 2),
            FlowPhase::Synthesis
        );
        assert_eq!(
            next_phase(FlowPhase::Challenging, Intent::FollowUpDetail, false, 1),
            FlowPhase::RigorousQuestioning
        );
    }

    #[test]
    fn test_unlisted_pairs_self_loop() {
        assert_eq!(
            next_phase(FlowPhase::Synthesis, Intent::AskingQuestions, false, 1),
            FlowPhase::Synthesis
        );
        assert_eq!(
            next_phase(FlowPhase::WarmUp, Intent::FollowUpDetail, true, 1),
            FlowPhase::WarmUp
        );
    }

    #[test]
    fn test_general_flag_only_matters_initially() {
        for phase in FlowPhase::ALL.into_iter().skip(1) {
            for intent in Intent::ALL {
                assert_eq!(
                    next_phase(phase, intent, true, 0),
                    next_phase(phase, intent, false, 0),
                    "{phase}/{intent}"
                );
            }
        }
    }

    #[test]
    fn test_auto_progression_overrides_table() {
        for intent in Intent::ALL {
            assert_eq!(
                next_phase(FlowPhase::IdeaExploration, intent, false, 3),
                FlowPhase::Challenging,
                "{intent}"
            );
            assert_eq!(
                next_phase(FlowPhase::Challenging, intent, false, 5),
                FlowPhase::Analysis,
                "{intent}"
            );
        }
        // below the limit the table applies
        assert_eq!(
            next_phase(FlowPhase::IdeaExploration, Intent::FollowUpDetail, false, 2),
            FlowPhase::DeepDive
        );
    }

    #[test]
    fn test_turn_templates_cycle() {
        let mut rng = StdRng::seed_from_u64(9);
        let vars = FlowVariables::default();
        let clarify = turn_response(FlowPhase::IdeaExploration, 4, &vars, &mut rng).unwrap();
        assert!(templates(Turn::Clarify).contains(&clarify.as_str()));
        assert!(turn_response(FlowPhase::Initial, 0, &vars, &mut rng).is_none());
    }

    #[test]
    fn test_all_placeholders_filled() {
        let mut rng = StdRng::seed_from_u64(4);
        let vars = FlowVariables::default();
        for phase in FlowPhase::ALL {
            for exchanges in 0..30 {
                if let Some(text) = turn_response(phase, exchanges, &vars, &mut rng) {
                    assert!(!text.contains('{'), "{phase}: {text}");
                }
            }
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&FlowPhase::Challenging).unwrap(),
            "\"challenging_phase\""
        );
        assert_eq!(
            serde_json::from_str::<FlowPhase>("\"deep_dive\"").unwrap(),
            FlowPhase::DeepDive
        );
    }
}
