//! Conversation Module Tests
//!
//! Whole turns through the engine: phase walks, enrichment of replies and
//! reply variety.

use std::sync::Arc;

use crate::conversation::{ConversationEngine, FlowPhase, Intent};
use crate::events::EventHub;
use crate::ideation::IdeaService;
use crate::store::{MemoryConversationStore, MemoryIdeaStore};

fn setup() -> (Arc<IdeaService>, ConversationEngine) {
    let ideas = Arc::new(IdeaService::new(
        Arc::new(MemoryIdeaStore::new()),
        EventHub::new(),
        Some(7),
    ));
    let engine = ConversationEngine::new(
        Arc::new(MemoryConversationStore::new(32)),
        ideas.clone(),
        8,
        Some(8),
    );
    (ideas, engine)
}

#[cfg(test)]
mod flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_free_messages_walk_the_phases() {
        let (_, engine) = setup();
        let expected = [
            (Intent::SeekingValidation, FlowPhase::WarmUp),
            (Intent::SeekingChallenge, FlowPhase::Challenging),
            (Intent::RequestingSwot, FlowPhase::Analysis),
            (Intent::CombinationRequest, FlowPhase::Synthesis),
        ];
        for (i, (intent, phase)) in expected.into_iter().enumerate() {
            let turn = engine.process_turn("walker", "ok").await.unwrap();
            assert_eq!(turn.intent, intent, "turn {}", i);
            assert_eq!(turn.conversation_flow, phase, "turn {}", i);
            assert_eq!(turn.context_insights.total_exchanges, i as u32);
        }
    }

    #[tokio::test]
    async fn test_conversations_are_independent() {
        let (_, engine) = setup();
        engine.process_turn("first", "ok").await.unwrap();
        engine.process_turn("first", "ok").await.unwrap();

        let turn = engine.process_turn("second", "ok").await.unwrap();
        assert_eq!(turn.conversation_flow, FlowPhase::WarmUp);
        assert_eq!(turn.context_insights.total_exchanges, 0);
        assert_eq!(engine.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_history_reports_current_phase() {
        let (_, engine) = setup();
        engine
            .process_turn("hist", "I have an idea: a platform for tool sharing")
            .await
            .unwrap();
        let history = engine.history("hist").await.unwrap();
        assert_eq!(history.conversation_flow, FlowPhase::IdeaExploration);
        assert_eq!(history.message_count, 2);
    }
}

#[cfg(test)]
mod reply_tests {
    use super::*;

    #[tokio::test]
    async fn test_swot_request_adds_key_insight() {
        let (ideas, engine) = setup();
        ideas
            .submit("A mobile app for community recycling", "alice")
            .await
            .unwrap();

        let turn = engine
            .process_turn("bob", "Please list the swot strengths and weaknesses")
            .await
            .unwrap();
        assert_eq!(turn.intent, Intent::RequestingSwot);
        assert!(turn.response.contains("**Key Insight:**"), "{}", turn.response);
        assert!(turn.idea_id.is_none());
    }

    #[tokio::test]
    async fn test_combination_request_adds_top_fusion() {
        let (ideas, engine) = setup();
        ideas.submit("A mobile app for community recycling", "alice").await.unwrap();
        ideas.submit("Solar powered bus stops", "carol").await.unwrap();

        let turn = engine
            .process_turn("bob", "combine and merge the last two together")
            .await
            .unwrap();
        assert_eq!(turn.intent, Intent::CombinationRequest);
        assert!(turn.response.contains("**Top Fusion:**"), "{}", turn.response);
    }

    #[tokio::test]
    async fn test_combination_without_ideas_has_no_fusion() {
        let (_, engine) = setup();
        let turn = engine
            .process_turn("bob", "combine and merge the last two together")
            .await
            .unwrap();
        assert!(!turn.response.contains("**Top Fusion:**"));
    }

    #[tokio::test]
    async fn test_idea_turn_is_listed_with_ideas() {
        let (ideas, engine) = setup();
        let turn = engine
            .process_turn("dana", "I have an idea: an app that lends garden tools")
            .await
            .unwrap();
        let listed = ideas.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(Some(listed[0].id), turn.idea_id);
        assert_eq!(listed[0].user_id, "dana");
    }

    #[tokio::test]
    async fn test_consecutive_replies_differ() {
        let (_, engine) = setup();
        let mut previous = String::new();
        for _ in 0..4 {
            let turn = engine
                .process_turn("echo", "what do you think about a recycling app")
                .await
                .unwrap();
            assert_ne!(turn.response, previous);
            previous = turn.response;
        }
    }
}
