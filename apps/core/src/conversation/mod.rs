//! # Conversation Module
//!
//! The chat side of the service. A turn flows through:
//! 1. `memory`: load the user's state and take a context snapshot
//! 2. `intent`: classify the message against the snapshot
//! 3. `flow`: advance the phase (table lookup, then auto-progression)
//! 4. `composer`: build the reply and run the tone, personality and
//!    repetition filters
//!
//! `engine` ties these together and persists the state.

pub mod composer;
pub mod engine;
pub mod flow;
pub mod intent;
pub mod memory;

pub use engine::{ChatTurn, ConversationEngine, ConversationHistory};
pub use flow::FlowPhase;
pub use intent::Intent;
pub use memory::{ConversationState, Sender};
