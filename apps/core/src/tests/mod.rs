//! Test Module
//!
//! Crate-level test suite for the Kaleidoscope backend.
//!
//! ## Test Categories
//! - `brain_tests`: diversity grading, determinism, SWOT and combination properties
//! - `conversation_tests`: intent ranking, flow progression, reply variety
//! - `store_tests`: sqlite and in-memory persistence, backend selection
//! - `api_tests`: HTTP endpoints end to end
//! - `prompts_tests`: external prompt provider and its fallback
//! - `config_tests`: environment configuration

pub mod brain_tests;
pub mod config_tests;
pub mod conversation_tests;
