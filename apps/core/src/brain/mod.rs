//! # Brain Module
//!
//! Keyword heuristics behind every idea-level analysis. All components are
//! pure: same text in, same result out (randomized generators take the RNG
//! as an argument).
//!
//! ## Components
//! - `keywords`: tokenization and the ordered keyword tables
//! - `analyzer`: text features (words, domain hits, richness, complexity)
//! - `embedding`: deterministic feature and hashed embeddings
//! - `diversity`: standalone and relative diversity scoring
//! - `swot`: rule-based SWOT generation
//! - `questions`: Socratic question templates
//! - `sentiment`: sentiment and reply tone
//! - `combinations`: principle extraction and fusion strategies
//! - `variations`: word association and reverse brainstorming

pub mod analyzer;
pub mod combinations;
pub mod diversity;
pub mod embedding;
pub mod keywords;
pub mod questions;
pub mod sentiment;
pub mod swot;
pub mod variations;

pub use diversity::{
    CollectionMetrics, DiversityLevel, DiversityScorer, RelativeDiversity, StandaloneDiversity,
};
pub use questions::QuestionGenerator;
pub use sentiment::{Sentiment, SentimentAnalyzer, SentimentReport, Tone};
pub use swot::{SwotAnalysis, SwotGenerator};
