//! Idea submission and analysis service.
//!
//! Owns the idea store handle, the event hub and the active-user set. Every
//! REST operation on ideas and every chat enrichment that touches stored
//! ideas goes through here.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, instrument};

use crate::brain::combinations;
use crate::brain::variations::{self, VariationSet};
use crate::brain::{
    CollectionMetrics, DiversityScorer, QuestionGenerator, RelativeDiversity, StandaloneDiversity,
    SwotAnalysis, SwotGenerator,
};
use crate::error::AppError;
use crate::events::{EventHub, ServerEvent};
use crate::models::{Idea, NewIdea};
use crate::store::IdeaStore;

/// Questions attached to a submitted idea
const SUBMISSION_QUESTIONS: usize = 3;
/// Questions attached to a SWOT report
const STRATEGIC_QUESTIONS: usize = 5;

/// A stored idea with its analysis
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub idea: Idea,
    pub diversity: RelativeDiversity,
    pub questions: Vec<String>,
    pub swot: SwotAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiversityReport {
    pub idea: Idea,
    pub diversity_analysis: RelativeDiversity,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombinationReport {
    pub combinations: Vec<String>,
    pub idea1: String,
    pub idea2: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwotReport {
    pub idea_text: String,
    pub swot: SwotAnalysis,
    pub strategic_questions: Vec<String>,
    pub diversity_metrics: StandaloneDiversity,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdeaStats {
    pub total_ideas: usize,
    /// Mean of the stored per-idea diversity scores
    pub average_diversity: f32,
    pub collection: CollectionMetrics,
}

pub struct IdeaService {
    store: Arc<dyn IdeaStore>,
    events: EventHub,
    /// Open connections per username
    active_users: tokio::sync::Mutex<BTreeMap<String, usize>>,
    rng: Mutex<StdRng>,
    scorer: DiversityScorer,
    swot: SwotGenerator,
    questions: QuestionGenerator,
}

impl IdeaService {
    pub fn new(store: Arc<dyn IdeaStore>, events: EventHub, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            events,
            active_users: tokio::sync::Mutex::new(BTreeMap::new()),
            rng: Mutex::new(rng),
            scorer: DiversityScorer::new(),
            swot: SwotGenerator::new(),
            questions: QuestionGenerator::new(),
        }
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    fn generate_questions(&self, text: &str, count: usize) -> Vec<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.questions.generate(text, count, &mut *rng)
    }

    /// Score against every stored idea, store, analyze and broadcast.
    #[instrument(skip(self, idea_text), fields(chars = idea_text.chars().count()))]
    pub async fn submit(&self, idea_text: &str, user_id: &str) -> Result<Submission, AppError> {
        let prior: Vec<String> = self.store.list().await?.into_iter().map(|i| i.idea_text).collect();
        let diversity = self.scorer.relative(idea_text, &prior);

        let idea = self
            .store
            .insert(NewIdea::new(idea_text, user_id, diversity.combined_diversity))
            .await?;
        info!(id = idea.id, level = ?diversity.diversity_level, "Idea stored");

        let questions = self.generate_questions(idea_text, SUBMISSION_QUESTIONS);
        let swot = self.swot.analyze(idea_text);

        self.events.publish(ServerEvent::NewIdea {
            idea: idea.clone(),
            diversity_metrics: diversity.clone(),
        });
        let mut texts = prior;
        texts.push(idea.idea_text.clone());
        self.events.publish(ServerEvent::DiversityUpdate {
            metrics: self.scorer.collection(&texts),
        });

        Ok(Submission {
            idea,
            diversity,
            questions,
            swot,
        })
    }

    pub async fn list(&self) -> Result<Vec<Idea>, AppError> {
        self.store.list().await
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        self.store.count().await
    }

    pub async fn get(&self, id: i64) -> Result<Idea, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Idea not found".to_string()))
    }

    /// The `n` most recent ideas, oldest first
    pub async fn latest(&self, n: usize) -> Result<Vec<Idea>, AppError> {
        let ideas = self.store.list().await?;
        let start = ideas.len().saturating_sub(n);
        Ok(ideas[start..].to_vec())
    }

    /// Relative diversity of a stored idea against all the others.
    pub async fn analyze_diversity(&self, id: i64) -> Result<DiversityReport, AppError> {
        let ideas = self.store.list().await?;
        let idea = ideas
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Idea not found".to_string()))?;
        let others: Vec<&str> = ideas
            .iter()
            .filter(|i| i.id != id)
            .map(|i| i.idea_text.as_str())
            .collect();
        let diversity_analysis = self.scorer.relative(&idea.idea_text, &others);
        Ok(DiversityReport {
            idea,
            diversity_analysis,
        })
    }

    pub async fn combinations(&self, first: i64, second: i64) -> Result<CombinationReport, AppError> {
        let idea1 = self.get(first).await?;
        let idea2 = self.get(second).await?;
        Ok(CombinationReport {
            combinations: combinations::generate_combinations(&idea1.idea_text, &idea2.idea_text),
            idea1: idea1.idea_text,
            idea2: idea2.idea_text,
        })
    }

    /// SWOT, strategic questions and standalone metrics for unsaved text.
    pub fn swot_report(&self, idea_text: &str) -> SwotReport {
        let idea_text = idea_text.trim();
        SwotReport {
            idea_text: idea_text.to_string(),
            swot: self.swot.analyze(idea_text),
            strategic_questions: self.generate_questions(idea_text, STRATEGIC_QUESTIONS),
            diversity_metrics: self.scorer.standalone(idea_text),
        }
    }

    pub fn swot(&self, idea_text: &str) -> SwotAnalysis {
        self.swot.analyze(idea_text)
    }

    pub fn variations(&self, idea_text: &str) -> VariationSet {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        variations::generate_variations(idea_text, &mut *rng)
    }

    pub async fn stats(&self) -> Result<IdeaStats, AppError> {
        let ideas = self.store.list().await?;
        let average_diversity = if ideas.is_empty() {
            0.0
        } else {
            ideas.iter().map(|i| i.diversity_score).sum::<f32>() / ideas.len() as f32
        };
        let texts: Vec<&str> = ideas.iter().map(|i| i.idea_text.as_str()).collect();
        Ok(IdeaStats {
            total_ideas: ideas.len(),
            average_diversity: crate::brain::diversity::round3(average_diversity),
            collection: self.scorer.collection(&texts),
        })
    }

    /// Count a connection for `username` and announce it.
    #[instrument(skip(self))]
    pub async fn register_user(&self, username: &str) -> Vec<String> {
        let active_users: Vec<String> = {
            let mut users = self.active_users.lock().await;
            *users.entry(username.to_string()).or_insert(0) += 1;
            users.keys().cloned().collect()
        };
        self.events.publish(ServerEvent::UserJoined {
            username: username.to_string(),
            active_users: active_users.clone(),
        });
        active_users
    }

    /// Drop one connection; the user stays active until the last one closes.
    pub async fn unregister_user(&self, username: &str) {
        let mut users = self.active_users.lock().await;
        if let Some(count) = users.get_mut(username) {
            *count -= 1;
            if *count == 0 {
                users.remove(username);
            }
        }
    }

    pub async fn active_users(&self) -> Vec<String> {
        self.active_users.lock().await.keys().cloned().collect()
    }

    /// Snapshot sent to a newly connected socket
    pub async fn initial_state(&self) -> Result<ServerEvent, AppError> {
        let ideas = self.store.list().await?;
        let texts: Vec<&str> = ideas.iter().map(|i| i.idea_text.as_str()).collect();
        let diversity_metrics = self.scorer.collection(&texts);
        Ok(ServerEvent::InitialState {
            ideas,
            active_users: self.active_users().await,
            diversity_metrics,
        })
    }
}
