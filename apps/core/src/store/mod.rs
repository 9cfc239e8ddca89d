//! Idea and conversation persistence.
//!
//! Two interchangeable backends behind the same traits: guarded in-memory
//! collections, and sqlite through `sqlx`. [`connect`] picks one from the
//! configured database URL and never fails: an unreachable database
//! degrades to memory with status `disconnected`.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::conversation::ConversationState;
use crate::error::AppError;
use crate::models::{Idea, NewIdea};

pub use memory::{MemoryConversationStore, MemoryIdeaStore};
pub use sqlite::{SqliteConversationStore, SqliteIdeaStore};

/// Append-only idea storage. Ids are assigned in insertion order from 0.
#[async_trait]
pub trait IdeaStore: Send + Sync + 'static {
    async fn insert(&self, idea: NewIdea) -> Result<Idea, AppError>;
    async fn get(&self, id: i64) -> Result<Option<Idea>, AppError>;
    /// All ideas in id order.
    async fn list(&self) -> Result<Vec<Idea>, AppError>;
    async fn count(&self) -> Result<usize, AppError>;
}

/// Per-user conversation state storage.
#[async_trait]
pub trait ConversationStore: Send + Sync + 'static {
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, AppError>;
    async fn save(&self, state: &ConversationState) -> Result<(), AppError>;
    /// Returns whether a conversation existed.
    async fn remove(&self, user_id: &str) -> Result<bool, AppError>;
    async fn count(&self) -> Result<usize, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    /// No database configured.
    InMemory,
    Connected,
    /// Configured but unreachable at startup; running in memory.
    Disconnected,
}

/// The selected backends.
#[derive(Clone)]
pub struct Stores {
    pub ideas: Arc<dyn IdeaStore>,
    pub conversations: Arc<dyn ConversationStore>,
    pub status: DatabaseStatus,
}

impl Stores {
    pub fn in_memory(max_conversations: usize, status: DatabaseStatus) -> Self {
        Self {
            ideas: Arc::new(MemoryIdeaStore::new()),
            conversations: Arc::new(MemoryConversationStore::new(max_conversations)),
            status,
        }
    }
}

/// Open the configured backend.
pub async fn connect(database_url: Option<&str>, max_conversations: usize) -> Stores {
    let Some(url) = database_url else {
        info!("No DATABASE_URL configured, using in-memory stores");
        return Stores::in_memory(max_conversations, DatabaseStatus::InMemory);
    };

    match sqlite::init_db(url).await {
        Ok(pool) => {
            info!("Database connected");
            Stores {
                ideas: Arc::new(SqliteIdeaStore::new(pool.clone())),
                conversations: Arc::new(SqliteConversationStore::new(pool)),
                status: DatabaseStatus::Connected,
            }
        }
        Err(e) => {
            warn!(error = %e, "Database unreachable, falling back to in-memory stores");
            Stores::in_memory(max_conversations, DatabaseStatus::Disconnected)
        }
    }
}
