use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::{Mutex, RwLock};

use super::{ConversationStore, IdeaStore};
use crate::conversation::ConversationState;
use crate::error::AppError;
use crate::models::{Idea, NewIdea};

/// Ideas kept in a vector; the index is the id.
#[derive(Default)]
pub struct MemoryIdeaStore {
    ideas: RwLock<Vec<Idea>>,
}

impl MemoryIdeaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdeaStore for MemoryIdeaStore {
    async fn insert(&self, idea: NewIdea) -> Result<Idea, AppError> {
        let mut ideas = self.ideas.write().await;
        let idea = idea.into_idea(ideas.len() as i64);
        ideas.push(idea.clone());
        Ok(idea)
    }

    async fn get(&self, id: i64) -> Result<Option<Idea>, AppError> {
        let ideas = self.ideas.read().await;
        Ok(usize::try_from(id).ok().and_then(|i| ideas.get(i)).cloned())
    }

    async fn list(&self) -> Result<Vec<Idea>, AppError> {
        Ok(self.ideas.read().await.clone())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.ideas.read().await.len())
    }
}

/// Conversations in an LRU cache; least recently used users are evicted.
pub struct MemoryConversationStore {
    conversations: Mutex<LruCache<String, ConversationState>>,
}

impl MemoryConversationStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            conversations: Mutex::new(LruCache::new(capacity)),
        }
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, AppError> {
        Ok(self.conversations.lock().await.get(user_id).cloned())
    }

    async fn save(&self, state: &ConversationState) -> Result<(), AppError> {
        self.conversations
            .lock()
            .await
            .put(state.user_id.clone(), state.clone());
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self.conversations.lock().await.pop(user_id).is_some())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.conversations.lock().await.len())
    }
}
