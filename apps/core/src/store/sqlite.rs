use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::{ConversationStore, IdeaStore};
use crate::conversation::ConversationState;
use crate::error::AppError;
use crate::models::{Idea, NewIdea};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open (creating if missing) the sqlite database and apply the schema.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ideas (
            id INTEGER PRIMARY KEY,
            idea_text TEXT NOT NULL,
            user_id TEXT NOT NULL,
            timestamp DATETIME NOT NULL,
            diversity_score REAL NOT NULL
        );
        CREATE TABLE IF NOT EXISTS conversations (
            user_id TEXT PRIMARY KEY,
            state JSON NOT NULL,
            updated_at DATETIME NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

pub struct SqliteIdeaStore {
    pool: SqlitePool,
}

impl SqliteIdeaStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeaStore for SqliteIdeaStore {
    async fn insert(&self, idea: NewIdea) -> Result<Idea, AppError> {
        // Ids mirror list positions, so the next id is the current row count.
        let idea = sqlx::query_as::<_, Idea>(
            r#"
            INSERT INTO ideas (id, idea_text, user_id, timestamp, diversity_score)
            VALUES ((SELECT COUNT(*) FROM ideas), ?, ?, ?, ?)
            RETURNING id, idea_text, user_id, timestamp, diversity_score
            "#,
        )
        .bind(&idea.idea_text)
        .bind(&idea.user_id)
        .bind(idea.timestamp)
        .bind(idea.diversity_score)
        .fetch_one(&self.pool)
        .await?;
        Ok(idea)
    }

    async fn get(&self, id: i64) -> Result<Option<Idea>, AppError> {
        let idea = sqlx::query_as::<_, Idea>(
            r#"
            SELECT id, idea_text, user_id, timestamp, diversity_score
            FROM ideas
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(idea)
    }

    async fn list(&self) -> Result<Vec<Idea>, AppError> {
        let ideas = sqlx::query_as::<_, Idea>(
            r#"
            SELECT id, idea_text, user_id, timestamp, diversity_score
            FROM ideas
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ideas)
    }

    async fn count(&self) -> Result<usize, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ideas")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}

pub struct SqliteConversationStore {
    pool: SqlitePool,
}

impl SqliteConversationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn load(&self, user_id: &str) -> Result<Option<ConversationState>, AppError> {
        let row: Option<(Json<ConversationState>,)> =
            sqlx::query_as("SELECT state FROM conversations WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(state,)| state.0))
    }

    async fn save(&self, state: &ConversationState) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO conversations (user_id, state, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at
            "#,
        )
        .bind(&state.user_id)
        .bind(Json(state))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM conversations WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}
