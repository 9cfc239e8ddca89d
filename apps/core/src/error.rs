use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::io;
use thiserror::Error;
use tracing::error;

/// Static message returned when the backing store cannot be reached.
pub const STORE_UNAVAILABLE: &str = "Database not available";

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty required fields. Carries a static, client-facing message.
    #[error("{0}")]
    Validation(String),

    /// A referenced idea or conversation does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A dependency (usually the database) is unreachable.
    #[error("{0}")]
    Unavailable(String),

    /// Represents errors originating from the database, typically from `sqlx`.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors talking to the external prompt provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored state that failed to (de)serialize.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Pool and transport failures mean the store is unreachable rather than broken.
fn is_connectivity(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_connectivity(&err) {
            AppError::Unavailable(STORE_UNAVAILABLE.to_string())
        } else {
            AppError::Database(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("idea_text is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("Idea not found".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(sqlx::Error::PoolTimedOut).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_connectivity_errors_become_unavailable() {
        for err in [sqlx::Error::PoolClosed, sqlx::Error::PoolTimedOut] {
            match AppError::from(err) {
                AppError::Unavailable(message) => assert_eq!(message, STORE_UNAVAILABLE),
                other => panic!("expected Unavailable, got {:?}", other),
            }
        }
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::Validation("Message is required".into()).to_string(),
            "Message is required"
        );
        assert_eq!(AppError::from(sqlx::Error::PoolClosed).to_string(), STORE_UNAVAILABLE);
        assert_eq!(AppError::Internal("boom".into()).to_string(), "Internal error: boom");
    }

    #[tokio::test]
    async fn test_unavailable_response_body() {
        let (status, body) = render(AppError::from(sqlx::Error::PoolClosed)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], STORE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_internal_response_carries_error_text() {
        let (status, body) = render(AppError::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal error: boom");
    }
}
