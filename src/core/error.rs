use thiserror::Error;

/// Centralized error types for the application
///
/// Every fallible operation in the bot converges on this enum. Handlers
/// catch it at the dispatch boundary and turn it into a chat reply via
/// [`AppError::user_message`]; nothing propagates far enough to kill the
/// process.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP transport errors (connect failures, timeouts)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from an external service
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad user input (empty text, non-numeric id, invalid city name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A requested entity does not exist for this user
    #[error("Not found: {0}")]
    NotFound(String),

    /// No region snapshot has been persisted yet
    #[error("Region snapshot is not loaded")]
    SnapshotMissing,

    /// Persisted data no longer matches what a session expects
    #[error("Data inconsistency: {0}")]
    DataInconsistency(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True for errors caused by an unreachable or misbehaving upstream,
    /// where retrying the same input later can succeed.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::Http(_) | AppError::HttpStatus(_))
    }

    /// Renders the user-facing reply for this error.
    ///
    /// This is the single place error text for chat messages comes from;
    /// handlers never format errors themselves.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http(e) => format!("Ошибка при получении данных: {}. Попробуйте ещё раз.", e),
            AppError::HttpStatus(status) => format!("Ошибка API: {}. Попробуйте ещё раз позже.", status.as_u16()),
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::SnapshotMissing | AppError::DataInconsistency(_) => {
                "Данные о регионах устарели или отсутствуют. Нажмите «✏️ Изменить регион», чтобы загрузить их заново."
                    .to_string()
            }
            AppError::Database(_) | AppError::DatabasePool(_) | AppError::Io(_) | AppError::Json(_) => {
                "Внутренняя ошибка. Попробуйте ещё раз.".to_string()
            }
            AppError::Telegram(e) => format!("Ошибка Telegram: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(AppError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY).is_upstream());
        assert!(!AppError::Validation("x".into()).is_upstream());
        assert!(!AppError::SnapshotMissing.is_upstream());
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = AppError::Validation("ID плана должен быть числом.".into());
        assert_eq!(err.user_message(), "ID плана должен быть числом.");
    }

    #[test]
    fn test_snapshot_errors_advise_reset() {
        assert!(AppError::SnapshotMissing.user_message().contains("Изменить регион"));
        assert!(AppError::DataInconsistency("stale".into())
            .user_message()
            .contains("Изменить регион"));
    }
}
