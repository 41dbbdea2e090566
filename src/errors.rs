//! Domain failure taxonomy shared by the data-access layer and the API.

use axum::http::StatusCode;

/// Typed failures raised as soon as detected; translated to HTTP exactly
/// once, at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Authorization(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// Store failure. The payload is the raw store message, logged
    /// server-side, never returned to the client.
    #[error("database failure: {0}")]
    Database(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Authorization(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to place in the response envelope. Store and internal
    /// details are replaced with a generic message.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::Database(_) => "Database operation failed".to_string(),
            ServiceError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::Database(err.to_string())
    }
}

impl From<crate::db::DatabaseError> for ServiceError {
    fn from(err: crate::db::DatabaseError) -> Self {
        ServiceError::Database(err.to_string())
    }
}
