//! Error types for the Campus API.
//!
//! ```text
//! ValidationError ─┐
//! DbError ─────────┴─► ServiceError ──► ApiError ──► { "code", "message" }
//! ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_core::ValidationError;
use campus_db::DbError;
use serde::{Deserialize, Serialize};
use tracing::error;

// =============================================================================
// Service Error
// =============================================================================

/// Errors returned by the service layer.
///
/// The first three variants are domain outcomes the caller can act on.
/// `Storage` means the effect of the operation is unknown.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A point of sale named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Storage failure: {0}")]
    Storage(DbError),
}

impl ServiceError {
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } if field == "name" => {
                ServiceError::DuplicateName { name: value }
            }
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, key: id },
            other => ServiceError::Storage(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// API Error
// =============================================================================

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    DuplicateName,
    StorageError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DuplicateName => StatusCode::CONFLICT,
            ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,

    /// Offending input field, for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => ApiError {
                code: ErrorCode::ValidationError,
                field: Some(e.field().to_string()),
                message: e.to_string(),
            },
            ServiceError::DuplicateName { .. } => {
                ApiError::new(ErrorCode::DuplicateName, err.to_string())
            }
            ServiceError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            ServiceError::Storage(e) => {
                error!(error = %e, "Storage failure while handling request");
                ApiError::new(ErrorCode::StorageError, "Internal storage error")
            }
        }
    }
}

// Malformed requests never reach the service.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::ValidationError, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(ErrorCode::ValidationError, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(ErrorCode::ValidationError, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
