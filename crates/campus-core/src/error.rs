//! # Error Types
//!
//! Domain-specific error types for campus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  campus-core errors (this file)                                        │
//! │  └── ValidationError  - Malformed caller input                         │
//! │                                                                         │
//! │  campus-db errors (separate crate)                                     │
//! │  └── DbError          - Storage failures, NotFound, UniqueViolation    │
//! │                                                                         │
//! │  campus-api errors (app)                                               │
//! │  ├── ServiceError     - Validation / DuplicateName / NotFound / Storage│
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        DbError ─────────┴─► ServiceError → ApiError → Client           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant names the offending field so a caller can correct it.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet the structural rules
/// of a Point of Sale. They are never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. wrong number of postal code digits).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not a member of a closed enumeration.
    #[error("{field} must be one of: {allowed:?}, got '{value}'")]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// The identifier in the payload disagrees with the addressed record.
    ///
    /// ## When This Occurs
    /// - `create` with a caller-chosen id
    /// - `update` where the body id differs from the target id
    #[error("id {given} does not match expected {expected}")]
    IdentifierMismatch {
        expected: String,
        given: String,
    },
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a `TooLong` error for the given field.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
            ValidationError::IdentifierMismatch { .. } => "id",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
