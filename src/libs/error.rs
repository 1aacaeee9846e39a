//! Error taxonomy shared by the models, the store and the controllers.
//!
//! Two families exist:
//!
//! - [`ValidationError`] is raised while building or mutating a model. It always
//!   reaches the caller and names the offending field.
//! - [`StoreError`] comes from the SQLite layer. Controllers turn it into a
//!   pass/fail signal for writes, reads return it as-is so corrupted rows are
//!   never silently replaced by a default. Repositories re-check update
//!   requests and report a failed check as [`StoreError::Validation`].
//!
//! A missing row is neither: lookups return `Ok(None)`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Priority must be 1, 2 or 3, got {0}")]
    InvalidPriority(String),

    #[error("Invalid value for {field}: `{value}` is not a date (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Invalid value for {field}: `{value}`")]
    InvalidValue { field: &'static str, value: String },

    #[error("Unknown field `{field}` for {entity}")]
    UnknownField { entity: &'static str, field: String },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidEmail(_) => "email",
            Self::InvalidRole(_) => "role",
            Self::InvalidStatus(_) => "status",
            Self::EmptyTitle => "title",
            Self::InvalidPriority(_) => "priority",
            Self::InvalidTimestamp { field, .. } | Self::InvalidValue { field, .. } => field,
            Self::UnknownField { field, .. } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed timestamp `{value}` in {table}.{column}")]
    MalformedTimestamp {
        table: &'static str,
        column: &'static str,
        value: String,
    },

    #[error("Invalid persisted data in {table}.{column}: {message}")]
    InvalidData {
        table: &'static str,
        column: &'static str,
        message: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_name_their_field() {
        assert_eq!(ValidationError::InvalidEmail("x".into()).field(), "email");
        assert_eq!(ValidationError::EmptyTitle.field(), "title");
        assert_eq!(
            ValidationError::InvalidTimestamp {
                field: "due_date",
                value: "tomorrow".into()
            }
            .field(),
            "due_date"
        );
        assert_eq!(
            ValidationError::UnknownField {
                entity: "task",
                field: "colour".into()
            }
            .field(),
            "colour"
        );
    }
}
