//! Error type shared by the repositories.

use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

use dealscope_shared::AppError;

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name, e.g. `Company`.
        entity: &'static str,
        /// Requested ID.
        id: Uuid,
    },

    /// A referenced row (company, lead, user) does not exist.
    #[error("{entity} does not exist: {id}")]
    InvalidReference {
        /// Referenced entity name.
        entity: &'static str,
        /// Referenced ID.
        id: Uuid,
    },

    /// Unique constraint violated.
    #[error("{0}")]
    Conflict(String),

    /// Input rejected before reaching the database.
    #[error("{0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    /// Shorthand for [`RepositoryError::NotFound`].
    #[must_use]
    pub const fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Maps unique violations to [`RepositoryError::Conflict`], keeping other errors as-is.
    pub(crate) fn from_write(err: DbErr, conflict: impl FnOnce() -> String) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(conflict()),
            _ => Self::Database(err),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepositoryError::InvalidReference { .. } | RepositoryError::Validation(_) => {
                Self::Validation(err.to_string())
            }
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err: AppError = RepositoryError::not_found("Company", Uuid::nil()).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.to_string(),
            "Not found: Company not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_invalid_reference_maps_to_400() {
        let err: AppError = RepositoryError::InvalidReference {
            entity: "Company",
            id: Uuid::nil(),
        }
        .into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_conflict_keeps_message() {
        let err: AppError = RepositoryError::Conflict("Tag 'fintech' already exists".into()).into();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.to_string(), "Conflict: Tag 'fintech' already exists");
    }

    #[test]
    fn test_database_error_is_internal() {
        let err: AppError = RepositoryError::Database(DbErr::Custom("pool closed".into())).into();
        assert!(err.is_internal());
    }
}
