//! Repository error types and helpers shared by the Record Store.

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// SQLSTATE class for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Map a unique-constraint breach onto a field-specific conflict message.
///
/// Any other database error passes through unchanged.
pub(crate) fn map_unique_violation(err: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let message = match db_err.constraint() {
                Some("users_email_key") => "The email has already been taken.",
                Some("users_contact_no_key") => "The contact number has already been taken.",
                _ => "The record already exists.",
            };
            return RepositoryError::Conflict(message.to_string());
        }
    }
    RepositoryError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_passes_through() {
        let err = map_unique_violation(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
