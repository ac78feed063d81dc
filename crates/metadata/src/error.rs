//! Metadata store error types.

use thiserror::Error;

/// Metadata store operation errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl MetadataError {
    /// Classify a sqlx error, turning unique index violations into
    /// [`MetadataError::Constraint`].
    ///
    /// The unique indexes are the source of truth for uniqueness; the
    /// repository pre-checks are only an early exit. A pre-check race loses
    /// here and must surface as a conflict rather than an internal error.
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.message().contains("UNIQUE constraint")
        {
            return MetadataError::Constraint(format!("{what}: {}", db_err.message()));
        }
        MetadataError::Database(err)
    }
}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        MetadataError::Config(format!("failed to prepare database path: {err}"))
    }
}

/// Result type for metadata operations.
pub type MetadataResult<T> = std::result::Result<T, MetadataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_pass_through() {
        let err = MetadataError::from_write(sqlx::Error::RowNotFound, "task list");
        assert!(matches!(err, MetadataError::Database(_)));
    }
}
