//! Database error types.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Underlying SQLx failure (connection, query, decode).
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An insert collided with an existing record.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },
}

impl DatabaseError {
    /// Classify an insert failure: unique-constraint violations become
    /// [`DatabaseError::AlreadyExists`], everything else stays
    /// [`DatabaseError::Sqlx`].
    ///
    /// Used by the inserts whose tables carry a UNIQUE constraint
    /// (user email, workspace membership, bookmark pair).
    pub(crate) fn insert_conflict(
        err: sqlx::Error,
        entity: &'static str,
        id: impl Into<String>,
    ) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity,
                    id: id.into(),
                };
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
