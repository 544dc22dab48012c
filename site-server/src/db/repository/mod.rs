//! Repository Module
//!
//! CRUD primitives over the SQLite pool, one module per table.
//! All repositories are free functions taking `&SqlitePool` and
//! returning [`RepoResult`].

pub mod cart;
pub mod meal;
pub mod reservation;
pub mod restaurant;
pub mod restaurant_meal;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err
            && db.is_unique_violation()
        {
            return RepoError::Duplicate(db.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
