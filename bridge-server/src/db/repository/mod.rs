//! Repository Module
//!
//! Provides CRUD operations for the lists and members tables. Repositories
//! are free functions over a `&SqlitePool`; structured columns (contact,
//! campaign defaults, location, tags) are serialized to JSON TEXT here, at
//! the storage boundary.

pub mod list;
pub mod member;

use shared::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt column data: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Corrupt(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Database(msg) | RepoError::Corrupt(msg) => AppError::database(msg),
        }
    }
}

/// Repository-level Result type
pub type RepoResult<T> = Result<T, RepoError>;
