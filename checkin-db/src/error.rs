//! Storage error types

use checkin_core::CheckinError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

impl From<StoreError> for CheckinError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => CheckinError::NotFound(what),
            other => CheckinError::Unavailable(other.to_string()),
        }
    }
}
