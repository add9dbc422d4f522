use thiserror::Error;

/// Errors from data source and repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}
