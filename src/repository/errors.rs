use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Failed to check out a connection from the pool.
    #[error("database connection error: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    /// Underlying Diesel/SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A stored row violated a domain constraint while being converted.
    #[error("validation error: {0}")]
    Validation(String),
    /// Ran out of attempts while allocating a unique booking reference.
    #[error("could not allocate a unique booking reference")]
    ReferenceExhausted,
}

/// Convenient alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
