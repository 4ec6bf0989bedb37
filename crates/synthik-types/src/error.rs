use thiserror::Error;

/// Errors from repository operations (used by trait definitions in synthik-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from chat operations.
///
/// `NotFound` and `Forbidden` carry the ownership distinction the HTTP
/// layer maps to 404 and 403. Routes that must not reveal a foreign chat's
/// existence collapse both into `NotFound` at the service level.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat not found")]
    NotFound,

    #[error("chat belongs to another user")]
    Forbidden,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the identity service.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service unreachable: {0}")]
    Unreachable(String),

    #[error("identity verification failed: {0}")]
    Verification(String),
}
