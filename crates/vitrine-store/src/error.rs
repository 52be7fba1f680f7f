use thiserror::Error;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection name cannot be used by this backend.
    #[error("invalid collection name `{0}`")]
    InvalidCollection(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is unreachable or refused the request.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend-specific failure.
    #[error("document store error: {0}")]
    Backend(String),
}

/// Result alias for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from asset store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The asset path is empty, absolute, or escapes the store root.
    #[error("invalid asset path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is unreachable or refused the request.
    #[error("asset store error: {0}")]
    Backend(String),
}

/// Result alias for asset store operations.
pub type StorageResult<T> = Result<T, StorageError>;
