//! Error types

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage error (generic)
    #[error("Storage error: {0}")]
    Storage(String),
}
