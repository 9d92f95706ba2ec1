use thiserror::Error;

/// Main error type for the profile matching engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected payload (settings or player), raised before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// Player id not present in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed player data encountered while scoring
    #[error("Computation error: {0}")]
    Computation(String),

    /// Invalid environment configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }

    pub fn player_not_found(id: i64) -> Self {
        EngineError::NotFound(format!("player {}", id))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
