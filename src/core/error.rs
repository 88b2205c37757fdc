use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Store error: {0}")]
    StoreError(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookError>;
