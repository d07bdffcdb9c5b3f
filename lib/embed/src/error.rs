use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbedError>;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Embedding model not found: {0}")]
    ModelNotFound(String),

    #[error("Failed to initialize embedding model: {0}")]
    ModelInit(String),

    #[error("Failed to generate embedding: {0}")]
    Encoding(String),

    #[error("Cannot embed empty text")]
    EmptyText,

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Encoder returned {actual} embeddings for {expected} texts")]
    BatchSize { expected: usize, actual: usize },

    #[error("Encode worker has stopped")]
    WorkerStopped,

    #[error("Encoding timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
