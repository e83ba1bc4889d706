//! Error types for storage operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] checklist_model::ModelError),

    #[error("Checklist not found: {0}")]
    ChecklistNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
