//! Application error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Renderer error: {0}")]
    Renderer(#[from] excerpt::ExcerptError),
}

impl From<checklist_model::ModelError> for AppError {
    fn from(e: checklist_model::ModelError) -> Self {
        Self::Store(e.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
