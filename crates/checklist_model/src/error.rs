//! Error types for model operations

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Section index {index} out of range (sections: {len})")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Item index {index} out of range in section {section} (items: {len})")]
    ItemOutOfRange {
        section: usize,
        index: usize,
        len: usize,
    },

    #[error("No document attached to checklist: {0}")]
    NoDocumentAttached(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
