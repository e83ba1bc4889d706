//! Error types for excerpt rendering

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExcerptError {
    #[error("Failed to load document: {0}")]
    Load(String),

    #[error("Page {page} out of range (pages: {count})")]
    PageOutOfRange { page: u32, count: u32 },

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Region {width}x{height} has no area at this scale")]
    EmptyRegion { width: f64, height: f64 },

    #[error("Region {width}x{height} exceeds {limit} pixels at this scale")]
    RegionTooLarge { width: f64, height: f64, limit: u64 },

    #[error("Invalid target width: {0}")]
    InvalidTargetWidth(f64),

    #[error("Image encode error: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ExcerptError>;
