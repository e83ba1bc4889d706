//! Excerpt rendering
//!
//! Renders the page a region reference points at, scaled so the full page
//! is `target_width` pixels wide, then crops the scaled page to the
//! region's rectangle. Nothing is cached; each call decodes the document
//! again.

use crate::{ExcerptError, Offset, PdfBackend, Result, Surface};
use base64::{engine::general_purpose::STANDARD, Engine};
use checklist_model::{DocumentHandle, Rect, RegionRef};
use std::io::Cursor;

/// Message shown in place of an excerpt that could not be rendered
pub const PLACEHOLDER_MESSAGE: &str = "Error loading PDF section";

/// Largest excerpt, in pixels, the renderer will allocate
pub const MAX_EXCERPT_PIXELS: u64 = 40_000_000;

/// Largest display width a page may be scaled to
pub const MAX_TARGET_WIDTH: f64 = 16_384.0;

/// A rendered region of a page
#[derive(Debug, Clone, PartialEq)]
pub struct Excerpt {
    /// 1-indexed source page
    pub page: u32,
    /// Source rectangle in page coordinates at scale 1.0
    pub rect: Rect,
    /// Scale the page was rendered at
    pub scale: f64,
    pub surface: Surface,
}

impl Excerpt {
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Encode as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.surface
            .image()
            .write_to(&mut buffer, image::ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }

    /// Encode as a PNG data URL for direct display
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.to_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

/// What to show next to a checklist item
#[derive(Debug, Clone, PartialEq)]
pub enum ExcerptOutcome {
    /// No variant selected, no document, or no region for the item
    NotShown,
    Rendered(Excerpt),
    /// Rendering failed; show `message` instead
    Unavailable { message: String, cause: String },
}

impl ExcerptOutcome {
    pub fn unavailable(cause: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: PLACEHOLDER_MESSAGE.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn excerpt(&self) -> Option<&Excerpt> {
        match self {
            Self::Rendered(excerpt) => Some(excerpt),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Pixel size of `rect` rendered at `scale`, at most
/// [`MAX_EXCERPT_PIXELS`] in area
pub fn excerpt_size(rect: &Rect, scale: f64) -> Result<(u32, u32)> {
    let width = (rect.width * scale).round();
    let height = (rect.height * scale).round();
    if !(width >= 1.0 && height >= 1.0) {
        return Err(ExcerptError::EmptyRegion {
            width: rect.width,
            height: rect.height,
        });
    }
    if !(width * height <= MAX_EXCERPT_PIXELS as f64) {
        return Err(ExcerptError::RegionTooLarge {
            width: rect.width,
            height: rect.height,
            limit: MAX_EXCERPT_PIXELS,
        });
    }
    Ok((width as u32, height as u32))
}

/// Renders region excerpts through a [`PdfBackend`]
#[derive(Debug)]
pub struct ExcerptRenderer<B> {
    backend: B,
}

impl<B: PdfBackend> ExcerptRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render `rect` of `page_number` so that the whole page would be
    /// `target_width` pixels wide.
    ///
    /// The result is `round(rect.width * scale)` x `round(rect.height * scale)`
    /// pixels, where `scale = target_width / page_width`.
    pub fn render_excerpt(
        &self,
        document: &DocumentHandle,
        page_number: u32,
        rect: Rect,
        target_width: f64,
    ) -> Result<Excerpt> {
        if !(target_width > 0.0 && target_width <= MAX_TARGET_WIDTH) {
            return Err(ExcerptError::InvalidTargetWidth(target_width));
        }
        if rect.is_empty() {
            return Err(ExcerptError::EmptyRegion {
                width: rect.width,
                height: rect.height,
            });
        }

        let pdf = self.backend.load_document(document.bytes())?;
        let page = self.backend.get_page(&pdf, page_number)?;

        let page_width = self.backend.native_width(&page, 1.0);
        if !(page_width > 0.0) {
            return Err(ExcerptError::Render(format!(
                "page {} has no width",
                page_number
            )));
        }
        let scale = target_width / page_width;
        let (width, height) = excerpt_size(&rect, scale)?;

        // Shift the page so the rectangle's corner lands on the surface origin
        let origin = Offset::new(-rect.x * scale, -rect.y * scale);
        let full_page = self.backend.render_page(&page, scale, origin)?;
        let surface = full_page.crop_top_left(width, height);

        tracing::debug!(
            "Rendered excerpt of page {} at scale {:.3}: {}x{}",
            page_number,
            scale,
            width,
            height
        );

        Ok(Excerpt {
            page: page_number,
            rect,
            scale,
            surface,
        })
    }

    /// Render a region reference, turning any failure into a placeholder.
    ///
    /// Never returns an error: a corrupt document or missing page is
    /// logged and reported as [`ExcerptOutcome::Unavailable`].
    pub fn render_or_placeholder(
        &self,
        document: &DocumentHandle,
        region: &RegionRef,
        target_width: f64,
    ) -> ExcerptOutcome {
        match self.render_excerpt(document, region.page, region.rect, target_width) {
            Ok(excerpt) => ExcerptOutcome::Rendered(excerpt),
            Err(e) => {
                tracing::warn!("Error rendering PDF section on page {}: {}", region.page, e);
                ExcerptOutcome::unavailable(e)
            }
        }
    }
}
