//! PDFium-backed rendering

use crate::{ExcerptError, Offset, PdfBackend, Result, Surface};
use image::RgbaImage;
use pdfium_render::prelude::*;
use std::path::Path;

/// Renders pages with a PDFium shared library
pub struct PdfiumBackend {
    pdfium: Pdfium,
}

impl PdfiumBackend {
    /// Bind to the PDFium library at `library`, or to the system library
    /// when no path is configured.
    pub fn bind(library: Option<&Path>) -> Result<Self> {
        let bindings = match library {
            Some(path) => Pdfium::bind_to_library(path),
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| ExcerptError::Load(format!("PDF renderer unavailable ({})", e)))?;

        tracing::info!("Bound PDFium library");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl std::fmt::Debug for PdfiumBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfiumBackend").finish_non_exhaustive()
    }
}

impl PdfBackend for PdfiumBackend {
    type Document<'a> = PdfDocument<'a> where Self: 'a;
    type Page<'a> = PdfPage<'a> where Self: 'a;

    fn load_document<'a>(&'a self, bytes: &'a [u8]) -> Result<Self::Document<'a>> {
        self.pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| ExcerptError::Load(e.to_string()))
    }

    fn get_page<'a>(
        &'a self,
        document: &Self::Document<'a>,
        page_number: u32,
    ) -> Result<Self::Page<'a>> {
        let count = u32::from(document.pages().len());
        if page_number == 0 || page_number > count {
            return Err(ExcerptError::PageOutOfRange {
                page: page_number,
                count,
            });
        }
        document
            .pages()
            .get((page_number - 1) as PdfPageIndex)
            .map_err(|e| ExcerptError::Render(e.to_string()))
    }

    fn native_width(&self, page: &Self::Page<'_>, scale: f64) -> f64 {
        f64::from(page.width().value) * scale
    }

    fn render_page(&self, page: &Self::Page<'_>, scale: f64, origin: Offset) -> Result<Surface> {
        let config = PdfRenderConfig::new().scale_page_by_factor(scale as f32);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ExcerptError::Render(e.to_string()))?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let content = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(
            || ExcerptError::Render(format!("bitmap buffer does not match {}x{}", width, height)),
        )?;

        Ok(Surface::place(&content, width, height, origin))
    }
}
