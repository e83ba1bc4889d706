//! The PDF library contract the renderer depends on

use crate::{Offset, Result, Surface};

/// A PDF decode/render library.
///
/// The renderer only needs four operations: load a document from bytes,
/// fetch a page, measure its width, and rasterize it. Documents and pages
/// may borrow from the backend and from the source bytes.
pub trait PdfBackend {
    type Document<'a>
    where
        Self: 'a;
    type Page<'a>
    where
        Self: 'a;

    /// Parse a document. Fails on malformed input.
    fn load_document<'a>(&'a self, bytes: &'a [u8]) -> Result<Self::Document<'a>>;

    /// Fetch a 1-indexed page. Fails if the page does not exist.
    fn get_page<'a>(&'a self, document: &Self::Document<'a>, page_number: u32)
        -> Result<Self::Page<'a>>;

    /// Width of the page in pixels when rendered at `scale`
    fn native_width(&self, page: &Self::Page<'_>, scale: f64) -> f64;

    /// Rasterize the whole page at `scale` onto a surface of the scaled
    /// page size, with the page's top-left corner drawn at `origin`.
    fn render_page(&self, page: &Self::Page<'_>, scale: f64, origin: Offset) -> Result<Surface>;
}
