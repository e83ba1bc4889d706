//! Excerpt - Region-of-interest rendering of PDF pages
//!
//! This crate renders the rectangle a checklist item points at: load the
//! page from the attached document, scale it to the display width, and
//! crop the scaled page down to just that rectangle.
//!
//! PDF decoding is delegated to a [`PdfBackend`]. The PDFium backend is
//! available with the `pdfium` feature; the `test-util` feature provides
//! an in-memory fake for tests.

mod backend;
mod error;
mod renderer;
mod surface;

#[cfg(feature = "pdfium")]
mod pdfium;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use backend::*;
pub use error::*;
pub use renderer::*;
pub use surface::*;

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumBackend;
