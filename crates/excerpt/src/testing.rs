//! In-memory PDF backend for tests
//!
//! [`FakePdfBackend`] accepts any bytes that start with a PDF header and
//! serves pages of fixed sizes. Each rendered pixel encodes the page
//! coordinate it came from (red = x, green = y, blue = page number), so
//! tests can check exactly which part of the page an excerpt shows.
//! Every backend call is recorded.

use crate::{ExcerptError, Offset, PdfBackend, Result, Surface};
use image::{Rgba, RgbaImage};
use std::cell::RefCell;

/// Bytes the fake backend accepts as a valid document
pub fn fake_pdf_bytes() -> Vec<u8> {
    b"%PDF-1.7\n% fake document\n%%EOF\n".to_vec()
}

/// Page dimensions at scale 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    LoadDocument { len: usize },
    GetPage { page: u32 },
    NativeWidth { page: u32, scale: f64 },
    RenderPage { page: u32, scale: f64, origin: Offset },
}

#[derive(Debug, Clone, Copy)]
pub struct FakePage {
    number: u32,
    size: PageSize,
}

#[derive(Debug, Default)]
pub struct FakePdfBackend {
    pages: Vec<PageSize>,
    calls: RefCell<Vec<BackendCall>>,
}

impl FakePdfBackend {
    pub fn new(pages: Vec<PageSize>) -> Self {
        Self {
            pages,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// All calls made so far, oldest first
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.borrow().clone()
    }

    /// Pages passed to `render_page`, oldest first
    pub fn rendered_pages(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                BackendCall::RenderPage { page, .. } => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: BackendCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl PdfBackend for FakePdfBackend {
    type Document<'a> = u32 where Self: 'a;
    type Page<'a> = FakePage where Self: 'a;

    fn load_document<'a>(&'a self, bytes: &'a [u8]) -> Result<Self::Document<'a>> {
        self.record(BackendCall::LoadDocument { len: bytes.len() });
        if !bytes.starts_with(b"%PDF-") {
            return Err(ExcerptError::Load("missing PDF header".to_string()));
        }
        Ok(self.pages.len() as u32)
    }

    fn get_page<'a>(
        &'a self,
        page_count: &Self::Document<'a>,
        page_number: u32,
    ) -> Result<Self::Page<'a>> {
        self.record(BackendCall::GetPage { page: page_number });
        if page_number == 0 || page_number > *page_count {
            return Err(ExcerptError::PageOutOfRange {
                page: page_number,
                count: *page_count,
            });
        }
        Ok(FakePage {
            number: page_number,
            size: self.pages[page_number as usize - 1],
        })
    }

    fn native_width(&self, page: &Self::Page<'_>, scale: f64) -> f64 {
        self.record(BackendCall::NativeWidth {
            page: page.number,
            scale,
        });
        page.size.width * scale
    }

    fn render_page(&self, page: &Self::Page<'_>, scale: f64, origin: Offset) -> Result<Surface> {
        self.record(BackendCall::RenderPage {
            page: page.number,
            scale,
            origin,
        });
        let width = (page.size.width * scale).round() as u32;
        let height = (page.size.height * scale).round() as u32;
        let content = RgbaImage::from_fn(width, height, |x, y| {
            let page_x = (x as f64 / scale) as u32;
            let page_y = (y as f64 / scale) as u32;
            Rgba([page_x as u8, page_y as u8, page.number as u8, 255])
        });
        Ok(Surface::place(&content, width, height, origin))
    }
}
