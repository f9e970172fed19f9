//! Page rendering capability.
//!
//! The viewer never decodes PDF itself. It hands document bytes to a
//! [`DocumentRenderer`] and asks it for RGBA images of individual pages.
//! [`PdfiumRenderer`] is the PDFium-backed implementation used by the app.

use crate::error::DocumentError;
use pdfium_render::prelude::*;

/// A rendered page as tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PageImage {
    /// Returns `[width, height]` as expected by egui image constructors.
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Trait for a backend that can load a document and render its pages.
///
/// A renderer holds at most one document; loading replaces it.
pub trait DocumentRenderer {
    /// Loads document bytes and returns the page count.
    fn load(&mut self, bytes: Vec<u8>) -> Result<u32, DocumentError>;

    /// Renders the 0-based page at `scale` (1.0 = one pixel per PDF point).
    fn render_page(&mut self, page_index: u32, scale: f32) -> Result<PageImage, DocumentError>;

    /// Drops the loaded document, if any.
    fn unload(&mut self);
}

/// PDFium-backed renderer.
pub struct PdfiumRenderer {
    pdfium: &'static Pdfium,
    document: Option<PdfDocument<'static>>,
}

impl PdfiumRenderer {
    /// Binds the PDFium library.
    ///
    /// Search order:
    /// 1. Executable's directory
    /// 2. Current working directory
    /// 3. System library paths
    pub fn new() -> Result<Self, DocumentError> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        let bindings = exe_dir
            .and_then(|dir| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir)).ok()
            })
            .map(Ok)
            .unwrap_or_else(|| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                    .or_else(|_| Pdfium::bind_to_system_library())
            })
            .map_err(|e| DocumentError::Backend(format!("failed to bind PDFium: {}", e)))?;

        // Documents borrow the bindings; the renderer lives for the worker's lifetime.
        let pdfium: &'static Pdfium = Box::leak(Box::new(Pdfium::new(bindings)));
        tracing::debug!("PDFium bound");

        Ok(Self {
            pdfium,
            document: None,
        })
    }
}

impl DocumentRenderer for PdfiumRenderer {
    fn load(&mut self, bytes: Vec<u8>) -> Result<u32, DocumentError> {
        self.document = None;
        let document = self
            .pdfium
            .load_pdf_from_byte_vec(bytes, None)
            .map_err(|e| DocumentError::Backend(e.to_string()))?;
        let page_count = u32::from(document.pages().len());
        self.document = Some(document);
        Ok(page_count)
    }

    fn render_page(&mut self, page_index: u32, scale: f32) -> Result<PageImage, DocumentError> {
        let document = self.document.as_ref().ok_or(DocumentError::NoDocument)?;
        let count = u32::from(document.pages().len());
        let index = u16::try_from(page_index)
            .ok()
            .filter(|_| page_index < count)
            .ok_or(DocumentError::PageOutOfRange { index: page_index, count })?;

        let page = document
            .pages()
            .get(index)
            .map_err(|e| DocumentError::Backend(e.to_string()))?;

        let config = PdfRenderConfig::new()
            .scale_page_by_factor(scale)
            .render_form_data(true)
            .render_annotations(true);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| DocumentError::Backend(e.to_string()))?;

        Ok(PageImage {
            width: bitmap.width().max(0) as u32,
            height: bitmap.height().max(0) as u32,
            rgba: bitmap.as_rgba_bytes(),
        })
    }

    fn unload(&mut self) {
        self.document = None;
    }
}
