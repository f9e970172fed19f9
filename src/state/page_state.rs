//! Rendered page and document byte state.
//!
//! Holds what the viewer needs beyond its view-state machine: the texture
//! of the last rendered page, the render currently requested from the
//! loader, and the document bytes kept for download. Everything here is
//! scoped to one open viewer and cleared on close.

use cvpage::{LoadTicket, PageRequest};
use std::sync::Arc;

/// A page texture ready to draw.
pub struct DisplayedPage {
    pub ticket: LoadTicket,
    pub request: PageRequest,
    pub texture: egui::TextureHandle,
    pub pixels_per_point: f32,
}

impl DisplayedPage {
    /// Size in egui points (texture pixels divided by render density).
    pub fn size(&self) -> egui::Vec2 {
        let [width, height] = self.texture.size();
        egui::vec2(width as f32, height as f32) / self.pixels_per_point
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RenderKey {
    ticket: LoadTicket,
    request: PageRequest,
    pixels_per_point: f32,
}

/// Per-viewer page state.
#[derive(Default)]
pub struct PageState {
    document_bytes: Option<Arc<[u8]>>,
    displayed: Option<DisplayedPage>,
    requested: Option<RenderKey>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the texture, pending request and cached bytes.
    pub fn clear(&mut self) {
        self.document_bytes = None;
        self.displayed = None;
        self.requested = None;
    }

    // ===== Document bytes =====

    pub fn set_document_bytes(&mut self, bytes: Arc<[u8]>) {
        self.document_bytes = Some(bytes);
    }

    pub fn document_bytes(&self) -> Option<&Arc<[u8]>> {
        self.document_bytes.as_ref()
    }

    pub fn can_download(&self) -> bool {
        self.document_bytes.is_some()
    }

    // ===== Rendering =====

    /// True when the loader has not yet been asked for this exact page.
    pub fn needs_render(&self, ticket: LoadTicket, request: PageRequest, pixels_per_point: f32) -> bool {
        self.requested
            != Some(RenderKey {
                ticket,
                request,
                pixels_per_point,
            })
    }

    pub fn mark_requested(&mut self, ticket: LoadTicket, request: PageRequest, pixels_per_point: f32) {
        self.requested = Some(RenderKey {
            ticket,
            request,
            pixels_per_point,
        });
    }

    /// Replaces the displayed page.
    pub fn show(&mut self, page: DisplayedPage) {
        self.displayed = Some(page);
    }

    /// Last rendered page for `ticket`, possibly for an older request while
    /// a newer render is in flight.
    pub fn displayed_for(&self, ticket: LoadTicket) -> Option<&DisplayedPage> {
        self.displayed.as_ref().filter(|page| page.ticket == ticket)
    }

    /// True while the displayed texture differs from the requested page.
    pub fn is_rendering(&self) -> bool {
        match (&self.requested, &self.displayed) {
            (Some(key), Some(page)) => key.ticket != page.ticket || key.request != page.request,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvpage::ViewerState;

    fn ticket_and_request() -> (LoadTicket, PageRequest) {
        let mut viewer = ViewerState::new();
        let ticket = viewer.open("cv.pdf");
        viewer.load_succeeded(ticket, 3);
        viewer.current_request().unwrap()
    }

    #[test]
    fn test_needs_render_until_requested() {
        let (ticket, request) = ticket_and_request();
        let mut page = PageState::new();

        assert!(page.needs_render(ticket, request, 1.0));
        page.mark_requested(ticket, request, 1.0);
        assert!(!page.needs_render(ticket, request, 1.0));
        assert!(page.needs_render(ticket, request, 2.0));
        assert!(page.is_rendering());
    }

    #[test]
    fn test_clear_drops_bytes_and_requests() {
        let (ticket, request) = ticket_and_request();
        let mut page = PageState::new();
        page.set_document_bytes(Arc::from(&b"%PDF"[..]));
        page.mark_requested(ticket, request, 1.0);
        assert!(page.can_download());

        page.clear();
        assert!(!page.can_download());
        assert!(page.needs_render(ticket, request, 1.0));
        assert!(!page.is_rendering());
    }

    #[test]
    fn test_displayed_page_size_in_points() {
        let (ticket, request) = ticket_and_request();
        let ctx = egui::Context::default();
        let image = egui::ColorImage::from_rgba_unmultiplied([200, 100], &vec![255u8; 200 * 100 * 4]);
        let texture = ctx.load_texture("test-page", image, egui::TextureOptions::LINEAR);

        let mut page = PageState::new();
        page.show(DisplayedPage {
            ticket,
            request,
            texture,
            pixels_per_point: 2.0,
        });

        let shown = page.displayed_for(ticket).unwrap();
        assert_eq!(shown.size(), egui::vec2(100.0, 50.0));
    }
}
