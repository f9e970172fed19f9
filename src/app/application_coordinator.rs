//! Application-level coordination and workflow management.
//!
//! Connects the viewer's view-state machine to the background loader:
//! starting loads on open, applying completions, requesting page renders
//! when the view changes, and saving downloaded copies.

use crate::app::AppState;
use crate::state::DisplayedPage;
use anyhow::Context as _;
use cvpage::{save_copy, DocumentLoader, DocumentSource, LoaderEvent, ViewerAction};
use std::path::{Path, PathBuf};

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Opens the viewer on the profile's document and starts loading it.
    pub fn open_viewer(state: &mut AppState, loader: &DocumentLoader) {
        state.reset_viewer_scope();

        let url = state.profile.document.url.clone();
        let ticket = state.viewer.open(url.clone());
        tracing::info!(%ticket, url = %url, "viewer opened");

        if let Err(e) = loader.load(ticket, DocumentSource::parse(&url)) {
            tracing::error!(%ticket, "could not start document load: {}", e);
            state.viewer.load_failed(ticket);
        }
    }

    /// Closes the viewer and discards everything scoped to it.
    ///
    /// An in-flight load is not cancelled; its completion carries a stale
    /// ticket and is ignored.
    pub fn close_viewer(state: &mut AppState, loader: &DocumentLoader) {
        if !state.viewer.is_open() {
            return;
        }
        state.viewer.close();
        state.reset_viewer_scope();
        tracing::info!("viewer closed");

        if let Err(e) = loader.release() {
            tracing::debug!("loader release skipped: {}", e);
        }
    }

    /// Routes a viewer action from the UI.
    pub fn handle_viewer_action(state: &mut AppState, loader: &DocumentLoader, action: ViewerAction) {
        match action {
            ViewerAction::Open(url) => {
                state.profile.document.url = url;
                Self::open_viewer(state, loader);
            }
            ViewerAction::Close => Self::close_viewer(state, loader),
            action => {
                if state.viewer.apply(action) {
                    if let Some(view) = state.viewer.page_view() {
                        tracing::debug!("viewer now showing {}", view);
                    }
                }
            }
        }
    }

    /// Drains loader completions and applies them to application state.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if any event changed visible state.
    pub fn check_loader_events(state: &mut AppState, loader: &DocumentLoader, ctx: &egui::Context) -> bool {
        let mut changed = false;
        while let Some(event) = loader.poll() {
            changed |= Self::apply_loader_event(state, ctx, event);
        }
        changed
    }

    fn apply_loader_event(state: &mut AppState, ctx: &egui::Context, event: LoaderEvent) -> bool {
        match event {
            LoaderEvent::Loaded {
                ticket,
                page_count,
                bytes,
            } => {
                if state.viewer.load_succeeded(ticket, page_count) {
                    state.page.set_document_bytes(bytes);
                    true
                } else {
                    tracing::debug!(%ticket, "ignoring late load completion");
                    false
                }
            }
            LoaderEvent::LoadFailed { ticket, error } => {
                let applied = state.viewer.load_failed(ticket);
                if applied {
                    tracing::warn!(%ticket, "showing load failure: {}", error);
                }
                applied
            }
            LoaderEvent::Rendered {
                ticket,
                request,
                pixels_per_point,
                image,
            } => {
                let current = state.viewer.current_request().map(|(current, _)| current);
                if current != Some(ticket) {
                    return false;
                }
                let color_image = egui::ColorImage::from_rgba_unmultiplied(image.size(), &image.rgba);
                let texture = ctx.load_texture(
                    format!("page-{}-{}", ticket.value(), request.page_index),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                state.page.show(DisplayedPage {
                    ticket,
                    request,
                    texture,
                    pixels_per_point,
                });
                true
            }
            LoaderEvent::RenderFailed { ticket, error, .. } => {
                let applied = state.viewer.load_failed(ticket);
                if applied {
                    tracing::warn!(%ticket, "showing render failure: {}", error);
                }
                applied
            }
        }
    }

    /// Asks the loader for the page on screen if it has not been requested.
    pub fn request_page_render(state: &mut AppState, loader: &DocumentLoader, pixels_per_point: f32) {
        let Some((ticket, request)) = state.viewer.current_request() else {
            return;
        };
        if !state.page.needs_render(ticket, request, pixels_per_point) {
            return;
        }

        match loader.render(ticket, request, pixels_per_point) {
            Ok(()) => state.page.mark_requested(ticket, request, pixels_per_point),
            Err(e) => {
                tracing::error!(%ticket, "could not request page render: {}", e);
                state.viewer.load_failed(ticket);
            }
        }
    }

    /// Prompts for a destination and saves a copy of the loaded document.
    pub fn download_document(state: &mut AppState) {
        if !state.page.can_download() {
            return;
        }

        let download_name = state.profile.document.download_name.clone();
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(&download_name)
            .add_filter("PDF Documents", &["pdf"]);
        if let Some(dir) = dirs::download_dir() {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.save_file() {
            Self::save_document_to(state, &path);
        }
    }

    /// Writes the loaded document to `path` and records the outcome.
    pub fn save_document_to(state: &mut AppState, path: &Path) {
        state.status_message = Some(match Self::write_document(state, path) {
            Ok(saved) => format!("Saved {}", saved.display()),
            Err(e) => {
                tracing::warn!("download failed: {:#}", e);
                format!("Download failed: {}", e)
            }
        });
    }

    fn write_document(state: &AppState, path: &Path) -> anyhow::Result<PathBuf> {
        let bytes = state
            .page
            .document_bytes()
            .context("document has not finished loading")?;
        save_copy(bytes, path).with_context(|| format!("could not write {}", path.display()))?;
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvpage::{DocumentError, DocumentRenderer, PageImage, Profile, ViewerContent};
    use std::io::Write;
    use std::time::Duration;

    /// Renderer that reports one page per byte of the document.
    struct ByteCountRenderer {
        pages: Option<u32>,
    }

    impl DocumentRenderer for ByteCountRenderer {
        fn load(&mut self, bytes: Vec<u8>) -> Result<u32, DocumentError> {
            let pages = bytes.len() as u32;
            self.pages = Some(pages);
            Ok(pages)
        }

        fn render_page(&mut self, page_index: u32, scale: f32) -> Result<PageImage, DocumentError> {
            let count = self.pages.ok_or(DocumentError::NoDocument)?;
            if page_index >= count {
                return Err(DocumentError::PageOutOfRange { index: page_index, count });
            }
            let side = (10.0 * scale) as u32;
            Ok(PageImage {
                width: side,
                height: side,
                rgba: vec![255; (side * side * 4) as usize],
            })
        }

        fn unload(&mut self) {
            self.pages = None;
        }
    }

    fn fixture(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    fn setup(document_url: String) -> (AppState, DocumentLoader) {
        let mut profile = Profile::default();
        profile.document.url = document_url;
        let loader = DocumentLoader::spawn(|| Ok(Box::new(ByteCountRenderer { pages: None })), || {});
        (AppState::with_theme(profile, "Light".to_string()), loader)
    }

    /// Waits for one loader event and applies it.
    fn pump(state: &mut AppState, loader: &DocumentLoader, ctx: &egui::Context) -> bool {
        let event = loader.wait(Duration::from_secs(5)).expect("loader event");
        ApplicationCoordinator::apply_loader_event(state, ctx, event)
    }

    #[test]
    fn test_open_load_render_cycle() {
        let file = fixture(b"abc");
        let (mut state, loader) = setup(file.path().display().to_string());
        let ctx = egui::Context::default();

        ApplicationCoordinator::open_viewer(&mut state, &loader);
        assert_eq!(state.viewer.content(), Some(ViewerContent::Loading));

        assert!(pump(&mut state, &loader, &ctx));
        assert_eq!(state.viewer.page_view().unwrap().page_count(), 3);
        assert!(state.page.can_download());

        ApplicationCoordinator::request_page_render(&mut state, &loader, 1.0);
        assert!(pump(&mut state, &loader, &ctx));
        let (ticket, _) = state.viewer.current_request().unwrap();
        assert_eq!(state.page.displayed_for(ticket).unwrap().size(), egui::vec2(10.0, 10.0));
        assert!(!state.page.is_rendering());
    }

    #[test]
    fn test_missing_document_shows_failure() {
        let (mut state, loader) = setup("/no/such/cv.pdf".to_string());
        let ctx = egui::Context::default();

        ApplicationCoordinator::open_viewer(&mut state, &loader);
        assert!(pump(&mut state, &loader, &ctx));
        assert!(state.viewer.has_failed());
        assert!(!state.viewer.show_page_controls());
        assert!(!state.page.can_download());
    }

    #[test]
    fn test_close_mid_load_ignores_completion() {
        let file = fixture(b"abcd");
        let (mut state, loader) = setup(file.path().display().to_string());
        let ctx = egui::Context::default();

        ApplicationCoordinator::open_viewer(&mut state, &loader);
        ApplicationCoordinator::close_viewer(&mut state, &loader);

        assert!(!pump(&mut state, &loader, &ctx));
        assert!(!state.viewer.is_open());
        assert!(!state.page.can_download());
    }

    #[test]
    fn test_reopen_after_navigation_starts_fresh() {
        let file = fixture(b"abcde");
        let (mut state, loader) = setup(file.path().display().to_string());
        let ctx = egui::Context::default();

        ApplicationCoordinator::open_viewer(&mut state, &loader);
        pump(&mut state, &loader, &ctx);
        for _ in 0..10 {
            ApplicationCoordinator::handle_viewer_action(&mut state, &loader, ViewerAction::NextPage);
            ApplicationCoordinator::handle_viewer_action(&mut state, &loader, ViewerAction::ZoomIn);
        }
        let view = state.viewer.page_view().unwrap();
        assert_eq!(view.page_number(), 5);
        assert_eq!(view.scale(), 2.0);

        ApplicationCoordinator::handle_viewer_action(&mut state, &loader, ViewerAction::Close);
        ApplicationCoordinator::open_viewer(&mut state, &loader);
        pump(&mut state, &loader, &ctx);

        let view = state.viewer.page_view().unwrap();
        assert_eq!(view.page_number(), 1);
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn test_save_document_to_writes_copy() {
        let file = fixture(b"%PDF-1.7");
        let (mut state, loader) = setup(file.path().display().to_string());
        let ctx = egui::Context::default();
        ApplicationCoordinator::open_viewer(&mut state, &loader);
        pump(&mut state, &loader, &ctx);

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Roshan_Kern_CV.pdf");
        ApplicationCoordinator::save_document_to(&mut state, &target);

        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.7");
        assert!(state.status_message.as_deref().unwrap().starts_with("Saved"));
    }

    #[test]
    fn test_save_before_load_reports_failure() {
        let (mut state, _loader) = setup("cv.pdf".to_string());
        let dir = tempfile::tempdir().unwrap();
        ApplicationCoordinator::save_document_to(&mut state, &dir.path().join("cv.pdf"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Download failed"));
    }
}
