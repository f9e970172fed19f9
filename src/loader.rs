//! Asynchronous document loading and page rendering.
//!
//! A single background thread owns the [`DocumentRenderer`]. The UI thread
//! sends commands (load, render, release) and drains [`LoaderEvent`]s once
//! per frame, keeping the GUI responsive during fetches and rasterization.

use crate::document::DocumentSource;
use crate::error::DocumentError;
use crate::render::{DocumentRenderer, PageImage};
use crate::viewer::{LoadTicket, PageRequest};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Completion reported by the loader worker.
#[derive(Debug)]
pub enum LoaderEvent {
    /// Document fetched and parsed
    Loaded {
        ticket: LoadTicket,
        page_count: u32,
        /// Raw document bytes, kept for download
        bytes: Arc<[u8]>,
    },
    /// Fetch or parse failed
    LoadFailed {
        ticket: LoadTicket,
        error: DocumentError,
    },
    /// Page rasterized
    Rendered {
        ticket: LoadTicket,
        request: PageRequest,
        /// Screen density the image was rasterized for
        pixels_per_point: f32,
        image: PageImage,
    },
    /// Page could not be rasterized
    RenderFailed {
        ticket: LoadTicket,
        request: PageRequest,
        error: DocumentError,
    },
}

enum Command {
    Load {
        ticket: LoadTicket,
        source: DocumentSource,
    },
    Render {
        ticket: LoadTicket,
        request: PageRequest,
        pixels_per_point: f32,
    },
    Release,
}

/// Shared count of queued loads; results come through the event channel.
#[derive(Debug, Default)]
struct LoadingState {
    pending_loads: usize,
}

/// Handle to the background document worker.
pub struct DocumentLoader {
    commands: Sender<Command>,
    events: Receiver<LoaderEvent>,
    loading_state: Arc<Mutex<LoadingState>>,
}

impl DocumentLoader {
    /// Spawns the worker thread.
    ///
    /// `make_renderer` runs on the worker so the renderer never has to be
    /// `Send`. `notify` runs after every event, typically to request a repaint.
    pub fn spawn<F, N>(make_renderer: F, notify: N) -> Self
    where
        F: FnOnce() -> Result<Box<dyn DocumentRenderer>, DocumentError> + Send + 'static,
        N: Fn() + Send + 'static,
    {
        let (command_sender, command_receiver) = channel();
        let (event_sender, event_receiver) = channel();
        let loading_state = Arc::new(Mutex::new(LoadingState::default()));

        let worker_state = Arc::clone(&loading_state);
        let spawned = thread::Builder::new()
            .name("cvpage-loader".to_string())
            .spawn(move || {
                let worker = Worker {
                    renderer: make_renderer(),
                    current: None,
                    events: event_sender,
                    loading_state: worker_state,
                    notify: Box::new(notify),
                };
                worker.run(command_receiver);
            });
        if let Err(e) = spawned {
            tracing::error!("failed to spawn loader thread: {}", e);
        }

        Self {
            commands: command_sender,
            events: event_receiver,
            loading_state,
        }
    }

    /// Checks if a load is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending_loads
            > 0
    }

    /// Starts fetching and parsing the document for `ticket`.
    pub fn load(&self, ticket: LoadTicket, source: DocumentSource) -> Result<(), DocumentError> {
        self.adjust_pending(true);
        self.send(Command::Load { ticket, source })
            .inspect_err(|_| self.adjust_pending(false))
    }

    /// Requests a rasterized page for the document loaded under `ticket`.
    pub fn render(
        &self,
        ticket: LoadTicket,
        request: PageRequest,
        pixels_per_point: f32,
    ) -> Result<(), DocumentError> {
        self.send(Command::Render {
            ticket,
            request,
            pixels_per_point,
        })
    }

    /// Drops the worker's loaded document.
    pub fn release(&self) -> Result<(), DocumentError> {
        self.send(Command::Release)
    }

    /// Returns the next event if one is ready. Call once per frame.
    pub fn poll(&self) -> Option<LoaderEvent> {
        self.events.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event.
    pub fn wait(&self, timeout: Duration) -> Option<LoaderEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    fn send(&self, command: Command) -> Result<(), DocumentError> {
        self.commands
            .send(command)
            .map_err(|_| DocumentError::WorkerUnavailable)
    }

    fn adjust_pending(&self, queued: bool) {
        adjust_pending(&self.loading_state, queued);
    }
}

fn adjust_pending(loading_state: &Mutex<LoadingState>, queued: bool) {
    let mut state = loading_state.lock().unwrap_or_else(PoisonError::into_inner);
    if queued {
        state.pending_loads += 1;
    } else {
        state.pending_loads = state.pending_loads.saturating_sub(1);
    }
}

struct Worker {
    renderer: Result<Box<dyn DocumentRenderer>, DocumentError>,
    current: Option<LoadTicket>,
    events: Sender<LoaderEvent>,
    loading_state: Arc<Mutex<LoadingState>>,
    notify: Box<dyn Fn() + Send>,
}

impl Worker {
    fn run(mut self, commands: Receiver<Command>) {
        if let Err(e) = &self.renderer {
            tracing::error!("renderer unavailable: {}", e);
        }

        while let Ok(first) = commands.recv() {
            let mut batch = vec![first];
            batch.extend(commands.try_iter());

            let last = batch.len() - 1;
            for (position, command) in batch.into_iter().enumerate() {
                // A queued render is superseded by anything sent after it.
                if matches!(command, Command::Render { .. }) && position < last {
                    continue;
                }
                if !self.handle(command) {
                    return;
                }
            }
        }
        tracing::debug!("loader worker exiting");
    }

    /// Returns false once the UI side has hung up.
    fn handle(&mut self, command: Command) -> bool {
        let event = match command {
            Command::Load { ticket, source } => {
                let event = self.load(ticket, &source);
                adjust_pending(&self.loading_state, false);
                event
            }
            Command::Render {
                ticket,
                request,
                pixels_per_point,
            } => match self.render(ticket, request, pixels_per_point) {
                Some(event) => event,
                None => return true,
            },
            Command::Release => {
                if let Ok(renderer) = &mut self.renderer {
                    renderer.unload();
                }
                self.current = None;
                return true;
            }
        };

        if self.events.send(event).is_err() {
            return false;
        }
        (self.notify)();
        true
    }

    fn load(&mut self, ticket: LoadTicket, source: &DocumentSource) -> LoaderEvent {
        tracing::info!(%ticket, %source, "loading document");
        self.current = None;

        let result = match &mut self.renderer {
            Ok(renderer) => source.fetch().and_then(|bytes| {
                let shared: Arc<[u8]> = Arc::from(bytes.as_slice());
                renderer.load(bytes).map(|page_count| (page_count, shared))
            }),
            Err(e) => Err(DocumentError::Backend(e.to_string())),
        };

        match result {
            Ok((page_count, bytes)) => {
                tracing::info!(%ticket, page_count, "document loaded");
                self.current = Some(ticket);
                LoaderEvent::Loaded {
                    ticket,
                    page_count,
                    bytes,
                }
            }
            Err(error) => {
                tracing::warn!(%ticket, %source, "document load failed: {}", error);
                LoaderEvent::LoadFailed { ticket, error }
            }
        }
    }

    fn render(
        &mut self,
        ticket: LoadTicket,
        request: PageRequest,
        pixels_per_point: f32,
    ) -> Option<LoaderEvent> {
        if self.current != Some(ticket) {
            tracing::debug!(%ticket, "dropping render for stale document");
            return None;
        }
        let renderer = self.renderer.as_mut().ok()?;

        let pixels_per_point = pixels_per_point.max(0.1);
        let scale = request.scale() * pixels_per_point;
        Some(match renderer.render_page(request.page_index, scale) {
            Ok(image) => {
                tracing::debug!(
                    %ticket,
                    page = request.page_index + 1,
                    width = image.width,
                    height = image.height,
                    "page rendered"
                );
                LoaderEvent::Rendered {
                    ticket,
                    request,
                    pixels_per_point,
                    image,
                }
            }
            Err(error) => {
                tracing::warn!(%ticket, page = request.page_index + 1, "page render failed: {}", error);
                LoaderEvent::RenderFailed {
                    ticket,
                    request,
                    error,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoRenderer;

    impl DocumentRenderer for NoRenderer {
        fn load(&mut self, _bytes: Vec<u8>) -> Result<u32, DocumentError> {
            Err(DocumentError::Backend("not a document".to_string()))
        }

        fn render_page(&mut self, _page_index: u32, _scale: f32) -> Result<PageImage, DocumentError> {
            Err(DocumentError::NoDocument)
        }

        fn unload(&mut self) {}
    }

    /// Counts pages by bytes; the first load waits on `gate` so commands
    /// can queue up behind it.
    struct GatedRenderer {
        gate: Option<Arc<std::sync::Barrier>>,
        pages: Option<u32>,
    }

    impl DocumentRenderer for GatedRenderer {
        fn load(&mut self, bytes: Vec<u8>) -> Result<u32, DocumentError> {
            if let Some(gate) = self.gate.take() {
                gate.wait();
            }
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
                rgba: vec![0; (side * side * 4) as usize],
            })
        }

        fn unload(&mut self) {
            self.pages = None;
        }
    }

    fn gated_loader() -> (DocumentLoader, Arc<std::sync::Barrier>) {
        let gate = Arc::new(std::sync::Barrier::new(2));
        let worker_gate = Arc::clone(&gate);
        let loader = DocumentLoader::spawn(
            move || {
                Ok(Box::new(GatedRenderer {
                    gate: Some(worker_gate),
                    pages: None,
                }))
            },
            || {},
        );
        (loader, gate)
    }

    fn document_file(contents: &[u8]) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    fn page(page_index: u32, scale_percent: u16) -> PageRequest {
        PageRequest {
            page_index,
            scale_percent,
        }
    }

    const WAIT: Duration = Duration::from_secs(5);
    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn test_only_last_queued_render_runs() {
        let file = document_file(b"abcd");
        let (loader, gate) = gated_loader();
        let mut viewer = crate::viewer::ViewerState::new();
        let ticket = viewer.open("cv.pdf");

        loader
            .load(ticket, DocumentSource::Local(file.path().to_path_buf()))
            .unwrap();
        assert!(loader.is_loading());

        loader.render(ticket, page(0, 100), 1.0).unwrap();
        loader.render(ticket, page(1, 100), 1.0).unwrap();
        loader.render(ticket, page(2, 120), 1.0).unwrap();
        gate.wait();

        assert!(matches!(loader.wait(WAIT), Some(LoaderEvent::Loaded { page_count: 4, .. })));
        assert!(!loader.is_loading());
        match loader.wait(WAIT) {
            Some(LoaderEvent::Rendered { request, image, .. }) => {
                assert_eq!(request, page(2, 120));
                assert_eq!((image.width, image.height), (12, 12));
            }
            other => panic!("expected Rendered, got {:?}", other),
        }
        assert!(loader.wait(QUIET).is_none());
    }

    #[test]
    fn test_render_before_release_is_dropped() {
        let file = document_file(b"abc");
        let (loader, gate) = gated_loader();
        let mut viewer = crate::viewer::ViewerState::new();
        let ticket = viewer.open("cv.pdf");

        loader
            .load(ticket, DocumentSource::Local(file.path().to_path_buf()))
            .unwrap();
        loader.render(ticket, page(0, 100), 1.0).unwrap();
        loader.release().unwrap();
        gate.wait();

        assert!(matches!(loader.wait(WAIT), Some(LoaderEvent::Loaded { .. })));
        assert!(loader.wait(QUIET).is_none());
    }

    #[test]
    fn test_render_before_newer_load_is_dropped() {
        let first = document_file(b"abc");
        let second = document_file(b"ab");
        let (loader, gate) = gated_loader();
        let mut viewer = crate::viewer::ViewerState::new();
        let stale = viewer.open("first.pdf");

        loader
            .load(stale, DocumentSource::Local(first.path().to_path_buf()))
            .unwrap();
        loader.render(stale, page(0, 100), 1.0).unwrap();
        let current = viewer.open("second.pdf");
        loader
            .load(current, DocumentSource::Local(second.path().to_path_buf()))
            .unwrap();
        gate.wait();

        match loader.wait(WAIT) {
            Some(LoaderEvent::Loaded { ticket, .. }) => assert_eq!(ticket, stale),
            other => panic!("expected Loaded, got {:?}", other),
        }
        match loader.wait(WAIT) {
            Some(LoaderEvent::Loaded { ticket, page_count, .. }) => {
                assert_eq!(ticket, current);
                assert_eq!(page_count, 2);
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
        assert!(loader.wait(QUIET).is_none());
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_loader_creation() {
        let loader = DocumentLoader::spawn(|| Ok(Box::new(NoRenderer)), || {});
        assert!(!loader.is_loading());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_factory_failure_reports_load_failed() {
        let loader = DocumentLoader::spawn(
            || Err(DocumentError::Backend("no pdfium".to_string())),
            || {},
        );
        let mut viewer = crate::viewer::ViewerState::new();
        let ticket = viewer.open("cv.pdf");
        loader.load(ticket, DocumentSource::parse("cv.pdf")).unwrap();

        match loader.wait(Duration::from_secs(5)) {
            Some(LoaderEvent::LoadFailed { ticket: failed, error }) => {
                assert_eq!(failed, ticket);
                assert!(matches!(error, DocumentError::Backend(_)));
            }
            other => panic!("expected LoadFailed, got {:?}", other),
        }
        assert!(!loader.is_loading());
    }
}
