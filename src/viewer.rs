//! Viewer view-state machine.
//!
//! The viewer is either closed or open on a document. When open, its content
//! is loading, ready (showing one page at some zoom), or failed. All
//! mutations go through intent-revealing methods (or [`ViewerState::apply`])
//! so the page and zoom bounds hold after every transition.
//!
//! Navigation and zoom at a boundary are no-ops, never errors. Load
//! completions carry the [`LoadTicket`] of the open request that started
//! them; completions for any other ticket (including after close) are
//! ignored.

use std::fmt;

/// Smallest zoom, as a percentage of natural page size.
pub const MIN_SCALE_PERCENT: u16 = 50;
/// Largest zoom, as a percentage of natural page size.
pub const MAX_SCALE_PERCENT: u16 = 200;
/// Zoom increment applied by a single zoom in/out.
pub const SCALE_STEP_PERCENT: u16 = 20;
/// Zoom applied whenever a document finishes loading.
pub const DEFAULT_SCALE_PERCENT: u16 = 100;

/// Placeholder shown while the document is loading.
pub const LOADING_MESSAGE: &str = "Loading PDF...";
/// Static message shown in place of page content after a failure.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load PDF";

/// Identifies one open request; completions are matched against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A page the renderer should produce: 0-based index at a zoom percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page_index: u32,
    pub scale_percent: u16,
}

impl PageRequest {
    /// Zoom as a multiplier of natural page size.
    pub fn scale(&self) -> f32 {
        f32::from(self.scale_percent) / 100.0
    }
}

/// The visible page and zoom of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    page_number: u32,
    page_count: u32,
    scale_percent: u16,
}

impl PageView {
    fn first_page(page_count: u32) -> Self {
        Self {
            page_number: 1,
            page_count,
            scale_percent: DEFAULT_SCALE_PERCENT,
        }
    }

    /// 1-based number of the visible page.
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn scale_percent(&self) -> u16 {
        self.scale_percent
    }

    /// Zoom as a multiplier of natural page size, in [0.5, 2.0].
    pub fn scale(&self) -> f32 {
        f32::from(self.scale_percent) / 100.0
    }

    fn last_page(&self) -> u32 {
        self.page_count.max(1)
    }

    pub fn can_go_next(&self) -> bool {
        self.page_number < self.last_page()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn can_zoom_in(&self) -> bool {
        self.scale_percent < MAX_SCALE_PERCENT
    }

    pub fn can_zoom_out(&self) -> bool {
        self.scale_percent > MIN_SCALE_PERCENT
    }

    /// Page navigation is only offered for multi-page documents.
    pub fn show_page_controls(&self) -> bool {
        self.page_count > 1
    }

    /// Label for the zoom indicator, e.g. `"120%"`.
    pub fn zoom_label(&self) -> String {
        format!("{}%", self.scale_percent)
    }

    /// Label for the page indicator, e.g. `"Page 2 of 5"`.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page_number, self.page_count)
    }

    /// The render request that produces this view.
    pub fn render_request(&self) -> PageRequest {
        PageRequest {
            page_index: self.page_number - 1,
            scale_percent: self.scale_percent,
        }
    }

    fn next_page(&mut self) -> bool {
        let next = (self.page_number + 1).min(self.last_page());
        let changed = next != self.page_number;
        self.page_number = next;
        changed
    }

    fn previous_page(&mut self) -> bool {
        let previous = self.page_number.saturating_sub(1).max(1);
        let changed = previous != self.page_number;
        self.page_number = previous;
        changed
    }

    fn zoom_in(&mut self) -> bool {
        let zoomed = (self.scale_percent + SCALE_STEP_PERCENT).min(MAX_SCALE_PERCENT);
        let changed = zoomed != self.scale_percent;
        self.scale_percent = zoomed;
        changed
    }

    fn zoom_out(&mut self) -> bool {
        let zoomed = self
            .scale_percent
            .saturating_sub(SCALE_STEP_PERCENT)
            .max(MIN_SCALE_PERCENT);
        let changed = zoomed != self.scale_percent;
        self.scale_percent = zoomed;
        changed
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} of {} at scale {:.1}",
            self.page_number,
            self.page_count,
            self.scale()
        )
    }
}

/// What the open viewer shows in its content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerContent {
    Loading,
    Ready(PageView),
    Error,
}

/// Document the viewer was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDocument {
    pub url: String,
    pub ticket: LoadTicket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Visibility {
    Closed,
    Open {
        document: OpenDocument,
        content: ViewerContent,
    },
}

/// A single user action or completion callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerAction {
    Open(String),
    Close,
    LoadSucceeded { ticket: LoadTicket, page_count: u32 },
    LoadFailed { ticket: LoadTicket },
    NextPage,
    PreviousPage,
    ZoomIn,
    ZoomOut,
}

/// View state of the modal document viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    visibility: Visibility,
    tickets_issued: u64,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerState {
    /// Creates a closed viewer.
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Closed,
            tickets_issued: 0,
        }
    }

    // ===== Queries =====

    pub fn is_open(&self) -> bool {
        matches!(self.visibility, Visibility::Open { .. })
    }

    /// Document the viewer is open on, if any.
    pub fn document(&self) -> Option<&OpenDocument> {
        match &self.visibility {
            Visibility::Open { document, .. } => Some(document),
            Visibility::Closed => None,
        }
    }

    /// Content state of the open viewer; `None` while closed.
    pub fn content(&self) -> Option<ViewerContent> {
        match &self.visibility {
            Visibility::Open { content, .. } => Some(*content),
            Visibility::Closed => None,
        }
    }

    /// Current page view when a document is loaded and shown.
    pub fn page_view(&self) -> Option<PageView> {
        match self.content() {
            Some(ViewerContent::Ready(view)) => Some(view),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.content() == Some(ViewerContent::Loading)
    }

    pub fn has_failed(&self) -> bool {
        self.content() == Some(ViewerContent::Error)
    }

    pub fn show_page_controls(&self) -> bool {
        self.page_view().is_some_and(|view| view.show_page_controls())
    }

    pub fn can_go_next(&self) -> bool {
        self.page_view().is_some_and(|view| view.can_go_next())
    }

    pub fn can_go_previous(&self) -> bool {
        self.page_view().is_some_and(|view| view.can_go_previous())
    }

    pub fn can_zoom_in(&self) -> bool {
        self.page_view().is_some_and(|view| view.can_zoom_in())
    }

    pub fn can_zoom_out(&self) -> bool {
        self.page_view().is_some_and(|view| view.can_zoom_out())
    }

    /// Ticket and render request for the page currently on screen.
    pub fn current_request(&self) -> Option<(LoadTicket, PageRequest)> {
        match &self.visibility {
            Visibility::Open {
                document,
                content: ViewerContent::Ready(view),
            } => Some((document.ticket, view.render_request())),
            _ => None,
        }
    }

    // ===== Transitions =====

    /// Opens the viewer on `url` and returns the ticket for its load.
    ///
    /// Opening an already open viewer restarts the load; completions for the
    /// previous ticket are ignored from then on.
    pub fn open(&mut self, url: impl Into<String>) -> LoadTicket {
        self.tickets_issued += 1;
        let ticket = LoadTicket(self.tickets_issued);
        self.visibility = Visibility::Open {
            document: OpenDocument {
                url: url.into(),
                ticket,
            },
            content: ViewerContent::Loading,
        };
        ticket
    }

    /// Closes the viewer, discarding page and zoom state.
    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
    }

    /// Applies a successful load. Returns false if the ticket is stale.
    pub fn load_succeeded(&mut self, ticket: LoadTicket, page_count: u32) -> bool {
        match &mut self.visibility {
            Visibility::Open { document, content }
                if document.ticket == ticket && *content == ViewerContent::Loading =>
            {
                *content = ViewerContent::Ready(PageView::first_page(page_count));
                true
            }
            _ => false,
        }
    }

    /// Applies a load (or page render) failure. Returns false if the ticket
    /// is stale or the viewer already failed.
    pub fn load_failed(&mut self, ticket: LoadTicket) -> bool {
        match &mut self.visibility {
            Visibility::Open { document, content }
                if document.ticket == ticket && *content != ViewerContent::Error =>
            {
                *content = ViewerContent::Error;
                true
            }
            _ => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.with_view(PageView::next_page)
    }

    pub fn previous_page(&mut self) -> bool {
        self.with_view(PageView::previous_page)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.with_view(PageView::zoom_in)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.with_view(PageView::zoom_out)
    }

    /// Applies one action. Returns true if the state changed.
    pub fn apply(&mut self, action: ViewerAction) -> bool {
        match action {
            ViewerAction::Open(url) => {
                self.open(url);
                true
            }
            ViewerAction::Close => {
                let was_open = self.is_open();
                self.close();
                was_open
            }
            ViewerAction::LoadSucceeded { ticket, page_count } => {
                self.load_succeeded(ticket, page_count)
            }
            ViewerAction::LoadFailed { ticket } => self.load_failed(ticket),
            ViewerAction::NextPage => self.next_page(),
            ViewerAction::PreviousPage => self.previous_page(),
            ViewerAction::ZoomIn => self.zoom_in(),
            ViewerAction::ZoomOut => self.zoom_out(),
        }
    }

    fn with_view(&mut self, update: impl FnOnce(&mut PageView) -> bool) -> bool {
        match &mut self.visibility {
            Visibility::Open {
                content: ViewerContent::Ready(view),
                ..
            } => update(view),
            _ => false,
        }
    }
}
