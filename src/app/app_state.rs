//! Centralized application state.
//!
//! Composes the profile being presented, the viewer's view-state machine,
//! the per-viewer page state, and the theme. Each component keeps its own
//! invariants; coordinators combine them.

use crate::state::{PageState, ThemeState};
use cvpage::{Profile, ViewerState};

/// Main application state composed of focused state components.
pub struct AppState {
    /// Landing-page owner, links and document
    pub profile: Profile,

    /// Modal viewer view state
    pub viewer: ViewerState,

    /// Rendered page texture and cached document bytes
    pub page: PageState,

    /// Theme and styling state
    pub theme: ThemeState,

    /// Outcome of the last download, shown in the viewer header
    pub status_message: Option<String>,
}

impl AppState {
    /// Creates a new state with a theme loaded from storage.
    pub fn with_theme(profile: Profile, theme_name: String) -> Self {
        Self {
            profile,
            viewer: ViewerState::new(),
            page: PageState::new(),
            theme: ThemeState::with_theme(theme_name),
            status_message: None,
        }
    }

    /// Discards everything scoped to one open viewer.
    pub fn reset_viewer_scope(&mut self) {
        self.page.clear();
        self.status_message = None;
    }
}
