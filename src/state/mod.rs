//! State management modules for the landing page and viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Theme state (theme manager, current theme)
//! - Page state (rendered page texture, cached document bytes)
//!
//! The viewer's own view-state machine lives in the library
//! (`cvpage::ViewerState`) so it can be tested without a GUI.

mod theme_state;
mod page_state;

pub use theme_state::ThemeState;
pub use page_state::{DisplayedPage, PageState};
