//! UI rendering subsystem
//!
//! - Landing page (name, profile links, open-viewer button, theme selector)
//! - Viewer header (title, zoom controls, download, close)
//! - Page view (loading placeholder, rendered page, failure message)
//! - Footer (page navigation for multi-page documents)
//! - Panel manager (modal orchestration and keyboard shortcuts)

pub mod landing;
pub mod header;
pub mod page_view;
pub mod footer;
pub mod panel_manager;
