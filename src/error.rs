//! Error types for document resolution, rendering and profile loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while fetching, loading or rendering a document.
///
/// The viewer only ever shows a single static failure message; these
/// variants exist for logging and tests.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Remote fetch failed (transport error or non-success status)
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Local file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source resolved to zero bytes
    #[error("document at {0} is empty")]
    EmptyDocument(String),

    /// The rendering backend failed to initialise, parse or render
    #[error("rendering backend error: {0}")]
    Backend(String),

    /// Requested page is outside the loaded document
    #[error("page index {index} out of range for {count} pages")]
    PageOutOfRange { index: u32, count: u32 },

    /// Render requested before any document was loaded
    #[error("no document loaded")]
    NoDocument,

    /// Loader worker thread has exited
    #[error("document loader is no longer running")]
    WorkerUnavailable,
}

/// Errors produced while loading a landing-page profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
