pub mod error;
pub mod viewer;
pub mod document;
pub mod render;
pub mod loader;
pub mod profile;
pub mod theme;

// Export view-state machine
pub use viewer::{
    LoadTicket, OpenDocument, PageRequest, PageView, ViewerAction, ViewerContent, ViewerState,
    LOADING_MESSAGE, LOAD_FAILURE_MESSAGE,
};

// Export document resolution and rendering
pub use document::{save_copy, DocumentSource};
pub use render::{DocumentRenderer, PageImage, PdfiumRenderer};
pub use loader::{DocumentLoader, LoaderEvent};

// Export configuration and errors
pub use profile::{DocumentConfig, Profile, ProfileLink};
pub use error::{DocumentError, ProfileError};

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, hex_to_color32, with_alpha};
