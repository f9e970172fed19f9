//! Theme and styling state management.

use cvpage::theme::DEFAULT_THEME;
use cvpage::{Theme, ThemeColors, ThemeManager};

/// State related to visual theme and styling.
///
/// Responsibilities:
/// - Owning the theme manager
/// - Tracking the selected theme
/// - Resolving the active palette for the viewer chrome
pub struct ThemeState {
    theme_manager: ThemeManager,
    current_theme_name: String,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current_theme_name", &self.current_theme_name)
            .finish_non_exhaustive()
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeState {
    /// Creates a new theme state with the default theme.
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME.to_string())
    }

    /// Creates a new theme state with a specific theme.
    ///
    /// Unknown names are kept as-is and resolve to the default palette.
    pub fn with_theme(theme_name: String) -> Self {
        Self {
            theme_manager: ThemeManager::new(),
            current_theme_name: theme_name,
        }
    }

    // ===== Theme Queries =====

    pub fn theme_manager(&self) -> &ThemeManager {
        &self.theme_manager
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme_name
    }

    /// The active theme, falling back to the default for unknown names.
    pub fn current_theme(&self) -> &Theme {
        self.theme_manager.theme_or_default(&self.current_theme_name)
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.current_theme().colors
    }

    // ===== Theme Mutations =====

    pub fn set_theme(&mut self, theme_name: String) {
        self.current_theme_name = theme_name;
    }
}
