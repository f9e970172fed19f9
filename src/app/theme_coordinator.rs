//! Theme management and persistence coordination.

use crate::app::{AppState, SettingsCoordinator};
use cvpage::theme::DEFAULT_THEME;

const THEME_KEY: &str = "theme_preference";

/// Coordinates theme management and persistence.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Loads the theme preference during startup, defaulting to Light.
    pub fn load_theme_from_storage(storage: Option<&dyn eframe::Storage>) -> String {
        SettingsCoordinator::load_setting_or(storage, THEME_KEY, DEFAULT_THEME.to_string())
    }

    /// Saves the current theme preference.
    pub fn save_theme_to_storage(storage: &mut dyn eframe::Storage, theme_name: &str) {
        SettingsCoordinator::save_setting(storage, THEME_KEY, &theme_name);
    }

    /// Applies the current theme to the egui context.
    ///
    /// Called every frame so a theme switch takes effect immediately.
    pub fn apply_current_theme(ctx: &egui::Context, state: &AppState) {
        let theme = state.theme.current_theme();
        let mut visuals = if theme.name == "Dark" {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        state.theme.theme_manager().apply_theme(theme, &mut visuals);
        ctx.set_visuals(visuals);
    }
}
