//! Theme support for the landing page and document viewer.
//!
//! Provides Light and Dark palettes and a manager that applies them to egui
//! visuals. The viewer chrome reads its colors (backdrop, modal surface,
//! accent, error) straight from [`ThemeColors`].
//!
//! # Examples
//!
//! ```
//! use cvpage::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let light = manager.get_theme("Light").unwrap();
//! println!("Light page background: {:?}", light.colors.background);
//! ```

use egui::Color32;
use std::collections::HashMap;

/// Name of the theme used when no preference is stored.
pub const DEFAULT_THEME: &str = "Light";

/// Color palette for one theme
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Page
    pub background: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub link: Color32,

    // Viewer modal
    pub backdrop: Color32,
    pub modal_background: Color32,
    pub modal_bar: Color32,
    pub document_area: Color32,
    pub border: Color32,

    // Controls
    pub button: Color32,
    pub button_hover: Color32,
    pub accent: Color32,
    pub accent_text: Color32,

    pub error: Color32,
}

/// A theme definition with metadata and color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

/// Centralized theme manager providing access to the built-in themes
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    fallback: Theme,
}

impl ThemeManager {
    /// Creates a new ThemeManager initialized with all built-in themes
    pub fn new() -> Self {
        let mut themes = HashMap::new();

        themes.insert("Light".to_string(), light_theme());
        themes.insert("Dark".to_string(), dark_theme());

        Self {
            themes,
            fallback: light_theme(),
        }
    }

    /// Retrieves a theme by name
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Retrieves a theme by name, falling back to the default theme
    pub fn theme_or_default(&self, name: &str) -> &Theme {
        self.themes.get(name).unwrap_or(&self.fallback)
    }

    /// Returns a sorted list of all available theme names
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Applies a theme's colors to egui visuals
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.background;
        visuals.window_fill = colors.modal_background;
        visuals.extreme_bg_color = colors.document_area;
        visuals.window_stroke.color = colors.border;

        visuals.override_text_color = Some(colors.text);
        visuals.hyperlink_color = colors.link;

        visuals.widgets.inactive.weak_bg_fill = colors.button;
        visuals.widgets.inactive.bg_fill = colors.button;
        visuals.widgets.hovered.weak_bg_fill = colors.button_hover;
        visuals.widgets.hovered.bg_fill = colors.button_hover;
        visuals.widgets.active.bg_fill = colors.button_hover;

        visuals.selection.bg_fill = colors.accent;
        visuals.error_fg_color = colors.error;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "White page with a frosted light viewer".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#ffffff"),
            text: hex_to_color32("#171717"),
            text_dim: hex_to_color32("#4b5563"),
            link: hex_to_color32("#171717"),

            // bg-black/80
            backdrop: with_alpha(Color32::BLACK, 204),
            // bg-white/95
            modal_background: hex_to_color32("#fcfcfc"),
            modal_bar: hex_to_color32("#f9fafb"),
            // bg-gray-100/50
            document_area: hex_to_color32("#f3f4f6"),
            border: hex_to_color32("#e5e7eb"),

            button: hex_to_color32("#e5e7eb"),
            button_hover: hex_to_color32("#d1d5db"),
            // blue-500
            accent: hex_to_color32("#3b82f6"),
            accent_text: Color32::WHITE,

            // red-600
            error: hex_to_color32("#dc2626"),
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Near-black page with a dark viewer".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#0a0a0a"),
            text: hex_to_color32("#ededed"),
            text_dim: hex_to_color32("#a3a3a3"),
            link: hex_to_color32("#ededed"),

            backdrop: with_alpha(Color32::BLACK, 204),
            modal_background: hex_to_color32("#1f2937"),
            modal_bar: hex_to_color32("#111827"),
            document_area: hex_to_color32("#374151"),
            border: hex_to_color32("#4b5563"),

            button: hex_to_color32("#374151"),
            button_hover: hex_to_color32("#4b5563"),
            accent: hex_to_color32("#2563eb"),
            accent_text: Color32::WHITE,

            error: hex_to_color32("#f87171"),
        },
    }
}

/// Converts a hex color string (like "#3b82f6") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0)
    }
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
