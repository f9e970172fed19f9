//! Landing page UI rendering
//!
//! A centered name heading with the owner's links on one line and a button
//! that opens the document viewer. The theme selector sits in the top bar.

use crate::app::AppState;
use cvpage::{Profile, ThemeColors};
use egui::{FontId, RichText};

const LINK_SEPARATOR: &str = "•";
const LINK_FONT_SIZE: f32 = 18.0;

/// Result of user interaction with the landing page
pub enum LandingInteraction {
    /// User clicked "View CV"
    OpenViewerRequested,
}

/// Renders the top bar with the theme selector pushed to the right.
pub fn render_top_bar(ui: &mut egui::Ui, state: &mut AppState) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let old_theme = state.theme.current_theme_name().to_string();
        let mut current_theme = old_theme.clone();
        egui::ComboBox::from_id_salt("theme_selector")
            .selected_text(&current_theme)
            .show_ui(ui, |ui| {
                for theme_name in state.theme.theme_manager().list_themes() {
                    ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                }
            });

        if old_theme != current_theme {
            tracing::debug!(theme = %current_theme, "theme changed");
            state.theme.set_theme(current_theme);
            ui.ctx().request_repaint();
        }

        ui.label("Theme:");
    });
}

/// Renders the landing page body
///
/// # Returns
/// * `Option<LandingInteraction>` - User interaction result
pub fn render_landing(ui: &mut egui::Ui, profile: &Profile, colors: &ThemeColors) -> Option<LandingInteraction> {
    let mut interaction = None;

    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() / 2.0 - 110.0).max(0.0));

        ui.label(RichText::new(&profile.name).size(36.0).strong().color(colors.text));
        ui.add_space(24.0);

        render_links(ui, profile);
        ui.add_space(32.0);

        let button = egui::Button::new(
            RichText::new("📄 View CV").size(16.0).color(colors.accent_text),
        )
        .fill(colors.accent)
        .corner_radius(8.0);
        if ui.add(button).clicked() {
            interaction = Some(LandingInteraction::OpenViewerRequested);
        }
    });

    interaction
}

/// Lays the links out on one centered line, separated by bullets.
fn render_links(ui: &mut egui::Ui, profile: &Profile) {
    if profile.links.is_empty() {
        return;
    }

    let font = FontId::proportional(LINK_FONT_SIZE);
    let spacing = ui.spacing().item_spacing.x;
    let text_width = |ui: &egui::Ui, text: &str| {
        ui.painter()
            .layout_no_wrap(text.to_string(), font.clone(), egui::Color32::PLACEHOLDER)
            .size()
            .x
    };

    let links_width: f32 = profile.links.iter().map(|link| text_width(ui, &link.label)).sum();
    let separators = profile.links.len() - 1;
    let separator_width = text_width(ui, LINK_SEPARATOR) + 2.0 * spacing;
    let row_width = links_width + separators as f32 * (separator_width + spacing);

    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
        for (index, link) in profile.links.iter().enumerate() {
            if index > 0 {
                ui.add_space(spacing);
                ui.label(RichText::new(LINK_SEPARATOR).size(LINK_FONT_SIZE));
                ui.add_space(spacing);
            }
            ui.hyperlink_to(RichText::new(&link.label).size(LINK_FONT_SIZE), &link.url);
        }
    });
}
