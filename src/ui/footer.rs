//! Viewer footer UI rendering
//!
//! Previous / "Page N of M" / Next, only shown for multi-page documents.

use cvpage::{PageView, ThemeColors};
use egui::RichText;

const FOOTER_ROW_WIDTH: f32 = 280.0;

/// Result of user interaction with the page navigation
pub enum FooterInteraction {
    PreviousPage,
    NextPage,
}

/// Renders the page navigation row for `view`.
pub fn render_page_navigation(ui: &mut egui::Ui, view: &PageView, colors: &ThemeColors) -> Option<FooterInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - FOOTER_ROW_WIDTH) / 2.0).max(0.0));

        if ui.add_enabled(view.can_go_previous(), egui::Button::new("Previous")).clicked() {
            interaction = Some(FooterInteraction::PreviousPage);
        }

        ui.add_space(12.0);
        ui.label(RichText::new(view.page_label()).color(colors.text_dim));
        ui.add_space(12.0);

        if ui.add_enabled(view.can_go_next(), egui::Button::new("Next")).clicked() {
            interaction = Some(FooterInteraction::NextPage);
        }
    });

    interaction
}
