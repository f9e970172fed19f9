//! Document content area
//!
//! Shows the loading placeholder, the rendered page, or the static failure
//! message, depending on the viewer's content state.

use crate::state::PageState;
use cvpage::{ThemeColors, ViewerContent, ViewerState, LOADING_MESSAGE, LOAD_FAILURE_MESSAGE};
use egui::RichText;

const MESSAGE_PADDING: f32 = 48.0;

/// Renders the scrollable content area of the open viewer.
pub fn render_page_view(ui: &mut egui::Ui, viewer: &ViewerState, page: &PageState, colors: &ThemeColors) {
    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                match viewer.content() {
                    Some(ViewerContent::Loading) => render_message(ui, LOADING_MESSAGE, colors.text_dim),
                    Some(ViewerContent::Error) => render_message(ui, LOAD_FAILURE_MESSAGE, colors.error),
                    Some(ViewerContent::Ready(_)) => render_page(ui, viewer, page, colors),
                    None => {}
                }
                ui.add_space(24.0);
            });
        });
}

fn render_message(ui: &mut egui::Ui, message: &str, color: egui::Color32) {
    ui.add_space(MESSAGE_PADDING);
    ui.label(RichText::new(message).size(16.0).color(color));
}

fn render_page(ui: &mut egui::Ui, viewer: &ViewerState, page: &PageState, colors: &ThemeColors) {
    let displayed = viewer
        .document()
        .and_then(|document| page.displayed_for(document.ticket));

    match displayed {
        Some(displayed) => {
            egui::Frame::new()
                .fill(egui::Color32::WHITE)
                .stroke(egui::Stroke::new(1.0, colors.border))
                .show(ui, |ui| {
                    ui.add(egui::Image::from_texture(egui::load::SizedTexture::new(
                        displayed.texture.id(),
                        displayed.size(),
                    )));
                });
            if page.is_rendering() {
                ui.spinner();
            }
        }
        None => {
            ui.add_space(MESSAGE_PADDING);
            ui.spinner();
        }
    }
}
