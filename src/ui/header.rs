//! Viewer header UI rendering
//!
//! Title on the left; zoom controls, download and close on the right.

use cvpage::viewer::DEFAULT_SCALE_PERCENT;
use cvpage::{ThemeColors, ViewerState};
use egui::RichText;

/// Result of user interaction with the viewer header
pub enum HeaderInteraction {
    ZoomIn,
    ZoomOut,
    DownloadRequested,
    CloseRequested,
}

/// Inputs for one frame of the header
pub struct HeaderModel<'a> {
    pub title: &'a str,
    pub can_download: bool,
    pub status_message: Option<&'a str>,
}

/// Renders the viewer header
///
/// Zoom buttons stay visible while loading but are disabled until a page is
/// shown, and at the zoom bounds.
pub fn render_header(
    ui: &mut egui::Ui,
    viewer: &ViewerState,
    model: &HeaderModel<'_>,
    colors: &ThemeColors,
) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(model.title).size(20.0).strong().color(colors.text));

        // Right-to-left: the first widget added is the rightmost.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(egui::Button::new(RichText::new("✕").size(18.0)).frame(false))
                .on_hover_text("Close")
                .clicked()
            {
                interaction = Some(HeaderInteraction::CloseRequested);
            }

            let download = egui::Button::new(RichText::new("⬇ Download").color(colors.accent_text))
                .fill(colors.accent)
                .corner_radius(8.0);
            if ui
                .add_enabled(model.can_download, download)
                .on_disabled_hover_text("Available once the document has loaded")
                .clicked()
            {
                interaction = Some(HeaderInteraction::DownloadRequested);
            }

            ui.add_space(12.0);

            if ui.add_enabled(viewer.can_zoom_in(), egui::Button::new("+")).clicked() {
                interaction = Some(HeaderInteraction::ZoomIn);
            }

            let zoom_label = viewer
                .page_view()
                .map(|view| view.zoom_label())
                .unwrap_or_else(|| format!("{}%", DEFAULT_SCALE_PERCENT));
            ui.add_sized(
                [48.0, ui.available_height()],
                egui::Label::new(RichText::new(zoom_label).color(colors.text_dim)),
            );

            if ui.add_enabled(viewer.can_zoom_out(), egui::Button::new("−")).clicked() {
                interaction = Some(HeaderInteraction::ZoomOut);
            }
        });
    });

    if let Some(message) = model.status_message {
        ui.label(RichText::new(message).small().color(colors.text_dim));
    }

    interaction
}
