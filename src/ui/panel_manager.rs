//! Panel orchestration and layout management.
//!
//! Lays out the landing page and, while the viewer is open, the modal
//! document viewer (header, content, footer). Collects every user intent
//! into a single [`PanelInteraction`] for the application to apply.

use crate::app::AppState;
use crate::ui::footer::{self, FooterInteraction};
use crate::ui::header::{self, HeaderInteraction, HeaderModel};
use crate::ui::landing::{self, LandingInteraction};
use crate::ui::page_view;
use cvpage::{ViewerAction, ViewerState};

const VIEWER_MAX_WIDTH: f32 = 1024.0;
const VIEWER_SCREEN_FRACTION: f32 = 0.9;

/// Result of panel interactions that need to be handled by the application coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelInteraction {
    /// User asked to open the viewer on the profile document
    OpenViewerRequested,
    /// A view-state transition (close, navigation, zoom)
    Viewer(ViewerAction),
    /// User asked to save a copy of the document
    DownloadRequested,
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders the whole UI for one frame.
    ///
    /// Called from the eframe::App::update() implementation.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut AppState) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let colors = state.theme.colors().clone();

        egui::TopBottomPanel::top("top_bar")
            .show_separator_line(false)
            .show(ctx, |ui| {
                landing::render_top_bar(ui, state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(LandingInteraction::OpenViewerRequested) =
                landing::render_landing(ui, &state.profile, &colors)
            {
                interaction = Some(PanelInteraction::OpenViewerRequested);
            }
        });

        if state.viewer.is_open() {
            if let Some(viewer_interaction) = Self::render_viewer(ctx, state) {
                interaction = Some(viewer_interaction);
            }
        }

        interaction
    }

    /// Renders the modal viewer. Clicking the backdrop or pressing Escape closes it.
    fn render_viewer(ctx: &egui::Context, state: &AppState) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let colors = state.theme.colors();

        let screen = ctx.content_rect();
        let size = egui::vec2(
            (screen.width() * VIEWER_SCREEN_FRACTION).min(VIEWER_MAX_WIDTH),
            screen.height() * VIEWER_SCREEN_FRACTION,
        );

        let frame = egui::Frame::new()
            .fill(colors.modal_background)
            .stroke(egui::Stroke::new(1.0, colors.border))
            .corner_radius(16.0);

        let modal = egui::Modal::new(egui::Id::new("document_viewer"))
            .backdrop_color(colors.backdrop)
            .frame(frame)
            .show(ctx, |ui| {
                ui.set_min_size(size);
                ui.set_max_size(size);

                let bar_frame = egui::Frame::new()
                    .fill(colors.modal_bar)
                    .inner_margin(egui::Margin::symmetric(24, 16));

                egui::TopBottomPanel::top("viewer_header")
                    .frame(bar_frame)
                    .show_inside(ui, |ui| {
                        let model = HeaderModel {
                            title: &state.profile.document.title,
                            can_download: state.page.can_download(),
                            status_message: state.status_message.as_deref(),
                        };
                        if let Some(header_interaction) = header::render_header(ui, &state.viewer, &model, colors) {
                            interaction = Some(match header_interaction {
                                HeaderInteraction::ZoomIn => PanelInteraction::Viewer(ViewerAction::ZoomIn),
                                HeaderInteraction::ZoomOut => PanelInteraction::Viewer(ViewerAction::ZoomOut),
                                HeaderInteraction::DownloadRequested => PanelInteraction::DownloadRequested,
                                HeaderInteraction::CloseRequested => PanelInteraction::Viewer(ViewerAction::Close),
                            });
                        }
                    });

                if let Some(view) = state.viewer.page_view().filter(|view| view.show_page_controls()) {
                    egui::TopBottomPanel::bottom("viewer_footer")
                        .frame(bar_frame)
                        .show_inside(ui, |ui| {
                            if let Some(footer_interaction) = footer::render_page_navigation(ui, &view, colors) {
                                interaction = Some(PanelInteraction::Viewer(match footer_interaction {
                                    FooterInteraction::PreviousPage => ViewerAction::PreviousPage,
                                    FooterInteraction::NextPage => ViewerAction::NextPage,
                                }));
                            }
                        });
                }

                egui::CentralPanel::default()
                    .frame(egui::Frame::new().fill(colors.document_area).inner_margin(egui::Margin::same(24)))
                    .show_inside(ui, |ui| {
                        page_view::render_page_view(ui, &state.viewer, &state.page, colors);
                    });
            });

        if modal.should_close() {
            return Some(PanelInteraction::Viewer(ViewerAction::Close));
        }

        interaction.or_else(|| Self::keyboard_shortcut(ctx, &state.viewer))
    }

    /// Maps navigation and zoom keys while a page is shown.
    fn keyboard_shortcut(ctx: &egui::Context, viewer: &ViewerState) -> Option<PanelInteraction> {
        viewer.page_view()?;

        let action = ctx.input(|input| {
            if input.key_pressed(egui::Key::ArrowRight) || input.key_pressed(egui::Key::PageDown) {
                Some(ViewerAction::NextPage)
            } else if input.key_pressed(egui::Key::ArrowLeft) || input.key_pressed(egui::Key::PageUp) {
                Some(ViewerAction::PreviousPage)
            } else if input.key_pressed(egui::Key::Plus) || input.key_pressed(egui::Key::Equals) {
                Some(ViewerAction::ZoomIn)
            } else if input.key_pressed(egui::Key::Minus) {
                Some(ViewerAction::ZoomOut)
            } else {
                None
            }
        })?;

        Some(PanelInteraction::Viewer(action))
    }
}
