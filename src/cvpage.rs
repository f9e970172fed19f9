//! Personal landing page with a modal résumé viewer.
//!
//! The page shows the owner's name and profile links. "View CV" opens a
//! modal viewer that loads the configured PDF in the background and lets
//! the user page through it, zoom, and download a copy.
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state, coordination and preference persistence
//! - `state/` - Theme state and per-viewer page state
//! - `ui/` - Landing page and viewer panels

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod state;
mod ui;

use app::{AppState, ApplicationCoordinator, ThemeCoordinator};
use cvpage::{DocumentLoader, DocumentRenderer, PdfiumRenderer, Profile};
use ui::panel_manager::{PanelInteraction, PanelManager};

#[derive(Parser, Debug)]
#[command(name = "cvpage", version, about = "Personal landing page with a résumé viewer")]
struct Args {
    /// Profile JSON (defaults to the per-user profile, then built-in values)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Override the document URL or path from the profile
    #[arg(long)]
    document: Option<String>,

    /// Open the viewer immediately
    #[arg(long)]
    open: bool,
}

/// Application entry point: parses arguments, loads the profile and launches the window.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cvpage=info")))
        .init();

    let args = Args::parse();

    let mut profile = Profile::resolve(args.profile.as_deref()).context("failed to load profile")?;
    if let Some(url) = args.document {
        profile.document.url = url;
    }
    tracing::info!(name = %profile.name, document = %profile.document.url, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_title(profile.name.clone()),
        ..Default::default()
    };

    let open_on_start = args.open;
    eframe::run_native(
        "cvpage",
        options,
        Box::new(move |cc| Ok(Box::new(CvPageApp::new(cc, profile, open_on_start)))),
    )
    .map_err(|e| anyhow::anyhow!("window terminated with error: {}", e))
}

/// The landing page application.
///
/// Most functionality is delegated:
/// - `ApplicationCoordinator` drives the viewer and the background loader
/// - `ThemeCoordinator` handles theme persistence and application
/// - `PanelManager` renders the UI and reports interactions
struct CvPageApp {
    /// Centralized application state
    state: AppState,
    /// Background document loader
    loader: DocumentLoader,
    /// Open the viewer on the first frame
    pending_open: bool,
}

impl CvPageApp {
    fn new(cc: &eframe::CreationContext, profile: Profile, open_on_start: bool) -> Self {
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);

        let repaint_ctx = cc.egui_ctx.clone();
        let loader = DocumentLoader::spawn(
            || PdfiumRenderer::new().map(|renderer| Box::new(renderer) as Box<dyn DocumentRenderer>),
            move || repaint_ctx.request_repaint(),
        );

        Self {
            state: AppState::with_theme(profile, theme_name),
            loader,
            pending_open: open_on_start,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction) {
        match interaction {
            PanelInteraction::OpenViewerRequested => {
                ApplicationCoordinator::open_viewer(&mut self.state, &self.loader);
            }
            PanelInteraction::Viewer(action) => {
                ApplicationCoordinator::handle_viewer_action(&mut self.state, &self.loader, action);
            }
            PanelInteraction::DownloadRequested => {
                ApplicationCoordinator::download_document(&mut self.state);
            }
        }
    }
}

impl eframe::App for CvPageApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
    }

    /// Main update loop:
    /// 1. Apply loader completions
    /// 2. Apply theme
    /// 3. Open the viewer if requested on the command line
    /// 4. Render panels and handle the resulting interaction
    /// 5. Request a render if the visible page changed
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loader_events(&mut self.state, &self.loader, ctx);

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        if std::mem::take(&mut self.pending_open) {
            ApplicationCoordinator::open_viewer(&mut self.state, &self.loader);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state) {
            self.handle_panel_interaction(interaction);
        }

        ApplicationCoordinator::request_page_render(&mut self.state, &self.loader, ctx.pixels_per_point());
    }
}

