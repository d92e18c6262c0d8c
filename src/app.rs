use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RunplotApp {
    pub state: AppState,
}

impl RunplotApp {
    /// Start with `dir` already loaded, if given.
    pub fn new(dir: Option<&Path>) -> Self {
        let mut app = Self::default();
        if let Some(dir) = dir {
            app.state.open_directory(dir);
        }
        app
    }
}

impl eframe::App for RunplotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: run sets ----
        egui::SidePanel::left("run_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::summary_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(dir: Option<&Path>) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let app = RunplotApp::new(dir);
    eframe::run_native(
        "runplot – Run Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
