use eframe::egui;

use crate::state::AppState;
use crate::ui::{grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RustySheetApp {
    pub state: AppState,
}

impl eframe::App for RustySheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Dropped files: load the first one ----
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.state.load_path(&path);
        }

        // ---- Top panel: menu bar + search ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: column filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            grid::table_grid(ui, &self.state);
        });
    }
}
