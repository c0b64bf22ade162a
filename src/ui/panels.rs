use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_sheet::data::SourceFormat;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – per-column filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Column filters");
    ui.separator();

    let columns = match &state.table {
        Some(table) => table.columns.clone(),
        None => {
            ui.label("No table loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in &columns {
                ui.strong(&col.title);

                let mut input = state
                    .column_inputs
                    .get(&col.key)
                    .cloned()
                    .unwrap_or_default();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut input)
                        .id_salt(("column_filter", state.generation, &col.key))
                        .hint_text("contains… (a, b)"),
                );
                if response.changed() {
                    state.set_column_input(&col.key, &input);
                }
                ui.add_space(4.0);
            }

            ui.separator();
            if ui
                .add_enabled(state.filters.is_active(), egui::Button::new("Clear filters"))
                .clicked()
            {
                state.clear_filters();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the global search box.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.visible_indices.is_empty();
            if ui.add_enabled(can_export, egui::Button::new("Export…")).clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let mut query = state.filters.query.clone();
        let search = ui.add_enabled(
            state.table.is_some(),
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search across all columns...")
                .desired_width(260.0),
        );
        if search.changed() {
            state.set_query(&query);
        }

        ui.separator();

        if let Some(table) = &state.table {
            if let Some(name) = state.source.as_deref().and_then(|p| p.file_name()) {
                ui.strong(name.to_string_lossy().into_owned());
            }
            ui.label(format!(
                "{} rows loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open spreadsheet")
        .add_filter("Supported files", SourceFormat::EXTENSIONS)
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export visible rows")
        .set_file_name(&state.export_options.file_name)
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    let Some(path) = file else { return };
    match state.export_visible(&path) {
        Ok(n) => {
            state.status_message = Some(format!("Exported {n} rows to {}", path.display()));
        }
        Err(e) => {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
