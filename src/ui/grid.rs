use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data grid (central panel)
// ---------------------------------------------------------------------------

/// Render the visible rows of the loaded table.
pub fn table_grid(ui: &mut Ui, state: &AppState) {
    let table = match &state.table {
        Some(t) => t,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a spreadsheet to view it  (File → Open…, or drop a file here)");
            });
            return;
        }
    };

    if table.columns.is_empty() {
        ui.label("The first worksheet has no header row.");
        return;
    }

    let rows = state.visible_rows();
    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    // Column widths are remembered per id; a new table gets a fresh id.
    ui.push_id(("grid", state.generation), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(40.0))
            .columns(
                Column::initial(140.0).at_least(40.0).clip(true),
                table.columns.len(),
            )
            .min_scrolled_height(0.0)
            .header(row_height, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for col in &table.columns {
                    header.col(|ui| {
                        ui.strong(&col.title);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, rows.len(), |mut row| {
                    let record = rows[row.index()];
                    row.col(|ui| {
                        ui.label(record.id.to_string());
                    });
                    for col in &table.columns {
                        row.col(|ui| {
                            if let Some(text) = record.text(&col.key) {
                                ui.label(text);
                            }
                        });
                    }
                });
            });
    });
}
