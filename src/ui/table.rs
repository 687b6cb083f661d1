use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::DashboardConfig;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data table (central panel, top)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 20.0;

/// Render every imported row in a scrollable, striped table.
pub fn data_table(ui: &mut Ui, state: &AppState, config: &DashboardConfig) {
    let table = match &state.table {
        Some(t) => t,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Choose a .csv, .xlsx or .xls file and press IMPORT FILE");
            });
            return;
        }
    };
    if table.is_empty() {
        ui.label(format!("No data rows under {} column headers.", table.headers.len()));
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt("data_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(true)
                .max_scroll_height(config.table_max_height)
                .column(Column::auto().at_least(32.0))
                .columns(
                    Column::initial(100.0).at_least(40.0).clip(true),
                    table.headers.len(),
                )
                .header(ROW_HEIGHT, |mut header| {
                    header.col(|ui| {
                        ui.strong("id");
                    });
                    for name in &table.headers {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.len(), |mut row| {
                        let record = &table.rows[row.index()];
                        row.col(|ui| {
                            ui.label(RichText::new(record.id.to_string()).weak());
                        });
                        for pos in 0..table.headers.len() {
                            row.col(|ui| {
                                ui.label(record.cells.get(pos).map(String::as_str).unwrap_or(""));
                            });
                        }
                    });
                });
        });
}
