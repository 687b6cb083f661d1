use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – column selection and results
// ---------------------------------------------------------------------------

/// Render the analysis panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    ui.heading("Analysis");
    ui.separator();

    if state.table.is_none() {
        ui.label("No file imported.");
        return;
    }
    if state.selectable.is_empty() {
        ui.label("The imported file has no numeric columns.");
        return;
    }

    let columns = state.selectable.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Select a Column for Analysis:");
            if let Some(choice) = column_combo(ui, "primary_column", state.primary.as_deref(), &columns) {
                state.set_primary(choice);
            }

            if state.primary.is_some() {
                ui.add_space(8.0);
                ui.strong("Select a Second Column for Correlation:");
                if let Some(choice) =
                    column_combo(ui, "secondary_column", state.secondary.as_deref(), &columns)
                {
                    state.set_secondary(choice);
                }
            }

            ui.add_space(8.0);
            let mut exclude = state.options.exclude_dates;
            if ui
                .checkbox(&mut exclude, "Ignore date-formatted cells in statistics")
                .changed()
            {
                state.set_exclude_dates(exclude);
            }

            ui.separator();
            results(ui, state, config);
        });
}

/// A column picker with an empty "Select a Column" entry.
/// Returns `Some(new_selection)` when the user changed it.
fn column_combo(
    ui: &mut Ui,
    id: &str,
    current: Option<&str>,
    columns: &[String],
) -> Option<Option<String>> {
    let mut changed = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or("Select a Column"))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "Select a Column").clicked()
                && current.is_some()
            {
                changed = Some(None);
            }
            for col in columns {
                let is_current = current == Some(col.as_str());
                if ui.selectable_label(is_current, col).clicked() && !is_current {
                    changed = Some(Some(col.clone()));
                }
            }
        });
    changed
}

fn results(ui: &mut Ui, state: &AppState, config: &DashboardConfig) {
    let Some(analysis) = &state.analysis else {
        return;
    };

    ui.label(format!(
        "{} numeric values in '{}'",
        analysis.descriptive.count, analysis.primary
    ));
    if let Some((other, b)) = &analysis.secondary {
        ui.label(format!("{} numeric values in '{other}'", b.len_b));
    }
    ui.add_space(4.0);

    egui::Grid::new("results_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (label, value) in analysis.lines(config.summary_decimals, config.test_decimals) {
                ui.label(format!("{label}:"));
                ui.label(RichText::new(value).strong());
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns `true` when an import was requested.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) -> bool {
    let mut import_clicked = false;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Choose file…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong(&config.title);
        ui.separator();

        if ui.button("Choose file…").clicked() {
            open_file_dialog(state);
        }
        match &state.chosen_file {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(name);
            }
            None => {
                ui.weak("No file chosen");
            }
        }

        if ui
            .add_enabled(!state.loading, egui::Button::new("IMPORT FILE"))
            .clicked()
        {
            import_clicked = true;
        }
        if state.loading {
            ui.spinner();
        }

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows, {} columns ({} numeric)",
                table.len(),
                table.headers.len(),
                state.selectable.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    import_clicked
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Choose a data file")
        .add_filter("Supported files", &["csv", "xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        log::debug!("Chose {}", path.display());
        state.choose_file(path);
    }
}
