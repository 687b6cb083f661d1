use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::data::column::extract_pairs;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (central panel, bottom)
// ---------------------------------------------------------------------------

/// Plot the second selected column against the first, one point per row
/// where both cells are numeric.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(x_col), Some(y_col)) =
        (&state.table, &state.primary, &state.secondary)
    else {
        if state.table.is_some() {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Select two columns to see a scatter plot.");
            });
        }
        return;
    };

    let pairs = extract_pairs(table, x_col, y_col, state.options);
    let n = pairs.len();
    let points: PlotPoints = pairs.into_iter().collect();

    Plot::new("scatter_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_col.as_str())
        .y_axis_label(y_col.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name(format!("{y_col} vs {x_col} ({n} rows)"))
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}
