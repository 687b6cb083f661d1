use eframe::egui;

use crate::config::DashboardConfig;
use crate::import::Importer;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct QcsDashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
    importer: Importer,
}

impl QcsDashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Validate the chosen file and hand it to the background importer.
    fn request_import(&mut self, ctx: &egui::Context) {
        let started = self
            .state
            .begin_import()
            .and_then(|path| self.importer.start(&path, ctx));
        match started {
            Ok(_) => {
                self.state.loading = true;
                self.state.status_message = None;
            }
            Err(e) => self.state.reject_import(e),
        }
    }
}

impl eframe::App for QcsDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(outcome) = self.importer.poll() {
            self.state.finish_import(outcome);
        }
        self.state.loading = self.importer.is_busy();

        // ---- Top panel: menu bar ----
        let mut import_clicked = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            import_clicked = panels::top_bar(ui, &mut self.state, &self.config);
        });
        if import_clicked {
            self.request_import(ctx);
        }

        // ---- Left side panel: column selection and results ----
        egui::SidePanel::left("analysis_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.config);
            });

        // ---- Central panel: data table and scatter plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::data_table(ui, &self.state, &self.config);
            ui.separator();
            plot::scatter_plot(ui, &self.state);
        });
    }
}
