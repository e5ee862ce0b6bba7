use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::display::{render_plan, Section};
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl DashboardApp {
    pub fn new(state: AppState, config: DashboardConfig) -> Self {
        Self { state, config }
    }

    /// The main body: title, then every section the toggles allow.
    fn body(&self, ui: &mut Ui) {
        ui.heading(egui::RichText::new(self.config.page_title).size(26.0));
        ui.add_space(8.0);

        if let Some(message) = &self.state.load_error {
            panels::error_view(ui, message);
            return;
        }
        let Some((dataset, summaries)) = self.state.loaded() else {
            return;
        };

        let plan = render_plan(&self.state.options);
        log::trace!("Render plan: {plan:?}");

        for section in plan {
            match section {
                Section::Summary => panels::summary_section(ui),
                Section::FirstRows => tables::first_rows_table(ui, &dataset.frame),
                Section::Duplicates => panels::duplicates_section(ui, summaries.duplicates),
                Section::Statistics => tables::statistics_table(ui, &summaries.statistics),
                Section::Visualizations => plot::visualizations(ui, summaries),
                Section::Footer => {
                    ui.separator();
                    panels::footer(ui, &self.config);
                }
            }
            ui.add_space(12.0);
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Left side panel: image + display options ----
        if self.state.load_error.is_none() {
            egui::SidePanel::left("sidebar")
                .default_width(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state, &self.config);
                });
        }

        // ---- Central panel: dashboard body ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| self.body(ui));
        });
    }
}
