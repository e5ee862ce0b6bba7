mod app;
mod color;
mod config;
mod data;
mod display;
mod state;
mod ui;

use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();

    // The file is read once, before the first frame. A failure is kept in
    // the state and shown instead of the dashboard.
    let state = AppState::from_load(data::loader::load_file(&config.data_path));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    eframe::run_native(
        config.window_title,
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch and decode the sidebar image.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(state, config)))
        }),
    )
}
