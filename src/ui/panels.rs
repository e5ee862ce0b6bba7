use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;

const SUMMARY_TEXT: &str = "Dataset ini berisi informasi tentang penggunaan layanan berbagi sepeda, \
dengan fokus pada pengaruh cuaca, hari kerja, dan waktu dalam sehari terhadap jumlah penyewaan. \
Dataset telah dibersihkan untuk memastikan tidak ada nilai yang hilang atau anomali yang signifikan. \
Fitur utama dalam dataset mencakup waktu penyewaan, kondisi cuaca, suhu, kelembapan, kecepatan angin, \
serta jumlah pengguna casual dan registered.";

// ---------------------------------------------------------------------------
// Left side panel – image, header and display toggles
// ---------------------------------------------------------------------------

/// Render the sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    ui.label(RichText::new("🚲 Bike Sharing Insights").strong().size(16.0));
    ui.add_space(4.0);

    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(config.sidebar_image_url)
                .max_width(ui.available_width() * 0.9)
                .max_height(180.0)
                .rounding(4.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("🔍 Eksplorasi Data");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    ui.label(
        RichText::new(format!(
            "{} baris, {} kolom",
            dataset.len(),
            dataset.column_count()
        ))
        .weak(),
    );

    egui::CollapsingHeader::new(RichText::new("📊 Opsi Tampilan Data").strong())
        .id_salt("display_options")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for (label, flag) in state.options.toggles_mut() {
                if ui.checkbox(flag, label).changed() {
                    log::debug!("Toggle '{label}' set to {}", *flag);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Text sections of the main body
// ---------------------------------------------------------------------------

pub fn summary_section(ui: &mut Ui) {
    ui.heading("Ringkasan Informasi Dataset");
    ui.label(SUMMARY_TEXT);
}

pub fn duplicates_section(ui: &mut Ui, duplicates: usize) {
    ui.heading("Periksa Duplikasi");
    ui.label(format!("Jumlah Duplikasi: {duplicates}"));
}

pub fn footer(ui: &mut Ui, config: &DashboardConfig) {
    ui.label(RichText::new(config.footer_caption).small().weak());
}

/// Shown in place of the whole body when the dataset could not be loaded.
pub fn error_view(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::RED));
}
