use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, MarkerShape, Plot, Points};

use crate::color::{self, CategoryColors};
use crate::data::aggregate::{GroupMean, HourlyMean, Summaries, WorkingDayMeans};

// ---------------------------------------------------------------------------
// Chart geometry (pure, independent of egui state)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    /// Share of the whole pie, 0..=1.
    pub fraction: f64,
    pub color: Color32,
}

impl PieSlice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// Slices in weekend, weekday order. Groups without a positive finite mean
/// are left out.
pub fn pie_slices(means: &WorkingDayMeans) -> Vec<PieSlice> {
    let drawable: Vec<(&'static str, f64, Color32)> = means
        .pairs()
        .into_iter()
        .zip(color::WORKING_DAY_COLORS)
        .filter(|((_, value), _)| value.is_finite() && *value > 0.0)
        .map(|((label, value), color)| (label, value, color))
        .collect();
    let total: f64 = drawable.iter().map(|(_, v, _)| v).sum();

    drawable
        .into_iter()
        .map(|(label, value, color)| PieSlice {
            label,
            fraction: value / total,
            color,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherBar {
    pub label: String,
    pub mean: f64,
    /// Position on the category axis; the largest mean sits lowest.
    pub position: f64,
    pub color: Color32,
}

/// One bar per weather group, coloured along viridis in descending-mean order.
pub fn weather_bars(groups: &[GroupMean]) -> Vec<WeatherBar> {
    let colors = CategoryColors::viridis(groups.iter().map(|g| g.label.as_str()));
    groups
        .iter()
        .enumerate()
        .map(|(i, g)| WeatherBar {
            label: g.label.clone(),
            mean: g.mean,
            position: i as f64,
            color: colors.color_for(&g.label),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlySeries {
    pub casual: Vec<[f64; 2]>,
    pub registered: Vec<[f64; 2]>,
}

pub fn hourly_series(trend: &[HourlyMean]) -> HourlySeries {
    HourlySeries {
        casual: trend.iter().map(|h| [f64::from(h.hour), h.casual]).collect(),
        registered: trend
            .iter()
            .map(|h| [f64::from(h.hour), h.registered])
            .collect(),
    }
}

/// A tick on every hour of the day.
pub fn hour_marks() -> Vec<GridMark> {
    (0..24)
        .map(|h| GridMark {
            value: f64::from(h),
            step_size: 1.0,
        })
        .collect()
}

fn category_marks(count: usize) -> Vec<GridMark> {
    (0..count)
        .map(|i| GridMark {
            value: i as f64,
            step_size: 1.0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Visualisations section
// ---------------------------------------------------------------------------

/// Pie, bar and line charts in that order.
pub fn visualizations(ui: &mut Ui, summaries: &Summaries) {
    ui.heading("Visualisasi Data");
    ui.add_space(4.0);

    working_day_pie(ui, &summaries.working_day);
    ui.add_space(12.0);
    weather_bar_chart(ui, &summaries.weather);
    ui.add_space(12.0);
    hourly_line_chart(ui, &summaries.hourly);
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong().size(15.0));
}

// ---------------------------------------------------------------------------
// Pie chart: weekend vs working day
// ---------------------------------------------------------------------------

pub fn working_day_pie(ui: &mut Ui, means: &WorkingDayMeans) {
    chart_title(ui, "Rata-rata Penyewaan Sepeda: Hari Kerja vs Akhir Pekan");

    let slices = pie_slices(means);
    if slices.is_empty() {
        ui.label("—");
        return;
    }

    let size = 300.0;
    let (rect, _response) =
        ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let center = rect.center();
    let radius = size * 0.36;
    let painter = ui.painter();

    // Counter-clockwise from three o'clock; screen y grows downwards.
    let point_at = |angle: f32, r: f32| center + egui::vec2(angle.cos(), -angle.sin()) * r;

    let mut start = 0.0_f32;
    for slice in &slices {
        let sweep = slice.fraction as f32 * TAU;
        let steps = ((sweep / (TAU / 128.0)).ceil() as usize).max(1);

        let mut mesh = egui::Mesh::default();
        mesh.colored_vertex(center, slice.color);
        for j in 0..=steps {
            let angle = start + sweep * j as f32 / steps as f32;
            mesh.colored_vertex(point_at(angle, radius), slice.color);
        }
        for j in 0..steps as u32 {
            mesh.add_triangle(0, j + 1, j + 2);
        }
        painter.add(egui::Shape::mesh(mesh));

        let mid = start + sweep / 2.0;
        painter.text(
            point_at(mid, radius * 1.18),
            Align2::CENTER_CENTER,
            slice.label,
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
        painter.text(
            point_at(mid, radius * 0.6),
            Align2::CENTER_CENTER,
            slice.percent_label(),
            FontId::proportional(13.0),
            Color32::BLACK,
        );
        start += sweep;
    }

    painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::WHITE));
}

// ---------------------------------------------------------------------------
// Horizontal bar chart: weather vs mean rentals
// ---------------------------------------------------------------------------

pub fn weather_bar_chart(ui: &mut Ui, groups: &[GroupMean]) {
    chart_title(ui, "Pengaruh Cuaca terhadap Rata-rata Penyewaan Sepeda");

    let bars = weather_bars(groups);
    if bars.is_empty() {
        ui.label("—");
        return;
    }

    let count = bars.len();
    let axis_labels: Vec<(f64, String)> = bars
        .iter()
        .map(|b| (b.position, b.label.clone()))
        .collect();

    Plot::new("weather_bar_chart")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label("Rata-rata Jumlah Penyewaan")
        .y_axis_label("Kondisi Cuaca")
        .include_x(0.0)
        .y_grid_spacer(move |_input| category_marks(count))
        .y_axis_formatter(move |mark, _range| {
            axis_labels
                .iter()
                .find(|(pos, _)| (pos - mark.value).abs() < 1e-6)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for bar in bars {
                let chart = BarChart::new(vec![Bar::new(bar.position, bar.mean)
                    .name(&bar.label)
                    .width(0.7)])
                .horizontal()
                .color(bar.color)
                .name(&bar.label);
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Line chart: casual vs registered per hour
// ---------------------------------------------------------------------------

pub fn hourly_line_chart(ui: &mut Ui, trend: &[HourlyMean]) {
    chart_title(
        ui,
        "Perbandingan Pola Penyewaan Sepeda antara Casual dan Registered per Jam",
    );

    let series = hourly_series(trend);

    Plot::new("hourly_line_chart")
        .height(360.0)
        .legend(Legend::default())
        .x_axis_label("Jam dalam Sehari")
        .y_axis_label("Rata-rata Jumlah Penyewaan Sepeda")
        .x_grid_spacer(|_input| hour_marks())
        .show_grid([false, true])
        .include_x(-0.5)
        .include_x(23.5)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let lines = [
                ("Casual", series.casual, color::CASUAL_BLUE, MarkerShape::Circle),
                (
                    "Registered",
                    series.registered,
                    color::REGISTERED_RED,
                    MarkerShape::Square,
                ),
            ];
            for (name, points, color, marker) in lines {
                plot_ui.line(Line::new(points.clone()).name(name).color(color).width(2.0));
                plot_ui.points(
                    Points::new(points)
                        .name(name)
                        .color(color)
                        .shape(marker)
                        .filled(true)
                        .radius(3.5),
                );
            }
        });
    ui.label(RichText::new("Tipe Pengguna: Casual, Registered").small().weak());
}
