use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use polars::prelude::{AnyValue, DataFrame, PolarsResult};

use crate::data::aggregate::ColumnStats;

const ROW_HEIGHT: f32 = 18.0;
const FIRST_ROWS: usize = 5;

/// Row labels of the statistics table, top to bottom.
pub const STAT_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.4}")
    }
}

/// Text of one preview cell. Missing values read `NaN`, like the statistics.
fn cell_text(value: AnyValue) -> String {
    match value {
        AnyValue::Null => "NaN".to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format_stat(v),
        AnyValue::Float32(v) => format_stat(f64::from(v)),
        other => other.to_string(),
    }
}

/// Index label and cell texts of the first `n` rows, in file order.
pub fn preview_rows(frame: &DataFrame, n: usize) -> PolarsResult<Vec<(String, Vec<String>)>> {
    let head = frame.head(Some(n));
    (0..head.height())
        .map(|i| {
            let cells = head
                .get_columns()
                .iter()
                .map(|col| col.as_materialized_series().get(i).map(cell_text))
                .collect::<PolarsResult<Vec<String>>>()?;
            Ok((i.to_string(), cells))
        })
        .collect()
}

/// Cells of the statistics table: one row per statistic, one cell per column.
pub fn statistics_rows(stats: &[ColumnStats]) -> Vec<(&'static str, Vec<String>)> {
    let pick: [fn(&ColumnStats) -> String; 8] = [
        |s| s.count.to_string(),
        |s| format_stat(s.mean),
        |s| format_stat(s.std),
        |s| format_stat(s.min),
        |s| format_stat(s.q1),
        |s| format_stat(s.median),
        |s| format_stat(s.q3),
        |s| format_stat(s.max),
    ];
    STAT_ROWS
        .into_iter()
        .zip(pick)
        .map(|(name, f)| (name, stats.iter().map(f).collect()))
        .collect()
}

/// Draw a table with a leading index column and one column per header.
fn grid(ui: &mut Ui, id: &str, headers: &[&str], rows: &[(String, Vec<String>)]) {
    ui.push_id(id, |ui: &mut Ui| {
        ScrollArea::horizontal()
            .id_salt(id)
            .show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .vscroll(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(40.0))
                    .columns(Column::auto().at_least(80.0), headers.len())
                    .header(22.0, |mut header| {
                        header.col(|ui: &mut Ui| {
                            ui.strong("");
                        });
                        for name in headers {
                            header.col(|ui: &mut Ui| {
                                ui.strong(*name);
                            });
                        }
                    })
                    .body(|mut body| {
                        for (index, cells) in rows {
                            body.row(ROW_HEIGHT, |mut row| {
                                row.col(|ui: &mut Ui| {
                                    ui.strong(index);
                                });
                                for cell in cells {
                                    row.col(|ui: &mut Ui| {
                                        ui.label(cell);
                                    });
                                }
                            });
                        }
                    });
            });
    });
}

/// The first five rows of the frame, in file order.
pub fn first_rows_table(ui: &mut Ui, frame: &DataFrame) {
    ui.heading("Lima Baris Pertama DataFrame");

    let rows = match preview_rows(frame, FIRST_ROWS) {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("Cannot preview rows: {e}");
            ui.label(format!("Gagal menampilkan data: {e}"));
            return;
        }
    };
    let headers: Vec<&str> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();

    grid(ui, "first_rows", &headers, &rows);
}

/// Descriptive statistics of every numeric column.
pub fn statistics_table(ui: &mut Ui, stats: &[ColumnStats]) {
    ui.heading("Ringkasan Statistik DataFrame");

    let headers: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
    let rows: Vec<(String, Vec<String>)> = statistics_rows(stats)
        .into_iter()
        .map(|(name, cells)| (name.to_string(), cells))
        .collect();

    grid(ui, "statistics", &headers, &rows);
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use polars::prelude::{NamedFrom, Series};

    use super::*;
    use crate::data::loader::load_reader;

    #[test]
    fn preview_shows_first_rows_with_nan_for_missing_cells() -> Result<()> {
        let text = "dteday,workingday_day,cnt_day,weather_label,hr,casual_hour,registered_hour,temp_day\n\
                    2011-01-01,0,985,Cerah,0,3,13,0.25\n\
                    2011-01-01,0,985,Cerah,1,8,32,\n\
                    2011-01-01,0,985,Cerah,2,5,27,0.5\n\
                    2011-01-01,0,985,Cerah,3,3,10,0.5\n\
                    2011-01-01,0,985,Cerah,4,0,1,0.5\n\
                    2011-01-01,0,985,Cerah,5,0,1,0.5";
        let ds = load_reader(text.as_bytes())?;
        let rows = preview_rows(&ds.frame, FIRST_ROWS)?;

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].0, "0");
        assert_eq!(
            rows[0].1,
            ["2011-01-01", "0", "985", "Cerah", "0", "3", "13", "0.2500"]
        );
        assert_eq!(rows[1].1[7], "NaN");
        assert_eq!(rows[4].0, "4");
        Ok(())
    }

    #[test]
    fn statistics_rows_are_laid_out_per_statistic() -> Result<()> {
        let stats = vec![
            ColumnStats::from_series(&Series::new("cnt_day".into(), &[1.0, 2.0, 3.0, 4.0]))?,
            ColumnStats::from_series(&Series::new("hr".into(), &[5.0]))?,
        ];
        let rows = statistics_rows(&stats);

        let names: Vec<&str> = rows.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, STAT_ROWS);
        assert_eq!(rows[0].1, vec!["4", "1"]);
        assert_eq!(rows[1].1, vec!["2.5000", "5.0000"]);
        assert_eq!(rows[2].1[1], "NaN");
        assert_eq!(rows[4].1[0], "1.7500");
        Ok(())
    }
}
