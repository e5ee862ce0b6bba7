use polars::prelude::*;
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// BikeRecord – the typed columns the charts are built from
// ---------------------------------------------------------------------------

pub const WORKING_DAY: &str = "workingday_day";
pub const CNT_DAY: &str = "cnt_day";
pub const WEATHER_LABEL: &str = "weather_label";
pub const HOUR: &str = "hr";
pub const CASUAL_HOUR: &str = "casual_hour";
pub const REGISTERED_HOUR: &str = "registered_hour";

/// Columns the dashboard cannot render without.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    WORKING_DAY,
    CNT_DAY,
    WEATHER_LABEL,
    HOUR,
    CASUAL_HOUR,
    REGISTERED_HOUR,
];

/// One row of the file, restricted to the typed required columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BikeRecord {
    #[serde(rename = "workingday_day", deserialize_with = "working_day_flag")]
    pub working_day: bool,
    pub cnt_day: f64,
    pub weather_label: String,
    pub hr: u8,
    pub casual_hour: f64,
    pub registered_hour: f64,
}

fn working_day_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" => Ok(true),
        "0" | "0.0" | "false" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "'{other}' is not a working-day flag (expected 0/1 or true/false)"
        ))),
    }
}

/// Typed frame of validated records, one column per required field.
///
/// `workingday_day` is Boolean, `hr` is UInt32, `weather_label` is String and
/// the counts are Float64.
pub fn bike_frame(records: &[BikeRecord]) -> PolarsResult<DataFrame> {
    let working_day: Vec<bool> = records.iter().map(|r| r.working_day).collect();
    let cnt_day: Vec<f64> = records.iter().map(|r| r.cnt_day).collect();
    let weather: Vec<&str> = records.iter().map(|r| r.weather_label.as_str()).collect();
    let hour: Vec<u32> = records.iter().map(|r| u32::from(r.hr)).collect();
    let casual: Vec<f64> = records.iter().map(|r| r.casual_hour).collect();
    let registered: Vec<f64> = records.iter().map(|r| r.registered_hour).collect();

    DataFrame::new(vec![
        Column::from(Series::new(WORKING_DAY.into(), working_day)),
        Column::from(Series::new(CNT_DAY.into(), cnt_day)),
        Column::from(Series::new(WEATHER_LABEL.into(), weather)),
        Column::from(Series::new(HOUR.into(), hour)),
        Column::from(Series::new(CASUAL_HOUR.into(), casual)),
        Column::from(Series::new(REGISTERED_HOUR.into(), registered)),
    ])
}

// ---------------------------------------------------------------------------
// BikeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded file, twice: every column as polars inferred it, and the typed
/// required columns. Both have the same rows in the same order.
#[derive(Debug, Clone)]
pub struct BikeDataset {
    /// All columns of the file. First rows, duplicates and statistics.
    pub frame: DataFrame,
    /// Output of [`bike_frame`]. Grouped means.
    pub bikes: DataFrame,
}

impl BikeDataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn column_count(&self) -> usize {
        self.frame.width()
    }
}
