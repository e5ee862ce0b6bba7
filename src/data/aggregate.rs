use polars::prelude::*;

use super::model::{
    BikeDataset, CASUAL_HOUR, CNT_DAY, HOUR, REGISTERED_HOUR, WEATHER_LABEL, WORKING_DAY,
};

pub const WEEKEND_LABEL: &str = "Akhir Pekan";
pub const WEEKDAY_LABEL: &str = "Hari Kerja";

// ---------------------------------------------------------------------------
// Duplicate rows
// ---------------------------------------------------------------------------

/// Number of rows that repeat an earlier row cell for cell.
///
/// The first occurrence of a row is not counted, only its repeats.
pub fn duplicate_count(frame: &DataFrame) -> PolarsResult<usize> {
    let distinct = frame
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(frame.height() - distinct.height())
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Summary of one numeric column. Everything but `count` is `NaN` when the
/// column has no values; `std` is also `NaN` for a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Nulls are skipped. Quartiles interpolate linearly, `std` uses one
    /// degree of freedom.
    pub fn from_series(series: &Series) -> PolarsResult<Self> {
        let cast = series.cast(&DataType::Float64)?;
        let ca = cast.f64()?;
        let count = ca.len() - ca.null_count();

        let std = if count < 2 {
            f64::NAN
        } else {
            ca.std(1).unwrap_or(f64::NAN)
        };
        let quantile = |q: f64| -> PolarsResult<f64> {
            Ok(ca.quantile(q, QuantileMethod::Linear)?.unwrap_or(f64::NAN))
        };

        Ok(ColumnStats {
            name: series.name().to_string(),
            count,
            mean: ca.mean().unwrap_or(f64::NAN),
            std,
            min: ca.min().unwrap_or(f64::NAN),
            q1: quantile(0.25)?,
            median: quantile(0.5)?,
            q3: quantile(0.75)?,
            max: ca.max().unwrap_or(f64::NAN),
        })
    }
}

/// Statistics for every numeric column, in file order.
pub fn describe(frame: &DataFrame) -> PolarsResult<Vec<ColumnStats>> {
    frame
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| ColumnStats::from_series(col.as_materialized_series()))
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

/// Mean daily rentals on weekend/holiday rows vs working-day rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingDayMeans {
    pub weekend: f64,
    pub weekday: f64,
}

impl WorkingDayMeans {
    /// Both groups in display order: weekend first.
    pub fn pairs(&self) -> [(&'static str, f64); 2] {
        [(WEEKEND_LABEL, self.weekend), (WEEKDAY_LABEL, self.weekday)]
    }
}

/// A group with no rows keeps a `NaN` mean.
pub fn working_day_means(bikes: &DataFrame) -> PolarsResult<WorkingDayMeans> {
    let grouped = bikes
        .clone()
        .lazy()
        .group_by([col(WORKING_DAY)])
        .agg([col(CNT_DAY).mean()])
        .collect()?;

    let flags = grouped.column(WORKING_DAY)?.as_materialized_series().bool()?;
    let means = grouped.column(CNT_DAY)?.as_materialized_series().f64()?;

    let mut result = WorkingDayMeans {
        weekend: f64::NAN,
        weekday: f64::NAN,
    };
    for (flag, mean) in flags.into_iter().zip(means.into_iter()) {
        let mean = mean.unwrap_or(f64::NAN);
        match flag {
            Some(true) => result.weekday = mean,
            Some(false) => result.weekend = mean,
            None => {}
        }
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub label: String,
    pub mean: f64,
}

/// Mean daily rentals per weather label, largest first. Equal means are
/// ordered by label.
pub fn weather_means(bikes: &DataFrame) -> PolarsResult<Vec<GroupMean>> {
    let grouped = bikes
        .clone()
        .lazy()
        .group_by([col(WEATHER_LABEL)])
        .agg([col(CNT_DAY).mean()])
        .sort(
            [CNT_DAY, WEATHER_LABEL],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let labels = grouped.column(WEATHER_LABEL)?.as_materialized_series().str()?;
    let means = grouped.column(CNT_DAY)?.as_materialized_series().f64()?;

    Ok(labels
        .into_iter()
        .zip(means.into_iter())
        .filter_map(|(label, mean)| {
            Some(GroupMean {
                label: label?.to_string(),
                mean: mean.unwrap_or(f64::NAN),
            })
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyMean {
    pub hour: u8,
    pub casual: f64,
    pub registered: f64,
}

/// Mean casual and registered rentals for each hour present, ascending.
pub fn hourly_trend(bikes: &DataFrame) -> PolarsResult<Vec<HourlyMean>> {
    let grouped = bikes
        .clone()
        .lazy()
        .group_by([col(HOUR)])
        .agg([col(CASUAL_HOUR).mean(), col(REGISTERED_HOUR).mean()])
        .sort([HOUR], SortMultipleOptions::default())
        .collect()?;

    let hours = grouped.column(HOUR)?.as_materialized_series().u32()?;
    let casual = grouped.column(CASUAL_HOUR)?.as_materialized_series().f64()?;
    let registered = grouped.column(REGISTERED_HOUR)?.as_materialized_series().f64()?;

    let mut trend = Vec::with_capacity(grouped.height());
    for ((hour, casual), registered) in hours.into_iter().zip(casual).zip(registered) {
        let Some(hour) = hour else { continue };
        let hour = u8::try_from(hour).map_err(|_| {
            PolarsError::ComputeError(format!("hour {hour} does not fit a clock hour").into())
        })?;
        trend.push(HourlyMean {
            hour,
            casual: casual.unwrap_or(f64::NAN),
            registered: registered.unwrap_or(f64::NAN),
        });
    }
    Ok(trend)
}

// ---------------------------------------------------------------------------
// Summaries – everything the renderer needs, computed in one go
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Summaries {
    pub duplicates: usize,
    pub statistics: Vec<ColumnStats>,
    pub working_day: WorkingDayMeans,
    pub weather: Vec<GroupMean>,
    pub hourly: Vec<HourlyMean>,
}

impl Summaries {
    pub fn compute(dataset: &BikeDataset) -> PolarsResult<Self> {
        let summaries = Summaries {
            duplicates: duplicate_count(&dataset.frame)?,
            statistics: describe(&dataset.frame)?,
            working_day: working_day_means(&dataset.bikes)?,
            weather: weather_means(&dataset.bikes)?,
            hourly: hourly_trend(&dataset.bikes)?,
        };
        log::debug!(
            "Aggregated {} rows: {} duplicates, {} numeric columns, {} weather groups, {} hours",
            dataset.len(),
            summaries.duplicates,
            summaries.statistics.len(),
            summaries.weather.len(),
            summaries.hourly.len()
        );
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::data::loader::load_reader;
    use crate::data::model::{bike_frame, BikeRecord};

    fn record(working_day: bool, cnt_day: f64, weather: &str, hr: u8) -> BikeRecord {
        BikeRecord {
            working_day,
            cnt_day,
            weather_label: weather.to_string(),
            hr,
            casual_hour: 0.0,
            registered_hour: 0.0,
        }
    }

    fn hourly(hr: u8, casual: f64, registered: f64) -> BikeRecord {
        BikeRecord {
            casual_hour: casual,
            registered_hour: registered,
            ..record(true, 0.0, "Cerah", hr)
        }
    }

    #[test]
    fn working_day_means_for_two_rows() -> Result<()> {
        let bikes = bike_frame(&[
            record(false, 100.0, "Cerah", 0),
            record(true, 200.0, "Cerah", 0),
        ])?;
        let means = working_day_means(&bikes)?;
        assert_eq!(means.pairs(), [(WEEKEND_LABEL, 100.0), (WEEKDAY_LABEL, 200.0)]);
        Ok(())
    }

    #[test]
    fn working_day_means_keep_an_empty_group() -> Result<()> {
        let bikes = bike_frame(&[
            record(true, 10.0, "Cerah", 0),
            record(true, 30.0, "Cerah", 1),
        ])?;
        let pairs = working_day_means(&bikes)?.pairs();
        assert_eq!(pairs[0].0, WEEKEND_LABEL);
        assert!(pairs[0].1.is_nan());
        assert_eq!(pairs[1], (WEEKDAY_LABEL, 20.0));
        Ok(())
    }

    #[test]
    fn weather_means_sorted_descending_with_label_ties() -> Result<()> {
        let bikes = bike_frame(&[
            record(true, 50.0, "Hujan", 0),
            record(true, 300.0, "Cerah", 0),
            record(true, 100.0, "Cerah", 0),
            record(true, 200.0, "Berkabut", 0),
            record(true, 50.0, "Badai", 0),
        ])?;
        let means = weather_means(&bikes)?;
        let labels: Vec<&str> = means.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Berkabut", "Cerah", "Badai", "Hujan"]);
        assert_eq!(means[1].mean, 200.0);
        assert!(means.windows(2).all(|w| w[0].mean >= w[1].mean));
        Ok(())
    }

    #[test]
    fn hourly_trend_has_one_row_per_hour() -> Result<()> {
        let bikes = bike_frame(&[
            hourly(17, 10.0, 100.0),
            hourly(8, 2.0, 50.0),
            hourly(17, 30.0, 300.0),
            hourly(0, 1.0, 4.0),
        ])?;
        let trend = hourly_trend(&bikes)?;
        let hours: Vec<u8> = trend.iter().map(|h| h.hour).collect();
        assert_eq!(hours, [0, 8, 17]);
        assert_eq!(
            trend[2],
            HourlyMean {
                hour: 17,
                casual: 20.0,
                registered: 200.0
            }
        );
        Ok(())
    }

    #[test]
    fn one_duplicate_among_five_rows() -> Result<()> {
        let text = "workingday_day,cnt_day,weather_label,hr,casual_hour,registered_hour\n\
                    1,10,Cerah,0,1,2\n\
                    0,20,Cerah,1,1,2\n\
                    1,10,Cerah,0,1,2\n\
                    1,30,Hujan,2,1,2\n\
                    0,40,Cerah,3,1,2";
        let ds = load_reader(text.as_bytes())?;
        let dups = duplicate_count(&ds.frame)?;
        assert_eq!(dups, 1);
        assert!(dups <= ds.len());
        Ok(())
    }

    #[test]
    fn triplicate_counts_twice() -> Result<()> {
        let text = "workingday_day,cnt_day,weather_label,hr,casual_hour,registered_hour\n\
                    1,10,Cerah,0,1,2\n\
                    1,10,Cerah,0,1,2\n\
                    1,10,Cerah,0,1,2";
        let ds = load_reader(text.as_bytes())?;
        assert_eq!(duplicate_count(&ds.frame)?, 2);
        Ok(())
    }

    #[test]
    fn padded_text_is_not_a_duplicate() -> Result<()> {
        let text = "workingday_day,cnt_day,weather_label,hr,casual_hour,registered_hour\n\
                    1,10,Cerah,0,1,2\n\
                    1,10,Cerah ,0,1,2";
        let ds = load_reader(text.as_bytes())?;
        assert_eq!(duplicate_count(&ds.frame)?, 0);
        Ok(())
    }

    #[test]
    fn describe_matches_summary_semantics() -> Result<()> {
        let series = Series::new("cnt".into(), &[4.0, 1.0, 3.0, 2.0]);
        let stats = ColumnStats::from_series(&series)?;
        assert_eq!(stats.name, "cnt");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert!((stats.std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
        Ok(())
    }

    #[test]
    fn describe_single_and_empty_columns() -> Result<()> {
        let single = ColumnStats::from_series(&Series::new("x".into(), &[7i64]))?;
        assert_eq!(single.count, 1);
        assert_eq!(single.median, 7.0);
        assert!(single.std.is_nan());

        let empty = ColumnStats::from_series(&Series::new_empty("y".into(), &DataType::Float64))?;
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan());
        assert!(empty.max.is_nan());
        Ok(())
    }

    #[test]
    fn describe_skips_nulls() -> Result<()> {
        let series = Series::new("z".into(), &[Some(1.0), None, Some(3.0)]);
        let stats = ColumnStats::from_series(&series)?;
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 2.0);
        Ok(())
    }

    #[test]
    fn describe_skips_text_columns() -> Result<()> {
        let text = "dteday,workingday_day,cnt_day,weather_label,hr,casual_hour,registered_hour\n\
                    2011-01-01,0,10,Cerah,0,1,2\n\
                    2011-01-02,1,20,Hujan,1,3,4";
        let ds = load_reader(text.as_bytes())?;
        let names: Vec<String> = describe(&ds.frame)?.into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            ["workingday_day", "cnt_day", "hr", "casual_hour", "registered_hour"]
        );
        Ok(())
    }
}
