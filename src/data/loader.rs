use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use polars::prelude::*;

use super::error::{DashboardError, LoadError, SchemaError};
use super::model::{bike_frame, BikeDataset, BikeRecord, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bike-sharing CSV at `path`.
///
/// Fails with [`LoadError`] when the file cannot be read, is not valid CSV or
/// holds no records, and with [`SchemaError`] when a required column is absent
/// or one of its values does not parse.
pub fn load_file(path: &Path) -> Result<BikeDataset, DashboardError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.column_count(),
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV from any reader. The first line must be the header row.
///
/// The required columns are validated row by row into [`BikeRecord`]s first;
/// only then is the whole file read into a polars frame with inferred dtypes.
/// Cells and headers are taken as written, whitespace included.
pub fn load_reader<R: Read>(mut source: R) -> Result<BikeDataset, DashboardError> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes).map_err(LoadError::Read)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty.into());
    }

    let records = typed_records(&bytes)?;
    let bikes = bike_frame(&records).map_err(LoadError::from)?;
    let frame = read_frame(bytes)?;

    log::debug!(
        "Frame schema: {:?}",
        frame
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), c.dtype().clone()))
            .collect::<Vec<_>>()
    );

    Ok(BikeDataset { frame, bikes })
}

// ---------------------------------------------------------------------------
// Schema check: required columns, typed
// ---------------------------------------------------------------------------

fn typed_records(bytes: &[u8]) -> Result<Vec<BikeRecord>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(LoadError::from)?.clone();
    if headers.is_empty() {
        return Err(LoadError::Empty.into());
    }
    check_required_columns(&headers)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(LoadError::from)?;
        let typed: BikeRecord = record
            .deserialize(Some(&headers))
            .map_err(|source| SchemaError::InvalidRecord { row, source })?;
        if typed.hr > 23 {
            return Err(SchemaError::HourOutOfRange { row, hour: typed.hr }.into());
        }
        records.push(typed);
    }

    if records.is_empty() {
        return Err(LoadError::Empty.into());
    }
    Ok(records)
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<(), SchemaError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SchemaError::MissingColumn(column));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Full frame: every column, dtypes inferred over the whole file
// ---------------------------------------------------------------------------

fn read_frame(bytes: Vec<u8>) -> Result<DataFrame, LoadError> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;

    use super::*;
    use crate::data::model::{CNT_DAY, WORKING_DAY};

    const HEADER: &str =
        "dteday,workingday_day,cnt_day,weather_label,hr,casual_hour,registered_hour";

    fn csv_text(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    fn working_days(bikes: &DataFrame) -> Result<Vec<Option<bool>>> {
        let flags = bikes.column(WORKING_DAY)?.as_materialized_series().bool()?;
        Ok(flags.into_iter().collect())
    }

    #[test]
    fn loads_typed_frame_and_full_frame() -> Result<()> {
        let text = csv_text(&[
            "2011-01-01,0,985,Cerah,0,3,13",
            "2011-01-03,1,1349,Berkabut,1,0,5",
        ]);
        let ds = load_reader(text.as_bytes())?;

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_count(), 7);
        assert_eq!(ds.bikes.height(), 2);

        assert_eq!(working_days(&ds.bikes)?, vec![Some(false), Some(true)]);
        let counts = ds.bikes.column(CNT_DAY)?.as_materialized_series().f64()?;
        assert_eq!(counts.get(0), Some(985.0));
        assert_eq!(counts.get(1), Some(1349.0));

        assert_eq!(ds.frame.column("dteday")?.dtype(), &DataType::String);
        assert_eq!(ds.frame.column("hr")?.dtype(), &DataType::Int64);
        Ok(())
    }

    #[test]
    fn accepts_boolean_working_day_text() -> Result<()> {
        let text = csv_text(&[
            "2011-01-01,True,10,Cerah,5,1,2",
            "2011-01-02, false ,20,Cerah,6,1,2",
        ]);
        let ds = load_reader(text.as_bytes())?;
        assert_eq!(working_days(&ds.bikes)?, vec![Some(true), Some(false)]);
        Ok(())
    }

    #[test]
    fn padded_text_cells_are_kept() -> Result<()> {
        let text = csv_text(&["2011-01-01,0,10, Cerah,0,1,2"]);
        let ds = load_reader(text.as_bytes())?;
        let labels = ds.frame.column("weather_label")?.as_materialized_series().str()?;
        assert_eq!(labels.get(0), Some(" Cerah"));
        Ok(())
    }

    #[test]
    fn empty_input_is_a_load_error() {
        let err = load_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::Load(LoadError::Empty)));
    }

    #[test]
    fn header_without_rows_is_a_load_error() {
        let err = load_reader(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::Load(LoadError::Empty)));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let text = "workingday_day,cnt_day,weather_label,casual_hour,registered_hour\n1,2,Cerah,3,4";
        let err = load_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Schema(SchemaError::MissingColumn("hr"))
        ));
    }

    #[test]
    fn unparseable_required_value_is_a_schema_error() {
        let text = csv_text(&["2011-01-01,0,lots,Cerah,0,3,13"]);
        let err = load_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Schema(SchemaError::InvalidRecord { row: 0, .. })
        ));
    }

    #[test]
    fn hour_out_of_range_is_rejected() {
        let text = csv_text(&["2011-01-01,0,10,Cerah,0,3,13", "2011-01-01,0,10,Cerah,24,3,13"]);
        let err = load_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Schema(SchemaError::HourOutOfRange { row: 1, hour: 24 })
        ));
    }

    #[test]
    fn ragged_row_is_a_load_error() {
        let text = csv_text(&["2011-01-01,0,10,Cerah,0,3"]);
        let err = load_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::Load(LoadError::Csv(_))));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Load(LoadError::Io { .. })));
    }

    #[test]
    fn loads_from_disk() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "{}", csv_text(&["2011-01-01,1,500,Cerah,8,10,90"]))?;

        let ds = load_file(file.path())?;
        assert_eq!(ds.len(), 1);
        let hours = ds.bikes.column("hr")?.as_materialized_series().u32()?;
        assert_eq!(hours.get(0), Some(8));
        Ok(())
    }
}
