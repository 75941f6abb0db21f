use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ColumnSpec, Observation, ObservationSet};

/// Why a file could not be turned into an [`ObservationSet`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("malformed arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {message}")]
    Parse {
        row: usize,
        column: String,
        message: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

impl LoadError {
    fn parse(row: usize, column: &str, message: impl Into<String>) -> Self {
        LoadError::Parse {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a yearly sea-level series from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one observation per row (the usual EPA export)
/// * `.json`    – `[{ "Year": 1880, "CSIRO Adjusted Sea Level": 0.0, ... }, ...]`
/// * `.parquet` – integer year column and numeric level column
///
/// Rows keep their file order and their values verbatim.
pub fn load_file(path: &Path, columns: &ColumnSpec) -> Result<ObservationSet, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let observations = match ext.as_str() {
        "csv" => load_csv(path, columns)?,
        "json" => load_json(path, columns)?,
        "parquet" | "pq" => load_parquet(path, columns)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} observations from {} ('{}' vs '{}')",
        observations.len(),
        path.display(),
        columns.level,
        columns.year
    );

    Ok(ObservationSet::new(observations, columns.clone()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; the year and level columns are
/// located by exact name, every other column is ignored.
fn load_csv(path: &Path, columns: &ColumnSpec) -> Result<Vec<Observation>, LoadError> {
    let file = open(path)?;
    read_csv(BufReader::new(file), columns)
}

pub(crate) fn read_csv<R: std::io::Read>(
    source: R,
    columns: &ColumnSpec,
) -> Result<Vec<Observation>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers()?.clone();

    let year_idx = headers
        .iter()
        .position(|h| h == columns.year)
        .ok_or_else(|| LoadError::MissingColumn(columns.year.clone()))?;
    let level_idx = headers
        .iter()
        .position(|h| h == columns.level)
        .ok_or_else(|| LoadError::MissingColumn(columns.level.clone()))?;

    let mut observations = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let year_cell = record.get(year_idx).unwrap_or("");
        let level_cell = record.get(level_idx).unwrap_or("");

        let year = year_cell.parse::<i32>().map_err(|_| {
            LoadError::parse(row_no, &columns.year, format!("'{year_cell}' is not an integer year"))
        })?;
        let level = level_cell.parse::<f64>().map_err(|_| {
            LoadError::parse(row_no, &columns.level, format!("'{level_cell}' is not a number"))
        })?;

        observations.push(Observation { year, level });
    }

    Ok(observations)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Year": 1880, "CSIRO Adjusted Sea Level": 0.0, "NOAA Adjusted Sea Level": null },
///   ...
/// ]
/// ```
fn load_json(path: &Path, columns: &ColumnSpec) -> Result<Vec<Observation>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text, columns)
}

pub(crate) fn parse_json(text: &str, columns: &ColumnSpec) -> Result<Vec<Observation>, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::parse(0, "<root>", "expected a top-level JSON array"))?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<Observation, LoadError> {
            let obj = rec
                .as_object()
                .ok_or_else(|| LoadError::parse(i, "<record>", "not a JSON object"))?;

            let year_val = obj
                .get(&columns.year)
                .ok_or_else(|| LoadError::MissingColumn(columns.year.clone()))?;
            let level_val = obj
                .get(&columns.level)
                .ok_or_else(|| LoadError::MissingColumn(columns.level.clone()))?;

            let year = year_val
                .as_i64()
                .and_then(|y| i32::try_from(y).ok())
                .ok_or_else(|| {
                    LoadError::parse(i, &columns.year, format!("{year_val} is not an integer year"))
                })?;
            let level = level_val.as_f64().ok_or_else(|| {
                LoadError::parse(i, &columns.level, format!("{level_val} is not a number"))
            })?;

            Ok(Observation { year, level })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one observation per row.
///
/// Expected schema:
/// - year column: Int32 or Int64
/// - level column: Float64, Float32, Int64 or Int32
///
/// Any other columns are ignored. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, columns: &ColumnSpec) -> Result<Vec<Observation>, LoadError> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    let year_idx = schema
        .index_of(&columns.year)
        .map_err(|_| LoadError::MissingColumn(columns.year.clone()))?;
    let level_idx = schema
        .index_of(&columns.level)
        .map_err(|_| LoadError::MissingColumn(columns.level.clone()))?;

    let reader = builder.build()?;
    let mut observations = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let year_col = batch.column(year_idx);
        let level_col = batch.column(level_idx);

        for row in 0..batch.num_rows() {
            let global_row = observations.len();
            let year = extract_year(year_col, row)
                .map_err(|msg| LoadError::parse(global_row, &columns.year, msg))?;
            let level = extract_level(level_col, row)
                .map_err(|msg| LoadError::parse(global_row, &columns.level, msg))?;
            observations.push(Observation { year, level });
        }
    }

    Ok(observations)
}

// -- Parquet / Arrow helpers --

fn extract_year(col: &Arc<dyn Array>, row: usize) -> Result<i32, String> {
    if col.is_null(row) {
        return Err("null year".to_string());
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row))
            .ok_or_else(|| "expected Int32Array".to_string()),
        DataType::Int64 => {
            let value = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .map(|arr| arr.value(row))
                .ok_or_else(|| "expected Int64Array".to_string())?;
            i32::try_from(value).map_err(|_| format!("year {value} out of range"))
        }
        other => Err(format!("year column has type {other:?}, expected Int32 or Int64")),
    }
}

fn extract_level(col: &Arc<dyn Array>, row: usize) -> Result<f64, String> {
    if col.is_null(row) {
        return Err("null level".to_string());
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => return Err(format!("level column has type {other:?}, expected a number")),
    };
    value.ok_or_else(|| format!("unexpected array layout for {:?}", col.data_type()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPA_HEAD: &str = "\
Year,CSIRO Adjusted Sea Level,Lower Error Bound,Upper Error Bound,NOAA Adjusted Sea Level
1880,0.0,-0.952755905,0.952755905,
1881,0.220472441,-0.732283464,1.173228345,
1882,-0.440944881,-1.346456692,0.464566929,
";

    #[test]
    fn csv_reads_year_and_level_in_file_order() {
        let rows = read_csv(EPA_HEAD.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], Observation::new(1880, 0.0));
        assert_eq!(rows[1], Observation::new(1881, 0.220472441));
        assert_eq!(rows[2], Observation::new(1882, -0.440944881));
    }

    #[test]
    fn csv_missing_year_column_is_reported() {
        let text = "Date,CSIRO Adjusted Sea Level\n1880,0.0\n";
        let err = read_csv(text.as_bytes(), &ColumnSpec::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Year"));
    }

    #[test]
    fn csv_empty_level_is_a_parse_error() {
        let text = "Year,CSIRO Adjusted Sea Level\n1880,\n";
        let err = read_csv(text.as_bytes(), &ColumnSpec::default()).unwrap_err();
        match err {
            LoadError::Parse { row, column, .. } => {
                assert_eq!(row, 0);
                assert_eq!(column, "CSIRO Adjusted Sea Level");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_fractional_year_is_rejected() {
        let text = "Year,CSIRO Adjusted Sea Level\n1880.5,0.1\n";
        let err = read_csv(text.as_bytes(), &ColumnSpec::default()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn csv_custom_columns() {
        let text = "yr,gmsl\n1993,-20.1\n1994,-18.4\n";
        let columns = ColumnSpec {
            year: "yr".into(),
            level: "gmsl".into(),
        };
        let rows = read_csv(text.as_bytes(), &columns).unwrap();
        assert_eq!(rows, vec![Observation::new(1993, -20.1), Observation::new(1994, -18.4)]);
    }

    #[test]
    fn json_records_match_csv() {
        let json = r#"[
            {"Year": 1880, "CSIRO Adjusted Sea Level": 0.0, "NOAA Adjusted Sea Level": null},
            {"Year": 1881, "CSIRO Adjusted Sea Level": 0.220472441},
            {"Year": 1882, "CSIRO Adjusted Sea Level": -0.440944881}
        ]"#;
        let from_json = parse_json(json, &ColumnSpec::default()).unwrap();
        let from_csv = read_csv(EPA_HEAD.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(from_json, from_csv);
    }

    #[test]
    fn json_missing_level_is_reported() {
        let json = r#"[{"Year": 1880}]"#;
        let err = parse_json(json, &ColumnSpec::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "CSIRO Adjusted Sea Level"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("levels.xlsx"), &ColumnSpec::default()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(
            Path::new("/definitely/not/here/sea_level.csv"),
            &ColumnSpec::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
