use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Float64Array, Int32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use sea_level_predictor::data::loader::{load_file, LoadError};
use sea_level_predictor::{analyze, ColumnSpec, PipelineConfig, PipelineError, TrendError};

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn linear_csv() -> String {
    let mut text = String::from("Year,CSIRO Adjusted Sea Level,NOAA Adjusted Sea Level\n");
    for year in 1990..=2010 {
        let level = if year < 2000 { 0.0 } else { (year - 2000) as f64 * 0.5 };
        text.push_str(&format!("{year},{level},\n"));
    }
    text
}

#[test]
fn csv_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        data_path: write(&dir, "epa.csv", &linear_csv()),
        ..Default::default()
    };

    let analysis = analyze(&config).unwrap();
    assert_eq!(analysis.observations.len(), 21);
    assert!((analysis.recent.model.slope - 0.5).abs() < 1e-9);
    assert!((analysis.projection(2050) - 25.0).abs() < 1e-6);
    assert!(analysis.full.model.slope > 0.0);
    assert!(analysis.full.model.slope < 0.5);

    let chart = analysis.chart(&config.labels, config.horizon_year);
    let recent = chart.recent_fit.unwrap();
    assert_eq!(recent.points.first().unwrap()[0], 1990.0);
    assert_eq!(recent.points.last().unwrap()[0], 2050.0);
}

#[test]
fn missing_year_column_fails_before_fitting() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        data_path: write(&dir, "bad.csv", "Date,CSIRO Adjusted Sea Level\n2000,1.0\n2001,2.0\n"),
        ..Default::default()
    };

    match analyze(&config) {
        Err(PipelineError::Load(LoadError::MissingColumn(col))) => assert_eq!(col, "Year"),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn single_year_after_cutoff_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        data_path: write(&dir, "short.csv", "Year,CSIRO Adjusted Sea Level\n1990,0.0\n2000,1.0\n"),
        ..Default::default()
    };

    match analyze(&config) {
        Err(PipelineError::Trend(TrendError::InsufficientData { distinct_years, min_year })) => {
            assert_eq!(distinct_years, 1);
            assert_eq!(min_year, Some(2000));
        }
        other => panic!("expected insufficient data, got {other:?}"),
    }
}

#[test]
fn json_and_csv_agree() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = write(&dir, "levels.csv", &linear_csv());

    let records: Vec<String> = (1990..=2010)
        .map(|year| {
            let level = if year < 2000 { 0.0 } else { (year - 2000) as f64 * 0.5 };
            format!(r#"{{"Year": {year}, "CSIRO Adjusted Sea Level": {level:?}}}"#)
        })
        .collect();
    let json_path = write(&dir, "levels.json", &format!("[{}]", records.join(",")));

    let from_csv = load_file(&csv_path, &ColumnSpec::default()).unwrap();
    let from_json = load_file(&json_path, &ColumnSpec::default()).unwrap();
    assert_eq!(from_csv.observations(), from_json.observations());
}

#[test]
fn parquet_is_loaded_in_row_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Year", DataType::Int32, false),
        Field::new("CSIRO Adjusted Sea Level", DataType::Float64, false),
        Field::new("Lower Error Bound", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int32Array::from(vec![2001, 2000, 2002])),
            Arc::new(Float64Array::from(vec![1.5, 1.0, 2.0])),
            Arc::new(Float64Array::from(vec![0.0, 0.0, 0.0])),
        ],
    )
    .unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let set = load_file(&path, &ColumnSpec::default()).unwrap();
    let years: Vec<i32> = set.years().collect();
    assert_eq!(years, vec![2001, 2000, 2002]);
    assert_eq!(set.levels().collect::<Vec<_>>(), vec![1.5, 1.0, 2.0]);
    assert_eq!(set.year_range(), Some((2000, 2002)));

    let missing = ColumnSpec {
        level: "GMSL".into(),
        ..Default::default()
    };
    assert!(matches!(
        load_file(&path, &missing),
        Err(LoadError::MissingColumn(col)) if col == "GMSL"
    ));
}

#[test]
fn parquet_null_level_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gaps.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Year", DataType::Int32, false),
        Field::new("CSIRO Adjusted Sea Level", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int32Array::from(vec![2000, 2001, 2002])),
            Arc::new(Float64Array::from(vec![Some(1.0), None, Some(2.0)])),
        ],
    )
    .unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    match load_file(&path, &ColumnSpec::default()) {
        Err(LoadError::Parse { row, column, message }) => {
            assert_eq!(row, 1);
            assert_eq!(column, "CSIRO Adjusted Sea Level");
            assert_eq!(message, "null level");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn upper_case_extension_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "LEVELS.CSV", &linear_csv());

    let set = load_file(&path, &ColumnSpec::default()).unwrap();
    assert_eq!(set.len(), 21);
    assert_eq!(set.year_range(), Some((1990, 2010)));
}

#[test]
fn config_file_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(&dir, "gmsl.csv", "yr,gmsl\n1995,1.0\n1996,2.0\n1997,3.0\n1998,4.0\n");
    let config_text = format!(
        r#"{{ "data_path": {:?}, "columns": {{ "year": "yr", "level": "gmsl" }}, "cutoff_year": 1996 }}"#,
        data.to_str().unwrap()
    );
    let config_path = write(&dir, "run.json", &config_text);

    let config = PipelineConfig::from_json_file(&config_path).unwrap();
    let analysis = analyze(&config).unwrap();
    assert_eq!(analysis.recent.stats.n_observations, 3);
    assert!((analysis.full.model.slope - 1.0).abs() < 1e-9);
    assert!((analysis.projection(config.horizon_year) - 56.0).abs() < 1e-6);
}
