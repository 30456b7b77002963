use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::Schema;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::model::{columns, Dataset, LaunchRecord, OutcomeClass, UNKNOWN_CATEGORY};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row, comma or tab delimited
/// * `.json`         – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., "class": ... }, ...]`
/// * `.parquet`      – flat columns with the same names
///
/// Required columns are `Launch Site`, `Payload Mass (kg)` and `class`;
/// everything else is optional display metadata.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let dataset = Dataset::from_records(records)?;
    log::info!(
        "Loaded {} launch records across {} sites from {}",
        dataset.len(),
        dataset.sites().len(),
        path.display()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Row shape shared by the text loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunch {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category", default)]
    booster_category: Option<String>,
    #[serde(rename = "Mission Outcome", default)]
    mission_outcome: Option<String>,
    /// Display only; unparseable cells become `None` instead of failing the load.
    #[serde(rename = "Flight Number", default, deserialize_with = "csv::invalid_option")]
    flight_number: Option<f64>,
}

impl RawLaunch {
    fn into_record(self, row: usize) -> Result<LaunchRecord, LoadError> {
        let outcome = OutcomeClass::from_value(self.class).ok_or_else(|| LoadError::InvalidValue {
            row,
            column: columns::CLASS,
            reason: format!("{} is neither 0 nor 1", self.class),
        })?;

        let booster_version = non_blank(self.booster_version);
        let booster_category = non_blank(self.booster_category)
            .or_else(|| booster_version.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        Ok(LaunchRecord {
            launch_site: self.launch_site.trim().to_string(),
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_category,
            booster_version,
            mission_outcome: non_blank(self.mission_outcome),
            flight_number: self.flight_number.and_then(whole_number),
        })
    }
}

/// Pandas writes integer columns with gaps as floats (`1.0`).
fn whole_number(value: f64) -> Option<u32> {
    (value >= 0.0 && value <= u32::MAX as f64 && value.fract() == 0.0).then_some(value as u32)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_required(present: impl Fn(&str) -> bool) -> Result<(), LoadError> {
    match columns::REQUIRED.iter().find(|col| !present(**col)) {
        Some(missing) => Err(LoadError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; unknown columns are ignored.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    check_required(|col| headers.iter().any(|h| h == col))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunch>().enumerate() {
        let raw = result?;
        records.push(raw.into_record(row_no)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, obj) in rows.into_iter().enumerate() {
        check_required(|col| obj.contains_key(col))?;
        let raw: RawLaunch = serde_json::from_value(JsonValue::Object(obj))?;
        records.push(raw.into_record(row_no)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): string columns may be Utf8 or
/// LargeUtf8, numeric columns any of Float64/Float32/Int64/Int32.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    check_required(|col| builder.schema().index_of(col).is_ok())?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let column = |name: &str| optional_column(&schema, name).map(|i| batch.column(i).clone());

        let site_col = required_column(&schema, columns::LAUNCH_SITE).map(|i| batch.column(i))?;
        let mass_col = required_column(&schema, columns::PAYLOAD_MASS).map(|i| batch.column(i))?;
        let class_col = required_column(&schema, columns::CLASS).map(|i| batch.column(i))?;
        let version_col = column(columns::BOOSTER_VERSION);
        let category_col = column(columns::BOOSTER_CATEGORY);
        let outcome_col = column(columns::MISSION_OUTCOME);
        let flight_col = column(columns::FLIGHT_NUMBER);

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let raw = RawLaunch {
                launch_site: string_at(site_col, i).ok_or_else(|| missing_value(row, columns::LAUNCH_SITE))?,
                payload_mass_kg: f64_at(mass_col, i).ok_or_else(|| missing_value(row, columns::PAYLOAD_MASS))?,
                class: f64_at(class_col, i).ok_or_else(|| missing_value(row, columns::CLASS))?,
                booster_version: version_col.as_ref().and_then(|c| string_at(c, i)),
                booster_category: category_col.as_ref().and_then(|c| string_at(c, i)),
                mission_outcome: outcome_col.as_ref().and_then(|c| string_at(c, i)),
                flight_number: flight_col.as_ref().and_then(|c| f64_at(c, i)),
            };
            records.push(raw.into_record(row)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn optional_column(schema: &Schema, name: &str) -> Option<usize> {
    schema.index_of(name).ok()
}

fn required_column(schema: &Schema, name: &str) -> Result<usize, LoadError> {
    optional_column(schema, name).ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn missing_value(row: usize, column: &'static str) -> LoadError {
    LoadError::InvalidValue {
        row,
        column,
        reason: "null or wrong column type".to_string(),
    }
}

/// Read a string cell; `None` for nulls and non-string columns.
fn string_at(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    if let Some(s) = any.downcast_ref::<StringArray>() {
        Some(s.value(row).to_string())
    } else {
        any.downcast_ref::<LargeStringArray>()
            .map(|s| s.value(row).to_string())
    }
}

/// Read a numeric cell as `f64`; `None` for nulls and non-numeric columns.
fn f64_at(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Some(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Some(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Some(arr.value(row) as f64)
    } else {
        any.downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as f64)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::datatypes::{DataType, Field};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category";

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_csv_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "launches.csv",
            &format!(
                "{HEADER}\n\
                 1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
                 2,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1\n\
                 3,CCAFS LC-40,1,2534.0,F9 FT B1019,FT\n"
            ),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E"]);
        let second = &ds.records()[1];
        assert_eq!(second.launch_site, "VAFB SLC-4E");
        assert_eq!(second.payload_mass_kg, 500.0);
        assert_eq!(second.outcome, OutcomeClass::Success);
        assert_eq!(second.booster_category, "v1.1");
        assert_eq!(second.flight_number, Some(2));
        assert_eq!(ds.max_payload(), 2534.0);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "minimal.csv",
            "Launch Site,Payload Mass (kg),class\nKSC LC-39A,5300,1\n",
        );
        let ds = load_file(&path).unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.booster_category, UNKNOWN_CATEGORY);
        assert_eq!(rec.booster_version, None);
        assert_eq!(rec.mission_outcome, None);
    }

    #[test]
    fn category_falls_back_to_booster_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "versions.csv",
            "Launch Site,Payload Mass (kg),class,Booster Version\nKSC LC-39A,5300,1,F9 B5 B1046.1\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records()[0].booster_category, "F9 B5 B1046.1");
    }

    #[test]
    fn missing_required_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "nosite.csv", "Payload Mass (kg),class\n100,1\n");
        match load_file(&path).unwrap_err() {
            LoadError::MissingColumn(col) => assert_eq!(col, columns::LAUNCH_SITE),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn class_outside_zero_one_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "badclass.csv",
            "Launch Site,Payload Mass (kg),class\nA,100,1\nA,200,2\n",
        );
        match load_file(&path).unwrap_err() {
            LoadError::InvalidValue { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, columns::CLASS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "empty.csv", "Launch Site,Payload Mass (kg),class\n");
        assert!(matches!(load_file(&path).unwrap_err(), LoadError::EmptyDataset));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "launches.xlsx", "");
        match load_file(&path).unwrap_err() {
            LoadError::UnsupportedFormat(ext) => assert_eq!(ext, "xlsx"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_tab_separated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "launches.tsv",
            "Launch Site\tPayload Mass (kg)\tclass\nCCAFS SLC-40\t3600\t1\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records()[0].launch_site, "CCAFS SLC-40");
    }

    #[test]
    fn float_or_garbled_flight_numbers_do_not_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = write(
            &dir,
            "flights.csv",
            "Flight Number,Launch Site,Payload Mass (kg),class\n\
             1.0,CCAFS LC-40,0,0\n\
             2.5,CCAFS LC-40,10,1\n\
             n/a,CCAFS LC-40,20,1\n\
             ,CCAFS LC-40,30,1\n",
        );
        let ds = load_file(&csv_path).unwrap();
        let flights: Vec<Option<u32>> = ds.records().iter().map(|r| r.flight_number).collect();
        assert_eq!(flights, [Some(1), None, None, None]);

        let json_path = write(
            &dir,
            "flights.json",
            r#"[
                {"Flight Number": 1.0, "Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0, "class": 1},
                {"Flight Number": 7, "Launch Site": "KSC LC-39A", "Payload Mass (kg)": 500.0, "class": 0},
                {"Flight Number": "seven", "Launch Site": "KSC LC-39A", "Payload Mass (kg)": 500.0, "class": 0},
                {"Flight Number": -3.0, "Launch Site": "KSC LC-39A", "Payload Mass (kg)": 500.0, "class": 0}
            ]"#,
        );
        let ds = load_file(&json_path).unwrap();
        let flights: Vec<Option<u32>> = ds.records().iter().map(|r| r.flight_number).collect();
        assert_eq!(flights, [Some(1), Some(7), None, None]);
    }

    #[test]
    fn loads_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "launches.json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0, "class": 1,
                 "Booster Version Category": "FT", "Mission Outcome": "Success"},
                {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600, "class": 0}
            ]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].mission_outcome.as_deref(), Some("Success"));
        assert_eq!(ds.records()[1].outcome, OutcomeClass::Failure);
    }

    #[test]
    fn json_record_without_class_is_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "noclass.json",
            r#"[{"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0}]"#,
        );
        match load_file(&path).unwrap_err() {
            LoadError::MissingColumn(col) => assert_eq!(col, columns::CLASS),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_parquet_with_mixed_numeric_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(columns::LAUNCH_SITE, DataType::Utf8, false),
            Field::new(columns::PAYLOAD_MASS, DataType::Float64, false),
            Field::new(columns::CLASS, DataType::Int64, false),
            Field::new(columns::BOOSTER_CATEGORY, DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![1952.0, 4600.0])),
                Arc::new(Int64Array::from(vec![0, 1])),
                Arc::new(StringArray::from(vec![Some("v1.1"), None])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.parquet");
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].booster_category, "v1.1");
        assert_eq!(ds.records()[1].booster_category, UNKNOWN_CATEGORY);
        assert_eq!(ds.records()[1].outcome, OutcomeClass::Success);
        assert_eq!(ds.min_payload(), 1952.0);
    }
}
