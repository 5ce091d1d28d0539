//! Growth Report Cleaner
//!
//! The growth-model report starts with three non-tabular banner lines
//! before the header row. The gain score arrives as text and is coerced to
//! a number; unparseable values (e.g. `N/A`) become nulls rather than
//! failing the run.
//!
//! The source also carries a composite `Growth Quadrant` column encoding a
//! proficiency tier and a growth tier. No downstream consumer reads the
//! split values, so the column is tolerated but never selected.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{coerce_to_f64, ensure_columns, normalize_id_column};

/// Non-tabular banner lines preceding the header row
const METADATA_LINES: usize = 3;

/// Clean the growth-model report
///
/// Rows with a null `Student ID` are dropped. Output columns: `student_id`
/// (canonical string), `BM1_gain_score` (f64, null when the source value
/// is not numeric).
pub fn clean_growth(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(METADATA_LINES)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open growth report: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load growth report: {:?}", path))?;

    ensure_columns(&df, &["Student ID", "Scale Score Difference"], "growth report")?;

    let df = df
        .lazy()
        .filter(col("Student ID").is_not_null())
        .select([
            col("Student ID").alias("student_id"),
            col("Scale Score Difference").alias("BM1_gain_score"),
        ])
        .collect()
        .with_context(|| "Failed to select growth columns")?;

    let df = coerce_to_f64(df, "BM1_gain_score")?;
    normalize_id_column(df, "student_id")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    const BANNER: &str = "Growth Report\nGenerated 2024-05-01\nAll Schools\n";

    fn write_fixture(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("growth.csv");
        fs::write(&path, format!("{}{}", BANNER, body)).unwrap();
        path
    }

    #[test]
    fn test_skips_banner_and_coerces_gain() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "Student ID,Scale Score Difference,Growth Quadrant\n\
             00123,12.5,\"High Proficiency, High Growth\"\n\
             45,N/A,\"Low Proficiency, Low Growth\"\n",
        );

        let df = clean_growth(&path).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["student_id", "BM1_gain_score"]);

        let ids = df.column("student_id").unwrap().str().unwrap();
        assert_eq!(ids.get(0), Some("123"));
        assert_eq!(ids.get(1), Some("45"));

        let gains = df.column("BM1_gain_score").unwrap().f64().unwrap();
        assert_relative_eq!(gains.get(0).unwrap(), 12.5);
        // "N/A" coerces to null instead of failing the load
        assert_eq!(gains.get(1), None);
    }

    #[test]
    fn test_drops_null_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "Student ID,Scale Score Difference,Growth Quadrant\n\
             7,3,\"Q, Q\"\n\
             ,8,\"Q, Q\"\n",
        );

        let df = clean_growth(&path).unwrap();

        assert_eq!(df.height(), 1);
        let ids = df.column("student_id").unwrap().str().unwrap();
        assert_eq!(ids.get(0), Some("7"));
    }

    #[test]
    fn test_fails_on_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "Student ID,Growth Quadrant\n7,\"Q, Q\"\n");

        let err = clean_growth(&path).unwrap_err().to_string();
        assert!(err.contains("Scale Score Difference"));
    }
}
