//! Enrollment Roster Cleaner
//!
//! The enrollment export is the cross-reference between the district id
//! (`PermID`) and the state id (`SAISID`), and carries student PII that
//! must not reach the analysis file. PII columns are dropped with
//! ignore-missing semantics so schema drift in the export does not break
//! the pipeline.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{drop_columns_if_present, ensure_columns, normalize_id_column};

/// PII columns removed from the roster when present
pub const PII_COLUMNS: [&str; 7] = [
    "HomeRoom",
    "FirstName",
    "LastName",
    "Email",
    "MiddleName",
    "Birth Date",
    "Status",
];

/// Clean the enrollment roster
///
/// Output columns: `student_id`, `state_student_id` (both canonical
/// strings), `school_name`.
pub fn clean_enrollment(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open enrollment export: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load enrollment export: {:?}", path))?;

    let df = drop_columns_if_present(df, &PII_COLUMNS);

    ensure_columns(&df, &["PermID", "SAISID", "School"], "enrollment export")?;

    let df = df
        .lazy()
        .select([
            col("PermID").alias("student_id"),
            col("SAISID").alias("state_student_id"),
            col("School").alias("school_name"),
        ])
        .collect()
        .with_context(|| "Failed to select enrollment columns")?;

    let df = normalize_id_column(df, "student_id")?;
    normalize_id_column(df, "state_student_id")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("enrollment.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_drops_pii_and_normalizes_both_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "PermID,SAISID,School,HomeRoom,FirstName,LastName,Email,MiddleName,Birth Date,Status\n\
             007,00555,Desert Vista,12B,Ana,Lopez,a@example.org,M,2012-04-01,Active\n",
        );

        let df = clean_enrollment(&path).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["student_id", "state_student_id", "school_name"]);

        let ids = df.column("student_id").unwrap().str().unwrap();
        assert_eq!(ids.get(0), Some("7"));

        let state_ids = df.column("state_student_id").unwrap().str().unwrap();
        assert_eq!(state_ids.get(0), Some("555"));

        let schools = df.column("school_name").unwrap().str().unwrap();
        assert_eq!(schools.get(0), Some("Desert Vista"));
    }

    #[test]
    fn test_tolerates_absent_pii_columns() {
        let dir = tempfile::tempdir().unwrap();
        // Only two of the PII columns are present in this export
        let path = write_fixture(
            &dir,
            "PermID,SAISID,School,FirstName,Email\n\
             1,10,North,Ana,a@example.org\n\
             2,20,South,Ben,b@example.org\n",
        );

        let df = clean_enrollment(&path).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_fails_on_missing_identifier_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "PermID,School\n1,North\n");

        let err = clean_enrollment(&path).unwrap_err().to_string();
        assert!(err.contains("SAISID"));
    }
}
