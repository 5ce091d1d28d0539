//! State Assessment Extract Cleaner
//!
//! The state vendor delivers a tab-delimited extract covering every subject
//! a student tested in. Only the math administration feeds the analysis, so
//! rows are filtered on the math test-code marker before the score and
//! identifier columns are kept.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{coerce_to_f64, ensure_columns, normalize_id_column};

/// Marker distinguishing the math administration from other subjects
pub const MATH_TEST_CODE: &str = "AZAM";

/// Clean the state assessment extract
///
/// Keeps rows whose `Test Code` contains the math marker; rows with a null
/// test code are excluded, not defaulted. Output columns:
/// `state_student_id` (canonical string), `ly_math_AASA_score` (f64).
pub fn clean_state_assessment(path: &Path) -> Result<DataFrame> {
    let parse_options = CsvParseOptions::default().with_separator(b'\t');

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open state assessment extract: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load state assessment extract: {:?}", path))?;

    ensure_columns(
        &df,
        &["Test Code", "SSID", "Total Scale Score"],
        "state assessment extract",
    )?;

    let df = df
        .lazy()
        .filter(
            col("Test Code")
                .cast(DataType::String)
                .str()
                .contains_literal(lit(MATH_TEST_CODE)),
        )
        .select([
            col("SSID").alias("state_student_id"),
            col("Total Scale Score").alias("ly_math_AASA_score"),
        ])
        .collect()
        .with_context(|| "Failed to filter state assessment rows")?;

    let df = coerce_to_f64(df, "ly_math_AASA_score")?;
    normalize_id_column(df, "state_student_id")
}
