//! Benchmark Export Cleaner
//!
//! The benchmark platform exports one row per student per test
//! administration with a scaled score and subject label. The same format
//! covers the BM1 and Pretest administrations, so this cleaner is
//! alias-agnostic: it always emits `bm_score` and the caller renames per
//! administration.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{coerce_to_f64, ensure_columns, normalize_id_column};

/// Clean one benchmark export
///
/// Output columns: `student_id` (canonical string), `subject`, `bm_score`
/// (f64). Fails if a required source column is absent.
pub fn clean_benchmarks(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open benchmark export: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load benchmark export: {:?}", path))?;

    ensure_columns(&df, &["StudentID", "ScaledScore", "Subject"], "benchmark export")?;

    let df = df
        .lazy()
        .select([
            col("StudentID").alias("student_id"),
            col("Subject").alias("subject"),
            col("ScaledScore").alias("bm_score"),
        ])
        .collect()
        .with_context(|| "Failed to select benchmark columns")?;

    let df = coerce_to_f64(df, "bm_score")?;
    normalize_id_column(df, "student_id")
}
