//! Column-level helpers shared by the cleaners
//!
//! Schema validation with explicit error messages, tolerant column drops,
//! and numeric coercion that turns unparseable values into nulls.

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Validate that every required column is present
///
/// # Errors
/// Returns an error naming the missing columns and listing the columns
/// actually present, so a renamed upstream export is diagnosable from the
/// message alone.
pub fn ensure_columns(df: &DataFrame, required: &[&str], context: &str) -> Result<()> {
    let actual: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !actual.contains(*name))
        .collect();

    if !missing.is_empty() {
        return Err(anyhow!(
            "{}: Missing expected column(s) {:?}. Available columns: {:?}",
            context,
            missing,
            actual
        ));
    }

    Ok(())
}

/// Drop the listed columns, ignoring any that are absent
///
/// Upstream exports drift; a column disappearing from the export must not
/// break the run.
pub fn drop_columns_if_present(df: DataFrame, columns: &[&str]) -> DataFrame {
    let actual: HashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let present: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| actual.contains(*name))
        .collect();

    df.drop_many(present)
}

/// Coerce a column to `f64`, mapping unparseable values to null
///
/// String columns are parsed row by row (`"N/A"` becomes null, never an
/// error); numeric columns cast directly.
pub fn coerce_to_f64(df: DataFrame, name: &str) -> Result<DataFrame> {
    let column = df
        .column(name)
        .with_context(|| format!("Missing numeric column '{}'", name))?;

    let coerced: Float64Chunked = match column.dtype() {
        DataType::String => column
            .str()
            .with_context(|| format!("Failed to read string column '{}'", name))?
            .into_iter()
            .map(|opt| opt.and_then(|v| v.trim().parse::<f64>().ok()))
            .collect(),
        _ => column
            .cast(&DataType::Float64)
            .with_context(|| format!("Failed to cast column '{}' to f64", name))?
            .f64()
            .with_context(|| format!("Column '{}' did not cast to f64", name))?
            .clone(),
    };

    let mut series = coerced.into_series();
    series.rename(name.into());

    let mut df = df;
    df.with_column(series)
        .with_context(|| format!("Failed to replace column '{}'", name))?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ensure_columns_success() {
        let df = df![
            "StudentID" => [7i64],
            "ScaledScore" => [450i64],
        ]
        .unwrap();

        assert!(ensure_columns(&df, &["StudentID", "ScaledScore"], "test").is_ok());
    }

    #[test]
    fn test_ensure_columns_reports_missing() {
        let df = df!["StudentID" => [7i64]].unwrap();

        let err = ensure_columns(&df, &["StudentID", "ScaledScore"], "benchmark export")
            .unwrap_err()
            .to_string();

        assert!(err.contains("ScaledScore"));
        assert!(err.contains("benchmark export"));
        assert!(err.contains("StudentID")); // available columns listed
    }

    #[test]
    fn test_drop_columns_ignores_absent() {
        let df = df![
            "PermID" => [1i64],
            "Email" => ["x@y"],
        ]
        .unwrap();

        // "MiddleName" is not in the frame; the drop must still succeed
        let df = drop_columns_if_present(df, &["Email", "MiddleName"]);

        assert_eq!(df.width(), 1);
        assert!(df.column("PermID").is_ok());
        assert!(df.column("Email").is_err());
    }

    #[test]
    fn test_coerce_string_column() {
        let df = df![
            "gain" => ["12.5", "N/A", " 3 "],
        ]
        .unwrap();

        let df = coerce_to_f64(df, "gain").unwrap();
        let gains = df.column("gain").unwrap().f64().unwrap();

        assert_relative_eq!(gains.get(0).unwrap(), 12.5);
        assert_eq!(gains.get(1), None);
        assert_relative_eq!(gains.get(2).unwrap(), 3.0);
    }

    #[test]
    fn test_coerce_integer_column() {
        let df = df!["score" => [450i64, 391]].unwrap();

        let df = coerce_to_f64(df, "score").unwrap();
        let scores = df.column("score").unwrap().f64().unwrap();

        assert_relative_eq!(scores.get(0).unwrap(), 450.0);
    }
}
