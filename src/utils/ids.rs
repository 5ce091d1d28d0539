//! Identifier Normalization
//!
//! Every source encodes the student identifier differently: padded with
//! leading zeros, surrounded by whitespace, or inferred as a numeric column
//! by the CSV reader. All joins run on the canonical string form produced
//! here.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Canonical string form of a raw identifier value
///
/// Trims surrounding whitespace and strips leading zero characters, so
/// `" 00123 "` and `"123"` produce the same join key. An all-zero id
/// collapses to `"0"` rather than the empty string, which would alias
/// distinct ids onto one ambiguous key.
pub fn canonical_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.trim_start_matches('0');

    if stripped.is_empty() && !trimmed.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Normalize an identifier column in place, preserving nulls
///
/// Integer-typed columns cast straight to string; float-typed columns cast
/// through `Int64` first so a reader-inferred `123.0` joins as `"123"`.
pub fn normalize_id_column(df: DataFrame, name: &str) -> Result<DataFrame> {
    let column = df
        .column(name)
        .with_context(|| format!("Missing identifier column '{}'", name))?;

    let as_string = match column.dtype() {
        DataType::String => column.clone(),
        DataType::Float32 | DataType::Float64 => column
            .cast(&DataType::Int64)
            .and_then(|c| c.cast(&DataType::String))
            .with_context(|| format!("Failed to cast float column '{}' to string", name))?,
        _ => column
            .cast(&DataType::String)
            .with_context(|| format!("Failed to cast column '{}' to string", name))?,
    };

    let normalized: StringChunked = as_string
        .str()
        .with_context(|| format!("Column '{}' is not string-typed after cast", name))?
        .into_iter()
        .map(|opt| opt.map(canonical_id))
        .collect();

    let mut series = normalized.into_series();
    series.rename(name.into());

    let mut df = df;
    df.with_column(series)
        .with_context(|| format!("Failed to replace column '{}'", name))?;

    Ok(df)
}
