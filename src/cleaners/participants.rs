//! Participant List Loader
//!
//! The participant list defines the study population and is the root of
//! the merge: every downstream join is a left join against it. All of its
//! columns (intervention group included) pass through untouched; only the
//! identifier is normalized.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{ensure_columns, normalize_id_column};

/// Load the participant list
pub fn load_participants(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open participant list: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load participant list: {:?}", path))?;

    ensure_columns(&df, &["student_id"], "participant list")?;

    normalize_id_column(df, "student_id")
}
