//! Merge Orchestrator
//!
//! Left-joins the participant roster with each cleaned table. Join order
//! matters: `state_student_id` only exists on the merged frame after the
//! enrollment join supplies it, so the state-assessment join comes after
//! enrollment.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashSet;

/// Cleaned source tables feeding the merge
pub struct CleanedSources {
    pub enrollment: DataFrame,
    pub pretest: DataFrame,
    pub bm1: DataFrame,
    pub state_assessment: DataFrame,
    pub growth: DataFrame,
}

/// Validate that a join key is unique among non-null values
///
/// A duplicated right-side key would multiply participant rows and break
/// the one-row-per-participant guarantee, so it fails loudly with the
/// offending ids named.
pub fn ensure_unique_key(df: &DataFrame, key: &str, context: &str) -> Result<()> {
    let ids = df
        .column(key)
        .with_context(|| format!("{}: Missing join key column '{}'", context, key))?
        .str()
        .with_context(|| format!("{}: Join key column '{}' is not string-typed", context, key))?;

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut duplicates: Vec<&str> = Vec::new();

    for value in ids.into_iter().flatten() {
        if !seen.insert(value) && !duplicates.contains(&value) {
            duplicates.push(value);
        }
    }

    if !duplicates.is_empty() {
        bail!(
            "{}: Join key '{}' has {} duplicated value(s): {:?}",
            context,
            key,
            duplicates.len(),
            duplicates
        );
    }

    Ok(())
}

/// Left-join every cleaned table onto the participant roster
///
/// One output row per participant; unmatched fields are null, never
/// dropped. The second benchmark join carries a `_bm1` suffix so its
/// duplicated `subject` column stays identifiable.
pub fn merge_sources(participants: DataFrame, sources: &CleanedSources) -> Result<DataFrame> {
    ensure_unique_key(&sources.enrollment, "student_id", "enrollment")?;
    ensure_unique_key(&sources.pretest, "student_id", "pretest")?;
    ensure_unique_key(&sources.bm1, "student_id", "benchmark 1")?;
    ensure_unique_key(&sources.state_assessment, "state_student_id", "state assessment")?;
    ensure_unique_key(&sources.growth, "student_id", "growth")?;

    participants
        .lazy()
        .join(
            sources.enrollment.clone().lazy(),
            [col("student_id")],
            [col("student_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            sources.pretest.clone().lazy(),
            [col("student_id")],
            [col("student_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            sources.bm1.clone().lazy(),
            [col("student_id")],
            [col("student_id")],
            JoinArgs::new(JoinType::Left).with_suffix(Some("_bm1".into())),
        )
        .join(
            sources.state_assessment.clone().lazy(),
            [col("state_student_id")],
            [col("state_student_id")],
            JoinArgs::new(JoinType::Left),
        )
        .join(
            sources.growth.clone().lazy(),
            [col("student_id")],
            [col("student_id")],
            JoinArgs::new(JoinType::Left),
        )
        .collect()
        .with_context(|| "Failed to merge cleaned sources")
}
