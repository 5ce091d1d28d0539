//! Recruitment Funnel Counts
//!
//! Recommended = every student on the participant list. Enrolled = those
//! with a state id after the enrollment join, meaning they physically
//! returned to the program. Did not return = the difference.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Funnel counts over the merged table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelCounts {
    pub recommended: usize,
    pub enrolled: usize,
    pub did_not_return: usize,
}

impl FunnelCounts {
    /// Compute the funnel from the merged table
    ///
    /// A null `state_student_id` is the did-not-return sentinel.
    pub fn from_merged(merged: &DataFrame) -> Result<Self> {
        let state_ids = merged
            .column("state_student_id")
            .with_context(|| "Merged table is missing 'state_student_id'")?;

        let recommended = merged.height();
        let enrolled = recommended - state_ids.null_count();

        Ok(Self {
            recommended,
            enrolled,
            did_not_return: recommended - enrolled,
        })
    }

    /// Summary table written to `sample_sizes.csv`
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        df![
            "metric" => ["Recommended", "Enrolled", "Did not return"],
            "count" => [
                self.recommended as i64,
                self.enrolled as i64,
                self.did_not_return as i64,
            ],
        ]
        .with_context(|| "Failed to build funnel summary table")
    }
}
