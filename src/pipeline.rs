//! Pipeline Runner
//!
//! Cleans all sources, merges them onto the participant list, computes the
//! recruitment funnel, and writes the two output files. Every transform
//! completes in memory before the first byte is written, and each file goes
//! to a `.tmp` sibling before being renamed into place, so a failed run
//! never leaves a half-written artifact.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cleaners::{
    clean_benchmarks, clean_enrollment, clean_growth, clean_state_assessment, load_participants,
};
use crate::config::PipelineConfig;
use crate::funnel::FunnelCounts;
use crate::merge::{merge_sources, CleanedSources};

/// Funnel summary output filename
pub const SAMPLE_SIZES_FILE: &str = "sample_sizes.csv";

/// Enrolled-only analysis output filename
pub const ANALYSIS_FILE: &str = "analysis_file.csv";

/// What one pipeline run produced
#[derive(Debug)]
pub struct PipelineSummary {
    pub funnel: FunnelCounts,
    pub analysis_rows: usize,
    pub sample_sizes_path: PathBuf,
    pub analysis_path: PathBuf,
}

/// Run the full pipeline against one configuration
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    let inputs = &config.inputs;

    println!("Cleaning raw sources...");

    let mut bm1 = clean_benchmarks(&config.raw_path(&inputs.bm1_benchmark))?;
    bm1.rename("bm_score", "bm1_score".into())
        .with_context(|| "Failed to alias BM1 score column")?;

    let mut pretest = clean_benchmarks(&config.raw_path(&inputs.pretest_benchmark))?;
    pretest
        .rename("bm_score", "pretest_score".into())
        .with_context(|| "Failed to alias pretest score column")?;

    let state_assessment = clean_state_assessment(&config.raw_path(&inputs.state_assessment))?;
    let growth = clean_growth(&config.raw_path(&inputs.growth_report))?;
    let enrollment = clean_enrollment(&config.raw_path(&inputs.enrollment))?;

    println!("  BM1: {} rows", bm1.height());
    println!("  Pretest: {} rows", pretest.height());
    println!("  State assessment: {} rows", state_assessment.height());
    println!("  Growth: {} rows", growth.height());
    println!("  Enrollment: {} rows", enrollment.height());

    let participants = load_participants(&config.raw_path(&inputs.participants))?;
    println!("  Participants: {} rows", participants.height());

    println!("Merging onto the participant roster...");
    let sources = CleanedSources {
        enrollment,
        pretest,
        bm1,
        state_assessment,
        growth,
    };
    let merged = merge_sources(participants, &sources)?;

    let funnel = FunnelCounts::from_merged(&merged)?;
    println!("  Recommended: {}", funnel.recommended);
    println!("  Enrolled: {}", funnel.enrolled);
    println!("  Did not return: {}", funnel.did_not_return);

    // Both output frames are fully materialized before either file opens
    let mut enrolled_only = merged
        .lazy()
        .filter(col("state_student_id").is_not_null())
        .collect()
        .with_context(|| "Failed to filter merged table to enrolled rows")?;

    let mut sample_sizes = funnel.to_dataframe()?;

    let sample_sizes_path = config.processed_path(SAMPLE_SIZES_FILE);
    let analysis_path = config.processed_path(ANALYSIS_FILE);

    println!("Writing outputs...");
    write_csv_atomic(&mut sample_sizes, &sample_sizes_path)?;
    println!("  {:?}: {} rows", sample_sizes_path, sample_sizes.height());
    write_csv_atomic(&mut enrolled_only, &analysis_path)?;
    println!("  {:?}: {} rows", analysis_path, enrolled_only.height());

    Ok(PipelineSummary {
        funnel,
        analysis_rows: enrolled_only.height(),
        sample_sizes_path,
        analysis_path,
    })
}

/// Write a CSV through a `.tmp` sibling and rename it into place
fn write_csv_atomic(df: &mut DataFrame, path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("Output path has no parent directory: {:?}", path))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create output directory: {:?}", parent))?;

    let tmp_path = path.with_extension("csv.tmp");
    let file = fs::File::create(&tmp_path)
        .with_context(|| format!("Failed to create temp output file: {:?}", tmp_path))?;

    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {:?}", tmp_path))?;

    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move output into place: {:?}", path))?;

    Ok(())
}
