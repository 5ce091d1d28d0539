//! Pipeline Path Configuration
//!
//! Resolves the raw-input and processed-output directories plus the fixed
//! raw filenames. The configuration is an explicit value passed into every
//! loader and writer, so the pipeline can run against the production tree
//! or a test fixture directory without touching any global state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw-input filenames under the raw data directory
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputFiles {
    pub bm1_benchmark: String,
    pub pretest_benchmark: String,
    pub state_assessment: String,
    pub growth_report: String,
    pub enrollment: String,
    pub participants: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            bm1_benchmark: "BM1_benchmark.csv".to_string(),
            pretest_benchmark: "Pretest_benchmark.csv".to_string(),
            state_assessment: "AASA_extract.txt".to_string(),
            growth_report: "growth_report.csv".to_string(),
            enrollment: "enrollment_export.csv".to_string(),
            participants: "participant_list.csv".to_string(),
        }
    }
}

/// Paths for one pipeline run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Directory holding the raw source exports
    pub data_raw: PathBuf,

    /// Directory the output files are written to
    pub data_processed: PathBuf,

    /// Raw filenames (defaults match the program's export names)
    #[serde(default)]
    pub inputs: InputFiles,
}

impl PipelineConfig {
    /// Standard layout under a base directory: `data/raw` and `data/processed`
    pub fn from_base_dir(base: &Path) -> Self {
        Self {
            data_raw: base.join("data").join("raw"),
            data_processed: base.join("data").join("processed"),
            inputs: InputFiles::default(),
        }
    }

    /// Load configuration from a JSON file
    ///
    /// Omitted `inputs` fields fall back to the default export names.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| "Failed to parse config JSON")
    }

    /// Path of a raw input file
    pub fn raw_path(&self, name: &str) -> PathBuf {
        self.data_raw.join(name)
    }

    /// Path of a processed output file
    pub fn processed_path(&self, name: &str) -> PathBuf {
        self.data_processed.join(name)
    }
}
