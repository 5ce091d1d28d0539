//! Print the shape and columns of each raw source
//!
//! Usage:
//!   cargo run --bin inspect_sources [base_dir]
//!
//! Useful when an upstream export drifts and a cleaner starts rejecting it.

use polars::prelude::*;
use std::path::Path;

use bridge_etl::PipelineConfig;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let base = args.get(1).map(String::as_str).unwrap_or(".");
    let config = PipelineConfig::from_base_dir(Path::new(base));

    let inputs = &config.inputs;
    // (name, filename, separator, lines to skip before the header)
    let sources = [
        ("BM1 benchmark", inputs.bm1_benchmark.as_str(), b',', 0usize),
        ("Pretest benchmark", inputs.pretest_benchmark.as_str(), b',', 0),
        ("State assessment", inputs.state_assessment.as_str(), b'\t', 0),
        ("Growth report", inputs.growth_report.as_str(), b',', 3),
        ("Enrollment", inputs.enrollment.as_str(), b',', 0),
        ("Participants", inputs.participants.as_str(), b',', 0),
    ];

    for (name, filename, separator, skip) in sources {
        let path = config.raw_path(filename);
        println!("\n=== {} ({:?}) ===", name, path);

        if !path.exists() {
            println!("  MISSING");
            continue;
        }

        let parse_options = CsvParseOptions::default().with_separator(separator);
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_skip_rows(skip)
            .with_infer_schema_length(None)
            .with_parse_options(parse_options)
            .try_into_reader_with_file_path(Some(path))?
            .finish()?;

        println!("  {} rows x {} columns", df.height(), df.width());
        println!("  Columns: {:?}", df.get_column_names());
    }

    println!();
    Ok(())
}
