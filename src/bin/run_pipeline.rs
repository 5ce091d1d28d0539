//! Run the full Summer Bridge data preparation pipeline
//!
//! Usage:
//!   cargo run --bin run_pipeline [base_dir]
//!   cargo run --bin run_pipeline -- --config pipeline.json
//!
//! With a base directory, raw files are read from `<base>/data/raw` and
//! outputs land in `<base>/data/processed`.

use std::path::Path;
use std::time::Instant;

use bridge_etl::{pipeline, PipelineConfig};

fn main() -> anyhow::Result<()> {
    println!("\n{}", "=".repeat(70));
    println!("Summer Bridge Data Preparation");
    println!("{}", "=".repeat(70));
    println!();

    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(1).map(String::as_str) {
        Some("--config") => {
            let path = args.get(2).map(String::as_str).unwrap_or("pipeline.json");
            PipelineConfig::load(Path::new(path))?
        }
        Some(base) => PipelineConfig::from_base_dir(Path::new(base)),
        None => PipelineConfig::from_base_dir(Path::new(".")),
    };

    println!("Raw data: {:?}", config.data_raw);
    println!("Processed data: {:?}", config.data_processed);
    println!();

    let start = Instant::now();
    let summary = pipeline::run(&config)?;
    let elapsed = start.elapsed();

    println!("\n{}", "=".repeat(70));
    println!("Recommended: {}", summary.funnel.recommended);
    println!("Enrolled: {}", summary.funnel.enrolled);
    println!("Did not return: {}", summary.funnel.did_not_return);
    println!("Analysis rows written: {}", summary.analysis_rows);
    println!("Total time: {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    println!("{}", "=".repeat(70));

    Ok(())
}
