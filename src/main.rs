use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use barkscope::data::loader;
use barkscope::data::model::RawTable;
use barkscope::{run_pipeline, AnalysisConfig};

/// Analyze Magnetic Barkhausen Noise recordings and print per-signal
/// feature reports.
#[derive(Debug, Parser)]
#[command(name = "barkscope", version, about)]
struct Cli {
    /// Recording files to analyze (.parquet, .csv, .json); one table each.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Samples per channel in one recording.
    #[arg(long, default_value_t = 100_000)]
    rows: usize,

    /// Sensor channels per recording (deployed rigs use 5 or 10).
    #[arg(long, default_value_t = 5)]
    channels: usize,

    /// Minimum peak prominence as a fraction of the global maximum.
    #[arg(long, default_value_t = 0.2)]
    prominence: f64,

    /// Envelope ringing noise gate as a fraction of max |x|.
    #[arg(long, default_value_t = 0.01)]
    ringing_threshold: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = AnalysisConfig {
        rows: cli.rows,
        channels: cli.channels,
        min_prominence_ratio: cli.prominence,
        ringing_threshold_ratio: cli.ringing_threshold,
        ..AnalysisConfig::default()
    };

    // Per-file load failures are logged and skipped; the batch continues.
    let mut tables: Vec<RawTable> = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match loader::load_file(path) {
            Ok(table) => {
                log::info!("loaded {} rows from {}", table.len(), path.display());
                tables.push(table);
            }
            Err(e) => log::error!("failed to load {}: {e:#}", path.display()),
        }
    }
    if tables.is_empty() {
        bail!("no recording could be loaded");
    }

    let outcome = run_pipeline(&tables, &config);
    log::info!(
        "processed {} valid MBN signals out of {} loaded tables",
        outcome.signals.len(),
        tables.len()
    );

    for report in &outcome.reports {
        print!("{report}");
    }

    Ok(())
}
