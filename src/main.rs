use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use dealership_etl::pipeline::{self, Config};

/// Ingest mixed-format dealership sales files, count models corpus-wide,
/// and emit a normalized CSV of the records whose model is frequent enough.
#[derive(Parser)]
#[command(name = "dealership-etl", version, about)]
struct Cli {
    /// Directory containing .csv / .json / .xml source files
    #[arg(long, default_value = "dealership_data")]
    data_dir: PathBuf,

    /// Output CSV file
    #[arg(long, short, default_value = "cars.csv")]
    output: PathBuf,

    /// Minimum corpus-wide model frequency for a record to be retained
    #[arg(long, short, default_value_t = 3)]
    threshold: u64,

    /// Simulated per-record source latency, in seconds (e.g. 0.05)
    #[arg(long, default_value_t = 0.0)]
    delay: f64,

    /// Suppress progress bars
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config {
        data_dir: cli.data_dir,
        output_file: cli.output,
        threshold: cli.threshold,
        delay: Duration::try_from_secs_f64(cli.delay).context("invalid --delay")?,
        quiet: cli.quiet,
    };

    let summary = pipeline::run(&config)?;
    log::info!(
        "Done: {} of {} records written to {}",
        summary.records_written,
        summary.records_read,
        config.output_file.display()
    );
    Ok(())
}
