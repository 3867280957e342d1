use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::data::buffer::RecordBuffer;
use crate::data::counts::ModelCounts;
use crate::data::output::{self, Outcome};
use crate::discover;
use crate::progress;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything one pipeline run needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for `.csv` / `.json` / `.xml` source files.
    pub data_dir: PathBuf,
    /// Destination of the normalized CSV.
    pub output_file: PathBuf,
    /// Minimum corpus-wide occurrences of a model for its records to be kept.
    pub threshold: u64,
    /// Simulated per-record source latency; never affects output content.
    pub delay: Duration,
    /// Suppress progress bars.
    pub quiet: bool,
}

/// Counters reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files_read: usize,
    pub records_read: u64,
    pub records_written: u64,
}

// ---------------------------------------------------------------------------
// Two-pass driver
// ---------------------------------------------------------------------------

/// Run the pipeline: ingest every source file into the spill buffer while
/// counting models, then re-stream the buffer through the threshold filter
/// into the output file.
///
/// The filter predicate is only well-defined once the whole corpus has been
/// counted, so no filtering decision is made before ingestion finishes; the
/// buffer is what lets the second pass avoid re-reading the heterogeneous
/// sources.
pub fn run(config: &Config) -> Result<RunSummary> {
    let sources = discover::discover(&config.data_dir)?;
    if sources.is_empty() {
        log::warn!("No source files found in {}", config.data_dir.display());
    }

    // ---- Ingestion pass ----
    let mut counts = ModelCounts::new();
    let mut buffer = RecordBuffer::new()?;
    let bar = progress::spinner(config.quiet, "Buffering records");
    for (format, path) in &sources {
        let records = format.open(path, &mut counts)?;
        for record in records {
            let record = record.with_context(|| format!("reading {}", path.display()))?;
            buffer.append(&record)?;
            bar.inc(1);
            sleep(config.delay);
        }
    }
    bar.finish();

    let records_read = buffer.len();
    log::info!(
        "Buffered {} records from {} files ({} distinct models)",
        records_read,
        sources.len(),
        counts.distinct()
    );

    // ---- Filter pass ----
    // `counts` is only borrowed immutably from here on: nothing can be
    // counted once filtering has started.
    let reader = buffer.into_reader()?;
    let out = File::create(&config.output_file)
        .with_context(|| format!("creating {}", config.output_file.display()))?;
    let bar = progress::bar(config.quiet, "Writing records", records_read);
    let records_written = output::write_filtered(
        reader,
        &counts,
        config.threshold,
        out,
        |outcome| {
            bar.inc(1);
            if outcome == Outcome::Retained {
                sleep(config.delay);
            }
        },
    )?;
    bar.finish();

    Ok(RunSummary {
        files_read: sources.len(),
        records_read,
        records_written,
    })
}

fn sleep(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
