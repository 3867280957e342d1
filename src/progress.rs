use indicatif::{ProgressBar, ProgressStyle};

// ---------------------------------------------------------------------------
// Progress bars
// ---------------------------------------------------------------------------

/// Spinner for the ingestion pass, where the record total is not yet known.
pub fn spinner(quiet: bool, msg: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}: {pos} records ({per_sec})")
            .expect("valid progress template"),
    );
    bar.set_message(msg.to_string());
    bar
}

/// Bar for the filter pass, where the buffered record count is known.
pub fn bar(quiet: bool, msg: &str, total: u64) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {msg}: {pos}/{len} records ({eta})")
            .expect("valid progress template"),
    );
    bar.set_message(msg.to_string());
    bar
}
