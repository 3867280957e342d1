use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

use super::counts::ModelCounts;
use super::model::{Record, MODEL, OUTPUT_FIELDS, PRICE};

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// First letter of each whitespace-separated word uppercased, the rest
/// lowercased. Whitespace is preserved as-is.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Rewrite `price` as a fixed two-decimal string (`{:.2}`, ties round to
/// even) and title-case the model. A non-numeric price means an upstream
/// feed broke its contract and aborts the run; an absent price or model is
/// left absent and renders as empty.
fn normalize(record: &mut Record) -> Result<()> {
    let price = match record.get(PRICE) {
        Some(raw) => Some(
            raw.trim()
                .parse::<f64>()
                .with_context(|| format!("price {raw:?} is not a number"))?,
        ),
        None => None,
    };
    if let Some(price) = price {
        record.insert(PRICE, format!("{price:.2}"));
    }
    let model = record.get(MODEL).map(title_case);
    if let Some(model) = model {
        record.insert(MODEL, model);
    }
    Ok(())
}

fn format_line(record: &Record) -> String {
    OUTPUT_FIELDS
        .iter()
        .map(|field| record.get(field).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",")
}

// ---------------------------------------------------------------------------
// Filter pass
// ---------------------------------------------------------------------------

/// Filter decision for one buffered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Retained,
    Dropped,
}

/// Re-stream the buffered records against the final counts: write the fixed
/// header line, drop every record whose model occurs fewer than `threshold`
/// times across the corpus, normalize and write the rest in buffer order.
///
/// `observe` is called once per record scanned (progress hooks, simulated
/// latency); it has no influence on the output. Returns the number of
/// records written.
pub fn write_filtered<W, I, F>(
    records: I,
    counts: &ModelCounts,
    threshold: u64,
    out: W,
    mut observe: F,
) -> Result<u64>
where
    W: Write,
    I: Iterator<Item = Result<Record>>,
    F: FnMut(Outcome),
{
    let mut out = BufWriter::new(out);
    writeln!(out, "{}", OUTPUT_FIELDS.join(",")).context("writing output header")?;

    let mut written = 0;
    for record in records {
        let mut record = record?;
        if counts.get(record.model()) < threshold {
            observe(Outcome::Dropped);
            continue;
        }
        normalize(&mut record)?;
        writeln!(out, "{}", format_line(&record)).context("writing output record")?;
        written += 1;
        observe(Outcome::Retained);
    }

    out.flush().context("flushing output")?;
    Ok(written)
}
