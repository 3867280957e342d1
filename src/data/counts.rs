use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ModelCounts – per-model occurrence counts across the whole corpus
// ---------------------------------------------------------------------------

/// Frequency table keyed by model name exactly as it appears in source
/// (pre-normalization, case-sensitive).
///
/// Counting requires `&mut self` and the filter pass only ever holds a
/// `&ModelCounts`, so no record can be counted once filtering has begun;
/// the table is authoritative only after every source is exhausted.
#[derive(Debug, Default)]
pub struct ModelCounts {
    counts: HashMap<String, u64>,
}

impl ModelCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `model`.
    pub fn record(&mut self, model: &str) {
        *self.counts.entry(model.to_owned()).or_insert(0) += 1;
    }

    /// Occurrences of `model` seen so far. Unseen models count as zero:
    /// a model that never appeared fails any positive threshold, it is
    /// not an error.
    pub fn get(&self, model: &str) -> u64 {
        self.counts.get(model).copied().unwrap_or(0)
    }

    /// Number of distinct model names seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}
