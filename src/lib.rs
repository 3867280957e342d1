//! Two-pass, out-of-core ETL for vehicle-sale records.
//!
//! Dealerships deliver sales data as a mix of delimited text (`.csv`),
//! line-delimited JSON (`.json`) and a simplified tag-per-line markup
//! (`.xml`). The pipeline normalizes all of them into one record shape,
//! counts occurrences per model across the whole corpus, and emits a single
//! CSV containing only records whose model meets a frequency threshold,
//! with title-cased model names and two-decimal prices.
//!
//! The threshold predicate depends on the *complete* counts, which are only
//! known after every source is read, so the run is split into two passes
//! around a spill-to-disk buffer: ingest-and-count into the buffer, then
//! re-stream the buffer through the filter. Neither pass keeps the corpus
//! in memory.

pub mod data;
pub mod discover;
pub mod pipeline;
pub mod progress;
