//! Data layer: record shape, format parsers, frequency counts, the spill
//! buffer, and the filtered output writer.
//!
//! ```text
//!  .csv / .json / .xml
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse each file → lazy Record stream, counting models
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  buffer   │  spill every Record to a temp file (JSON lines)
//!   └──────────┘
//!        │   ← counts are final from here on
//!        ▼
//!   ┌──────────┐
//!   │  output   │  threshold filter → normalize → CSV
//!   └──────────┘
//! ```

pub mod buffer;
pub mod counts;
pub mod loader;
pub mod model;
pub mod output;
