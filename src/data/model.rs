use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Canonical field names
// ---------------------------------------------------------------------------

/// Field holding the model name; also the key of the frequency table.
pub const MODEL: &str = "car_model";
pub const YEAR: &str = "year_of_manufacture";
pub const PRICE: &str = "price";
pub const FUEL: &str = "fuel";

/// Column order of the output file, and its header line.
pub const OUTPUT_FIELDS: [&str; 4] = [MODEL, YEAR, PRICE, FUEL];

// ---------------------------------------------------------------------------
// Record – one vehicle-sale entry
// ---------------------------------------------------------------------------

/// One vehicle-sale record: field name → raw string value.
///
/// Every source format funnels into this shape. Extra fields are carried
/// along untouched; missing fields render as the empty string on output.
/// Serializes as a flat JSON object, which is the on-disk form used by the
/// intermediate buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Model name exactly as it appears in source. A record without a
    /// `car_model` field counts under the empty string.
    pub fn model(&self) -> &str {
        self.get(MODEL).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Record(iter.into_iter().collect())
    }
}
