use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::counts::ModelCounts;
use super::model::{self, Record};

// ---------------------------------------------------------------------------
// Extension dispatch
// ---------------------------------------------------------------------------

/// Source encodings, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.csv` – header line, then comma-separated rows zipped positionally.
    Delimited,
    /// `.json` – one self-describing JSON object per line.
    JsonLines,
    /// `.xml` – simplified tag-per-line markup, one `<row>` block per record.
    Markup,
}

impl SourceFormat {
    /// All recognized formats, in the order the pipeline ingests them.
    pub const ALL: [SourceFormat; 3] = [Self::Delimited, Self::JsonLines, Self::Markup];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Delimited => "csv",
            Self::JsonLines => "json",
            Self::Markup => "xml",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// Open `path` as a lazy stream of its records. Every record is counted
    /// into `counts` before it is yielded, so a record's own contribution is
    /// always visible downstream of it.
    pub fn open<'c>(self, path: &Path, counts: &'c mut ModelCounts) -> Result<RecordStream<'c>> {
        log::debug!("Reading {} as {self:?}", path.display());
        match self {
            Self::Delimited => DelimitedRecords::open(path, counts).map(RecordStream::Delimited),
            Self::JsonLines => JsonLineRecords::open(path, counts).map(RecordStream::JsonLines),
            Self::Markup => MarkupRecords::open(path, counts).map(RecordStream::Markup),
        }
    }
}

/// A parser for one source file: a finite, non-restartable record stream.
/// One variant per encoding (tagged dispatch, no trait objects).
pub enum RecordStream<'c> {
    Delimited(DelimitedRecords<'c>),
    JsonLines(JsonLineRecords<'c>),
    Markup(MarkupRecords<'c>),
}

impl Iterator for RecordStream<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Delimited(p) => p.next(),
            Self::JsonLines(p) => p.next(),
            Self::Markup(p) => p.next(),
        }
    }
}

// ---------------------------------------------------------------------------
// Delimited text (.csv)
// ---------------------------------------------------------------------------

/// Comma-separated rows zipped positionally against the header line.
///
/// Short rows are tolerated and yield partial records with the trailing
/// fields absent; the legacy feeds are full of them. Rows longer than the
/// header drop the surplus values (zip semantics).
pub struct DelimitedRecords<'c> {
    header: Vec<String>,
    rows: csv::StringRecordsIntoIter<BufReader<File>>,
    counts: &'c mut ModelCounts,
}

impl<'c> DelimitedRecords<'c> {
    fn open(path: &Path, counts: &'c mut ModelCounts) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));
        let header: Vec<String> = reader
            .headers()
            .with_context(|| format!("reading CSV header of {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();
        Ok(Self {
            header,
            rows: reader.into_records(),
            counts,
        })
    }
}

impl Iterator for DelimitedRecords<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e).context("reading CSV row")),
        };
        let record: Record = self
            .header
            .iter()
            .zip(row.iter())
            .map(|(field, value)| (field.clone(), value.to_string()))
            .collect();
        self.counts.record(record.model());
        Some(Ok(record))
    }
}

// ---------------------------------------------------------------------------
// Line-delimited JSON (.json)
// ---------------------------------------------------------------------------

/// One JSON object per line. Blank lines are skipped; anything else that
/// fails to parse is fatal, since every line is supposed to be a complete
/// self-describing record.
pub struct JsonLineRecords<'c> {
    lines: Lines<BufReader<File>>,
    counts: &'c mut ModelCounts,
}

impl<'c> JsonLineRecords<'c> {
    fn open(path: &Path, counts: &'c mut ModelCounts) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            counts,
        })
    }
}

impl Iterator for JsonLineRecords<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e).context("reading JSON lines")),
            };
            if line.trim().is_empty() {
                continue;
            }
            let record = match parse_json_record(&line) {
                Ok(record) => record,
                Err(e) => return Some(Err(e)),
            };
            self.counts.record(record.model());
            return Some(Ok(record));
        }
    }
}

fn parse_json_record(line: &str) -> Result<Record> {
    let value: JsonValue = serde_json::from_str(line).context("parsing JSON record")?;
    let object = value.as_object().context("JSON record is not an object")?;
    Ok(object
        .iter()
        .map(|(field, value)| (field.clone(), json_to_field(value)))
        .collect())
}

/// Flatten a JSON scalar to the record's string representation.
fn json_to_field(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Simplified markup (.xml)
// ---------------------------------------------------------------------------

/// Tags that contribute a field, matched by prefix against the trimmed line.
/// Prefix matching (`<year` also matches a `<year_built>` line) reproduces
/// the legacy reader; the feeds only ever contain the canonical tags.
const MARKUP_FIELDS: [(&str, &str); 4] = [
    ("<car_model", model::MODEL),
    ("<year", model::YEAR),
    ("<price", model::PRICE),
    ("<fuel", model::FUEL),
];

/// Line prefix that closes a record block.
const ROW_CLOSE: &str = "</row";

#[derive(Debug, Error)]
#[error("markup field line has no '>' delimiter: {line:?}")]
pub struct MarkupError {
    line: String,
}

/// Accumulates one field per recognized tag line and emits the record when
/// the closing row tag arrives. Unrecognized lines are skipped; a partial
/// record left open at end of file is discarded, matching the legacy reader.
pub struct MarkupRecords<'c> {
    lines: Lines<BufReader<File>>,
    current: Record,
    counts: &'c mut ModelCounts,
}

impl<'c> MarkupRecords<'c> {
    fn open(path: &Path, counts: &'c mut ModelCounts) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            current: Record::new(),
            counts,
        })
    }
}

impl Iterator for MarkupRecords<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e).context("reading markup lines")),
            };
            let line = line.trim();
            if line.starts_with(ROW_CLOSE) {
                let record = std::mem::take(&mut self.current);
                self.counts.record(record.model());
                return Some(Ok(record));
            }
            if let Some((_, field)) = MARKUP_FIELDS.iter().find(|(tag, _)| line.starts_with(tag)) {
                match markup_value(line) {
                    Ok(value) => self.current.insert(*field, value),
                    Err(e) => return Some(Err(e.into())),
                }
            }
        }
    }
}

/// Text strictly after the first `>`, up to the next `<` if there is one.
fn markup_value(line: &str) -> Result<String, MarkupError> {
    let (_, rest) = line.split_once('>').ok_or_else(|| MarkupError {
        line: line.to_string(),
    })?;
    let value = rest.split_once('<').map_or(rest, |(value, _)| value);
    Ok(value.to_string())
}
