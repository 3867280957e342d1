use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};

use anyhow::{Context, Result};

use super::model::Record;

// ---------------------------------------------------------------------------
// RecordBuffer – spill-to-disk store between the two passes
// ---------------------------------------------------------------------------

/// Durable scratch store for parsed records between the ingestion pass and
/// the filter pass.
///
/// Records are appended as single-line JSON to an anonymous temp file, so
/// the corpus never has to fit in memory and the original heterogeneous
/// sources never have to be re-read. The OS unlinks the file when the
/// handle drops, on success and failure alike.
pub struct RecordBuffer {
    writer: BufWriter<File>,
    len: u64,
}

impl RecordBuffer {
    pub fn new() -> Result<Self> {
        let file = tempfile::tempfile().context("creating record buffer temp file")?;
        Ok(Self {
            writer: BufWriter::new(file),
            len: 0,
        })
    }

    /// Append one record. Records are read back in exactly this order.
    pub fn append(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .context("serializing record to buffer")?;
        self.writer
            .write_all(b"\n")
            .context("writing to record buffer")?;
        self.len += 1;
        Ok(())
    }

    /// Number of records appended so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// End the append phase: flush, rewind, and hand the buffer over to the
    /// filter pass. Consumes the writer, so nothing can be appended once
    /// read-back has begun.
    pub fn into_reader(self) -> Result<BufferReader> {
        let mut file = self
            .writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("flushing record buffer")?;
        file.seek(SeekFrom::Start(0))
            .context("rewinding record buffer")?;
        Ok(BufferReader {
            lines: BufReader::new(file).lines(),
        })
    }
}

/// Iterator over the buffered records, yielding each appended record exactly
/// once, in append order.
pub struct BufferReader {
    lines: std::io::Lines<BufReader<File>>,
}

impl Iterator for BufferReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e).context("reading record buffer")),
        };
        Some(serde_json::from_str(&line).context("deserializing buffered record"))
    }
}
