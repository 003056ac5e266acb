//! JSON-lines sink over any writer

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::Sink;
use crate::core::{Record, Result};

/// Writes each record as a single JSON line (JSONL format), compatible with
/// log aggregation tools like ELK and Loki.
///
/// Records are written through immediately, one `write` per record, so
/// output is observable without an explicit flush.
pub struct WriterSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl WriterSink<File> {
    /// Appends to the file at `path`, creating it if needed.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn accept(&mut self, record: &Record) -> Result<()> {
        let line = record.to_json()?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}
