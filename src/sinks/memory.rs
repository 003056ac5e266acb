//! In-memory capture sink

use parking_lot::Mutex;
use std::sync::Arc;

use super::Sink;
use crate::core::{Record, Result};

/// Collects serialized records in memory.
///
/// Cloning shares the underlying buffer, so a caller can keep a handle for
/// inspection while a logger owns the sink. This is the capture seam used
/// throughout the test suites.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured JSON lines joined with newlines.
    pub fn contents(&self) -> String {
        self.lines.lock().join("\n")
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Captured lines parsed back into JSON values.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn accept(&mut self, record: &Record) -> Result<()> {
        let line = record.to_json()?;
        self.lines.lock().push(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
