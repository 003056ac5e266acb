//! Pretty console sink

use colored::Colorize;

use super::Sink;
use crate::core::{Record, Result};

/// Human-oriented output on stderr with optional colors.
///
/// This format is noticeably slower than the JSON writer sink and is meant
/// for development, not production throughput.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn format_line(&self, record: &Record) -> String {
        let time = match record.time.as_str() {
            Some(s) => s.to_string(),
            None => record.time.to_string(),
        };

        let label = format!("{:5}", record.level.map_or("LOG", |l| l.label()));
        let label = match record.level {
            Some(level) if self.use_colors => label.color(level.color_code()).to_string(),
            _ => label,
        };

        let mut line = format!("{} {} {}", time, label, record.message);
        if let Some(caller) = &record.caller {
            line.push_str(&format!(" caller={}", caller));
        }
        if let Some(error) = &record.error {
            line.push_str(&format!(" error={}", error.message().unwrap_or("null")));
        }
        for (key, value) in &record.fields {
            line.push_str(&format!(" {}={}", key, value));
        }
        if let Some(stack) = &record.stack {
            line.push('\n');
            line.push_str(stack);
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn accept(&mut self, record: &Record) -> Result<()> {
        eprintln!("{}", self.format_line(record));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
