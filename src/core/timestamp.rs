//! Timestamp rendering for the record `time` field

use chrono::{DateTime, Utc};

/// Format of the `time` field attached to every record.
///
/// Unix variants render as JSON numbers, which are smaller and faster to
/// parse than most timestamps; everything else renders as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// RFC 3339: `2025-01-08T10:30:45Z`. The default.
    #[default]
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format string
    Custom(String),
}

impl TimeFormat {
    /// Format a `DateTime<Utc>` according to this format.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimeFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            }
            TimeFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimeFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimeFormat::Unix => datetime.timestamp().to_string(),
            TimeFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimeFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimeFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Render for the JSON record: numbers for the Unix variants, strings
    /// otherwise.
    pub(crate) fn render_json(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimeFormat::Unix => datetime.timestamp().into(),
            TimeFormat::UnixMillis => datetime.timestamp_millis().into(),
            TimeFormat::UnixMicros => datetime.timestamp_micros().into(),
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }
}
