//! The structured record handed to the engine
//!
//! Serialization is implemented by hand so the key order is deterministic:
//! `level`, `time`, `message`, then the conditional `caller`, `error` and
//! `stack` attributes, then fields in binding/argument order. Two records
//! built from the same inputs serialize identically except for `time`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::Result;
use super::level::Level;
use super::value::{ErrorValue, Value};

/// One log record, assembled by the facade and emitted by the engine.
#[derive(Debug, Clone)]
pub struct Record {
    /// `None` for level-less print calls; such records carry no `level` key.
    pub level: Option<Level>,
    /// Stamped by the emitter right before fan-out.
    pub time: serde_json::Value,
    pub message: String,
    /// Call site, attached by trace-level entry points.
    pub caller: Option<String>,
    /// Extracted error; an absent error serializes as a null `error` field.
    pub error: Option<ErrorValue>,
    /// Captured stack trace, when stack capture applies.
    pub stack: Option<String>,
    /// Key/value fields in insertion order, bound fields first.
    pub fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(level: Option<Level>, message: impl Into<String>) -> Self {
        Self {
            level,
            time: serde_json::Value::Null,
            message: message.into(),
            caller: None,
            error: None,
            stack: None,
            fields: Vec::new(),
        }
    }

    /// Appends a flat key/value argument list as fields. Keys are the
    /// `Display` form of the key-position argument; an odd trailing key is
    /// paired with a null value rather than dropped.
    pub fn push_pairs(&mut self, args: &[Value]) {
        self.fields.extend(pairs(args));
    }

    pub(crate) fn prepend_fields(&mut self, bound: &[(String, Value)]) {
        if !bound.is_empty() {
            self.fields.splice(0..0, bound.iter().cloned());
        }
    }

    /// Single-line JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Pairs up a flat key/value argument list.
pub(crate) fn pairs(args: &[Value]) -> Vec<(String, Value)> {
    args.chunks(2)
        .map(|pair| {
            let key = pair[0].to_string();
            let value = pair.get(1).cloned().unwrap_or(Value::Null);
            (key, value)
        })
        .collect()
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(level) = self.level {
            map.serialize_entry("level", level.as_str())?;
        }
        map.serialize_entry("time", &self.time)?;
        map.serialize_entry("message", &self.message)?;
        if let Some(caller) = &self.caller {
            map.serialize_entry("caller", caller)?;
        }
        if let Some(error) = &self.error {
            map.serialize_entry("error", &error.message())?;
        }
        if let Some(stack) = &self.stack {
            map.serialize_entry("stack", stack)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
