//! Heterogeneous argument values for log calls
//!
//! Every variadic logging call takes a slice of [`Value`]. The tagged
//! `Error` variant is what the classifier scans for when it extracts an
//! embedded error from a field list.

use serde::ser::{Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;

/// A single argument in a logging call: a format substitution, a field key,
/// a field value or an embedded error.
#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Error(ErrorValue),
    Null,
}

impl Value {
    /// Wraps an error so it can travel through a field list.
    pub fn error(err: &dyn StdError) -> Self {
        Value::Error(ErrorValue::new(err))
    }

    /// Wraps an error that carries its own captured stack.
    pub fn traced_error<E: Traced + ?Sized>(err: &E) -> Self {
        Value::Error(ErrorValue::traced(err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Error(err) => write!(f, "{}", err.message().unwrap_or("<nil>")),
            Value::Null => write!(f, "null"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(fl) => serializer.serialize_f64(*fl),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Error(err) => match err.message() {
                Some(msg) => serializer.serialize_str(msg),
                None => serializer.serialize_unit(),
            },
            Value::Null => serializer.serialize_unit(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

/// An error captured for logging: its rendered message and, when the error
/// type exposes one, a stack captured at the error's construction site.
///
/// `message == None` models the "nil error" handed to a dedicated
/// error-logging entry point; it renders as a null `error` field and never
/// touches the error counter.
#[derive(Debug, Clone)]
pub struct ErrorValue {
    message: Option<String>,
    stack: Option<String>,
}

impl ErrorValue {
    pub fn new(err: &dyn StdError) -> Self {
        Self {
            message: Some(err.to_string()),
            stack: None,
        }
    }

    /// Captures an error together with the stack it carries.
    pub fn traced<E: Traced + ?Sized>(err: &E) -> Self {
        Self {
            message: Some(err.to_string()),
            stack: Some(err.stack_trace()),
        }
    }

    /// The absent-error placeholder.
    pub fn absent() -> Self {
        Self {
            message: None,
            stack: None,
        }
    }

    /// An error built from a bare message, used by the fatal and panic paths.
    pub(crate) fn synthesized(msg: impl Into<String>) -> Self {
        Self {
            message: Some(msg.into()),
            stack: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn is_absent(&self) -> bool {
        self.message.is_none()
    }
}

/// Capability for error types that capture a stack trace when constructed.
/// The logger prefers this stack over capturing a fresh one at the call site.
pub trait Traced: StdError {
    fn stack_trace(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("key").to_string(), "key");
        assert_eq!(Value::from(42_i64).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_error_value() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing file");
        let err = ErrorValue::new(&io_err);
        assert_eq!(err.message(), Some("missing file"));
        assert!(err.stack().is_none());
        assert!(!err.is_absent());

        let absent = ErrorValue::absent();
        assert!(absent.is_absent());
        assert_eq!(absent.message(), None);
    }

    #[test]
    fn test_error_value_in_value() {
        let io_err = io::Error::new(io::ErrorKind::Other, "boom");
        let value = Value::error(&io_err);
        assert!(value.is_error());
        assert_eq!(value.to_string(), "boom");
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&Value::from("a")).unwrap(), "\"a\"");
        assert_eq!(serde_json::to_string(&Value::from(3_i64)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Value::Error(ErrorValue::absent())).unwrap(),
            "null"
        );
    }
}
