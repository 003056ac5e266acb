//! Logging macros for variadic-feel calls
//!
//! The logger methods take `&[Value]` slices; these macros build them from
//! mixed arguments so call sites stay flat:
//!
//! ```
//! use logfacade::{fields, info, infof, Config, Logger};
//! use logfacade::sinks::MemorySink;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new(Config::new().with_sink(sink.clone()).with_no_buffer(), &[]);
//!
//! info!(logger, "server started", "port", 8080_i64);
//! infof!(logger, "handled %d requests", 42_i64, "path", "/health");
//! logger.warn("low disk space", &fields!["free_mb", 12_i64]);
//! ```

/// Builds a `[Value; N]` array from mixed arguments, each converted with
/// `Value::from`. Errors go in explicitly via [`crate::Value::error`].
#[macro_export]
macro_rules! fields {
    ($($value:expr),* $(,)?) => {
        [$($crate::Value::from($value)),*]
    };
}

/// Log a trace-level message with optional fields.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.trace($msg, &[$($crate::Value::from($field)),*])
    };
}

/// Log a formatted trace-level message.
#[macro_export]
macro_rules! tracef {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.tracef($format, &[$($crate::Value::from($arg)),*])
    };
}

/// Log a debug-level message with optional fields.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.debug($msg, &[$($crate::Value::from($field)),*])
    };
}

/// Log a formatted debug-level message.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.debugf($format, &[$($crate::Value::from($arg)),*])
    };
}

/// Log an info-level message with optional fields.
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.info($msg, &[$($crate::Value::from($field)),*])
    };
}

/// Log a formatted info-level message.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.infof($format, &[$($crate::Value::from($arg)),*])
    };
}

/// Log a warning-level message with optional fields.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.warn($msg, &[$($crate::Value::from($field)),*])
    };
}

/// Log a formatted warning-level message.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.warnf($format, &[$($crate::Value::from($arg)),*])
    };
}

/// Log an error-level message with optional fields.
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $field:expr)* $(,)?) => {
        $logger.error($msg, &[$($crate::Value::from($field)),*])
    };
}

/// Log a formatted error-level message.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $logger.errorf($format, &[$($crate::Value::from($arg)),*])
    };
}
