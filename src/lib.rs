//! # logfacade
//!
//! A structured-logging facade: level-aware formatted messages with embedded
//! key/value fields, message suppression lists, error-occurrence counting,
//! optional stack-trace capture and a process-wide default logger, in front
//! of a swappable record-emitting engine.
//!
//! ## Features
//!
//! - **Argument classification**: one flat argument list carries format
//!   substitutions, field pairs and embedded errors
//! - **Suppression**: substring ignore-lists drop whole records
//! - **Non-blocking output**: buffered sink decoupling producers from slow
//!   destinations
//! - **Global registry**: a replaceable default logger mirrored into the
//!   `log` crate facade
//!
//! ## Quick start
//!
//! ```
//! use logfacade::{fields, Config, Logger};
//!
//! let logger = Logger::new(
//!     Config::new().with_console_json().with_no_buffer(),
//!     &fields!["app", "demo"],
//! );
//! logger.info("started", &fields!["port", 8080_i64]);
//! logger.infof("handled %d requests", &fields![42_i64, "path", "/health"]);
//! ```

pub mod core;
pub mod engine;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Config, ErrorCounter, ErrorValue, FacadeError, Level, Logger, Record, Result,
        SimpleErrorCounter, TimeFormat, Traced, Value,
    };
    pub use crate::engine::{
        BufferedSink, Emitter, Hook, OverflowCallback, DEFAULT_BUFFER_CAPACITY,
        DEFAULT_FLUSH_INTERVAL,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, Sink, WriterSink};
}

pub use crate::core::global;
pub use crate::core::{
    Config, ErrorCounter, ErrorValue, FacadeError, Level, Logger, Record, Result,
    SimpleErrorCounter, TimeFormat, Traced, Value,
};
pub use crate::engine::{
    BufferedSink, Emitter, Hook, OverflowCallback, DEFAULT_BUFFER_CAPACITY,
    DEFAULT_FLUSH_INTERVAL,
};
pub use crate::sinks::{ConsoleSink, MemorySink, Sink, WriterSink};
