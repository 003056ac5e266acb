//! Logger configuration
//!
//! `Config` is a copy-on-write builder: every `with_*` method consumes the
//! value and returns the modified one, so a configuration handed to one
//! logger can never be silently altered by another caller.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use super::counter::{ErrorCounter, SimpleErrorCounter};
use super::timestamp::TimeFormat;
use crate::engine::{Hook, OverflowCallback};
use crate::sinks::{ConsoleSink, Sink, WriterSink};

/// Configuration consumed by [`crate::Logger::new`].
///
/// Defaults: no sinks (output is discarded), level `info`, RFC 3339 time
/// field, buffering enabled with a capacity of
/// [`crate::DEFAULT_BUFFER_CAPACITY`] records flushed every
/// [`crate::DEFAULT_FLUSH_INTERVAL`].
#[derive(Default)]
pub struct Config {
    pub(crate) sinks: Vec<Box<dyn Sink>>,
    pub(crate) level: String,
    pub(crate) time_format: TimeFormat,
    pub(crate) to_ignore: Vec<String>,
    pub(crate) error_counter: Option<Arc<dyn ErrorCounter>>,
    pub(crate) stack_trace: bool,
    pub(crate) buffer_capacity: Option<usize>,
    pub(crate) flush_interval: Option<Duration>,
    pub(crate) overflow_callback: Option<OverflowCallback>,
    pub(crate) no_buffer: bool,
    pub(crate) hooks: Vec<Arc<dyn Hook>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output sink. One sink receives records alone; several fan out
    /// in insertion order.
    #[must_use = "builder methods return a new value"]
    pub fn with_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Adds a sink writing single-line JSON records to `writer`.
    #[must_use = "builder methods return a new value"]
    pub fn with_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.with_sink(WriterSink::new(writer))
    }

    /// Adds pretty colored console output on stderr. This format may
    /// significantly slow down logging compared to the JSON format.
    #[must_use = "builder methods return a new value"]
    pub fn with_console(self) -> Self {
        self.with_sink(ConsoleSink::new())
    }

    /// Adds pretty console output on stderr without colors.
    #[must_use = "builder methods return a new value"]
    pub fn with_console_no_color(self) -> Self {
        self.with_sink(ConsoleSink::with_colors(false))
    }

    /// Adds JSON output on stderr.
    #[must_use = "builder methods return a new value"]
    pub fn with_console_json(self) -> Self {
        self.with_writer(std::io::stderr())
    }

    /// Sets the minimum level by name: one of `trace`, `debug`, `info`,
    /// `warn`, `error`, `fatal`, `disabled`. An unknown name makes logger
    /// construction panic.
    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Overrides the `time` field format. Default is RFC 3339; the Unix
    /// variants are smaller and faster.
    #[must_use = "builder methods return a new value"]
    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    /// Messages containing any of these substrings are suppressed entirely.
    #[must_use = "builder methods return a new value"]
    pub fn with_ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to_ignore.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Attaches a shared error counter, incremented once per logged error.
    #[must_use = "builder methods return a new value"]
    pub fn with_error_counter(mut self, counter: Arc<dyn ErrorCounter>) -> Self {
        self.error_counter = Some(counter);
        self
    }

    /// Attaches a fresh [`SimpleErrorCounter`].
    #[must_use = "builder methods return a new value"]
    pub fn with_simple_error_counter(self) -> Self {
        self.with_error_counter(Arc::new(SimpleErrorCounter::new()))
    }

    /// Enables stack trace capture for logged errors.
    #[must_use = "builder methods return a new value"]
    pub fn with_stack_trace(mut self) -> Self {
        self.stack_trace = true;
        self
    }

    /// Buffered-sink capacity. Records beyond this many in one flush
    /// interval are dropped.
    #[must_use = "builder methods return a new value"]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    /// Interval at which the buffered sink flushes its targets.
    #[must_use = "builder methods return a new value"]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = Some(interval);
        self
    }

    /// Callback invoked with the running total of records dropped on
    /// overflow.
    #[must_use = "builder methods return a new value"]
    pub fn with_overflow_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.overflow_callback = Some(Arc::new(callback));
        self
    }

    /// Disables buffering: records are written to the sinks on the caller's
    /// thread. Useful for tests and short-lived processes that would
    /// otherwise exit before the buffer flushes.
    #[must_use = "builder methods return a new value"]
    pub fn with_no_buffer(mut self) -> Self {
        self.no_buffer = true;
        self
    }

    /// Adds a hook run on every record before it reaches the sinks.
    #[must_use = "builder methods return a new value"]
    pub fn with_hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }
}
