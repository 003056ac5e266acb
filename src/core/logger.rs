//! The logging facade

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::panic::Location;
use std::process;
use std::sync::Arc;

use super::classify;
use super::config::Config;
use super::counter::{ErrorCounter, SimpleErrorCounter};
use super::level::Level;
use super::record::{pairs, Record};
use super::value::{ErrorValue, Traced, Value};
use crate::engine::{BufferedSink, Emitter, DEFAULT_BUFFER_CAPACITY, DEFAULT_FLUSH_INTERVAL};
use crate::sinks::Sink;

/// A configured structured logger.
///
/// Fields are passed as flat `(key, value)` slices; the [`crate::fields!`]
/// macro builds them from mixed arguments. With
///
/// ```
/// use logfacade::{fields, Config, Logger};
/// use logfacade::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let lg = Logger::new(
///     Config::new().with_sink(sink.clone()).with_no_buffer(),
///     &fields!["foo", "bar"],
/// );
/// lg.info("some message", &fields!["key", "value"]);
/// ```
///
/// the captured output is
///
/// ```text
/// {"level":"info","time":"2023-11-20T18:48:14Z","message":"some message","foo":"bar","key":"value"}
/// ```
///
/// With buffering enabled (the default) the logger needs a moment to flush;
/// a process that exits right after logging should configure
/// [`Config::with_no_buffer`].
///
/// All logging entry points are safe to call concurrently on a shared
/// logger. The one exception is [`Logger::update`], which swaps internal
/// state in place.
#[derive(Clone, Default)]
pub struct Logger {
    emitter: Emitter,
    err_counter: Option<Arc<dyn ErrorCounter>>,
    to_ignore: Vec<String>,
    stack_trace: bool,
    inited: bool,
}

impl Logger {
    /// Builds a logger from `cfg`. `fields` are `(key, value)` pairs bound
    /// to every record.
    ///
    /// Without sinks the output is discarded; an empty level defaults to
    /// `info`.
    ///
    /// # Panics
    ///
    /// Panics when the configured level is not one of the supported names.
    /// A bad level name is a programmer error, not a runtime condition.
    pub fn new(cfg: Config, fields: &[Value]) -> Self {
        let Config {
            mut sinks,
            level,
            time_format,
            to_ignore,
            error_counter,
            stack_trace,
            buffer_capacity,
            flush_interval,
            overflow_callback,
            no_buffer,
            hooks,
        } = cfg;

        let level = if level.is_empty() {
            Level::Info
        } else {
            match level.parse::<Level>() {
                Ok(level) => level,
                Err(err) => panic!("{}", err),
            }
        };

        if level == Level::Disabled {
            sinks.clear();
        }
        if !no_buffer && !sinks.is_empty() {
            let capacity = buffer_capacity.unwrap_or(DEFAULT_BUFFER_CAPACITY);
            let interval = flush_interval.unwrap_or(DEFAULT_FLUSH_INTERVAL);
            let buffered = BufferedSink::new(sinks, capacity, interval, overflow_callback);
            sinks = vec![Box::new(buffered) as Box<dyn Sink>];
        }

        let mut emitter = Emitter::new(sinks, level, time_format);
        for hook in hooks {
            emitter = emitter.with_hook(hook);
        }

        Self {
            emitter: emitter.child(pairs(fields)),
            err_counter: error_counter,
            to_ignore,
            stack_trace,
            inited: true,
        }
    }

    /// Wraps an existing emitter.
    pub fn from_emitter(emitter: Emitter) -> Self {
        Self {
            emitter,
            err_counter: None,
            to_ignore: Vec::new(),
            stack_trace: false,
            inited: true,
        }
    }

    /// A logger that logs nothing.
    pub fn nop() -> Self {
        Self::from_emitter(Emitter::nop())
    }

    /// JSON logging to stderr.
    pub fn console_json(fields: &[Value]) -> Self {
        Self::new(Config::new().with_console_json(), fields)
    }

    /// Rebuilds this logger from a fresh configuration, replacing every
    /// internal field in place.
    ///
    /// NOT safe for concurrent use: the replacement is not guarded by a
    /// lock, so other threads logging through the same logger value may
    /// observe a mix of old and new state. Serialize reconfiguration, or do
    /// it before spawning workers.
    pub fn update(&mut self, cfg: Config, fields: &[Value]) {
        *self = Self::new(cfg, fields);
    }

    /// True for the zero-value placeholder, i.e. a logger that was never
    /// built from a configuration.
    pub fn not_inited(&self) -> bool {
        !self.inited
    }

    /// Derives a logger with `fields` applied to all its records.
    pub fn with_fields(&self, fields: &[Value]) -> Self {
        let mut lg = self.clone();
        lg.emitter = lg.emitter.child(pairs(fields));
        lg
    }

    /// Shortcut for [`Logger::with_fields`].
    pub fn with(&self, fields: &[Value]) -> Self {
        self.with_fields(fields)
    }

    /// Derives a logger with a different minimum level. An empty name keeps
    /// the current level.
    ///
    /// # Panics
    ///
    /// Panics when `level` is not one of the supported names.
    pub fn with_level(&self, level: &str) -> Self {
        if level.is_empty() {
            return self.clone();
        }
        let level = match level.parse::<Level>() {
            Ok(level) => level,
            Err(err) => panic!("{}", err),
        };
        let mut lg = self.clone();
        lg.emitter = lg.emitter.with_level(level);
        lg
    }

    /// Derives a logger with stack capture switched on or off.
    pub fn with_stack(&self, stack_trace: bool) -> Self {
        let mut lg = self.clone();
        lg.stack_trace = stack_trace;
        lg
    }

    /// Derives a logger using the provided shared error counter.
    pub fn with_error_counter(&self, counter: Arc<dyn ErrorCounter>) -> Self {
        let mut lg = self.clone();
        lg.err_counter = Some(counter);
        lg
    }

    /// Derives a logger with a fresh [`SimpleErrorCounter`].
    pub fn with_simple_error_counter(&self) -> Self {
        self.with_error_counter(Arc::new(SimpleErrorCounter::new()))
    }

    /// Derives a logger with the provided suppression list.
    pub fn with_ignore<I, S>(&self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lg = self.clone();
        lg.to_ignore = patterns.into_iter().map(Into::into).collect();
        lg
    }

    /// The shared error counter, if one is attached.
    pub fn error_counter(&self) -> Option<Arc<dyn ErrorCounter>> {
        self.err_counter.clone()
    }

    /// The underlying emitter.
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Logs a message at trace level with the call site attached.
    #[track_caller]
    pub fn trace(&self, msg: impl Into<String>, fields: &[Value]) {
        self.log(Some(Level::Trace), msg.into(), fields, None, Some(call_site()));
    }

    /// Logs a formatted message at trace level with the call site attached.
    #[track_caller]
    pub fn tracef(&self, format: &str, args: &[Value]) {
        self.logf(Some(Level::Trace), format, args, None, Some(call_site()));
    }

    pub fn debug(&self, msg: impl Into<String>, fields: &[Value]) {
        self.log(Some(Level::Debug), msg.into(), fields, None, None);
    }

    pub fn debugf(&self, format: &str, args: &[Value]) {
        self.logf(Some(Level::Debug), format, args, None, None);
    }

    pub fn info(&self, msg: impl Into<String>, fields: &[Value]) {
        self.log(Some(Level::Info), msg.into(), fields, None, None);
    }

    pub fn infof(&self, format: &str, args: &[Value]) {
        self.logf(Some(Level::Info), format, args, None, None);
    }

    pub fn warn(&self, msg: impl Into<String>, fields: &[Value]) {
        self.log(Some(Level::Warn), msg.into(), fields, None, None);
    }

    pub fn warnf(&self, format: &str, args: &[Value]) {
        self.logf(Some(Level::Warn), format, args, None, None);
    }

    pub fn error(&self, msg: impl Into<String>, fields: &[Value]) {
        self.log(Some(Level::Error), msg.into(), fields, None, None);
    }

    pub fn errorf(&self, format: &str, args: &[Value]) {
        self.logf(Some(Level::Error), format, args, None, None);
    }

    /// Logs an error at error level. The error bypasses argument
    /// classification entirely; `None` is logged as a null `error` field,
    /// not elided, and does not touch the counter.
    pub fn err(&self, error: Option<&dyn StdError>, msg: impl Into<String>, fields: &[Value]) {
        let error = match error {
            Some(error) => ErrorValue::new(error),
            None => ErrorValue::absent(),
        };
        self.log(Some(Level::Error), msg.into(), fields, Some(error), None);
    }

    /// Like [`Logger::err`] for error types that carry their own captured
    /// stack; with stack capture enabled that stack is attached instead of a
    /// fresh one.
    pub fn err_traced<E: Traced + ?Sized>(
        &self,
        error: &E,
        msg: impl Into<String>,
        fields: &[Value],
    ) {
        self.log(
            Some(Level::Error),
            msg.into(),
            fields,
            Some(ErrorValue::traced(error)),
            None,
        );
    }

    /// Formatted variant of [`Logger::err`].
    pub fn errf(&self, error: Option<&dyn StdError>, format: &str, args: &[Value]) {
        let error = match error {
            Some(error) => ErrorValue::new(error),
            None => ErrorValue::absent(),
        };
        self.logf(Some(Level::Error), format, args, Some(error), None);
    }

    /// Logs an error at error level with a stack trace captured here joined
    /// into the message.
    pub fn err_stack(&self, error: &dyn StdError, fields: &[Value]) {
        let stack = Backtrace::force_capture().to_string();
        let msg = format!("{}\n{}", error, stack);
        self.log(Some(Level::Error), msg, fields, None, None);
    }

    /// Logs a message without a level.
    pub fn print(&self, msg: impl Into<String>) {
        self.log(None, msg.into(), &[], None, None);
    }

    /// Logs a formatted message without a level.
    pub fn printf(&self, format: &str, args: &[Value]) {
        self.logf(None, format, args, None, None);
    }

    /// Logs the current stack trace without a level.
    pub fn print_stack(&self, fields: &[Value]) {
        let stack = Backtrace::force_capture().to_string();
        self.log(None, stack, fields, None, None);
    }

    /// Logs a message at an explicit level.
    pub fn leveled(&self, level: Level, msg: impl Into<String>, fields: &[Value]) {
        self.log(Some(level), msg.into(), fields, None, None);
    }

    /// Logs at fatal level, counts an error synthesized from the message,
    /// then terminates the process.
    pub fn fatal(&self, msg: impl Into<String>) -> ! {
        self.terminal_record(msg.into(), &[]);
        process::exit(1);
    }

    /// Formatted variant of [`Logger::fatal`].
    pub fn fatalf(&self, format: &str, args: &[Value]) -> ! {
        let (msg, field_args) = render_split(format, args);
        self.terminal_record(msg, &field_args);
        process::exit(1);
    }

    /// Logs at fatal level, counts an error synthesized from the message,
    /// then panics with the message text. Unlike [`Logger::fatal`] the
    /// panic can be caught, but a caller should be presumed to intend the
    /// process to stop unless it explicitly intercepts it.
    pub fn panic(&self, msg: impl Into<String>) -> ! {
        let msg = msg.into();
        self.terminal_record(msg.clone(), &[]);
        panic!("{}", msg);
    }

    /// Formatted variant of [`Logger::panic`].
    pub fn panicf(&self, format: &str, args: &[Value]) -> ! {
        let (msg, field_args) = render_split(format, args);
        self.terminal_record(msg.clone(), &field_args);
        panic!("{}", msg);
    }

    fn ignored(&self, msg: &str) -> bool {
        self.to_ignore.iter().any(|pattern| msg.contains(pattern.as_str()))
    }

    fn inc_counter(&self, err: &ErrorValue) {
        if let Some(counter) = &self.err_counter {
            counter.inc(err);
        }
    }

    fn log(
        &self,
        level: Option<Level>,
        msg: String,
        fields: &[Value],
        pre_extracted: Option<ErrorValue>,
        caller: Option<String>,
    ) {
        if self.ignored(&msg) {
            return;
        }
        let mut field_args = fields.to_vec();
        let error = match pre_extracted {
            Some(error) => Some(error),
            None => classify::extract_error(&mut field_args),
        };
        self.emit(level, msg, &field_args, error, caller);
    }

    fn logf(
        &self,
        level: Option<Level>,
        format: &str,
        args: &[Value],
        pre_extracted: Option<ErrorValue>,
        caller: Option<String>,
    ) {
        let split = classify::split_formatted(format, args);
        let msg = if split.format_args.is_empty() {
            format.to_string()
        } else {
            classify::format_message(format, split.format_args)
        };
        if self.ignored(&msg) {
            return;
        }
        let mut field_args = split.field_args.to_vec();
        let error = match pre_extracted {
            Some(error) => Some(error),
            None => classify::extract_error(&mut field_args),
        };
        self.emit(level, msg, &field_args, error, caller);
    }

    fn emit(
        &self,
        level: Option<Level>,
        msg: String,
        field_args: &[Value],
        error: Option<ErrorValue>,
        caller: Option<String>,
    ) {
        let mut record = Record::new(level, msg);
        record.caller = caller;
        if let Some(error) = error {
            if !error.is_absent() {
                if self.stack_trace {
                    record.stack = Some(match error.stack() {
                        Some(stack) => stack.to_string(),
                        None => Backtrace::force_capture().to_string(),
                    });
                }
                self.inc_counter(&error);
            }
            record.error = Some(error);
        }
        record.push_pairs(field_args);
        self.emitter.emit(record);
    }

    /// Shared body of the fatal and panic paths. Suppression still drops
    /// the record and the counter increment, but the caller terminates
    /// regardless.
    fn terminal_record(&self, msg: String, field_args: &[Value]) {
        if self.ignored(&msg) {
            return;
        }
        self.inc_counter(&ErrorValue::synthesized(msg.clone()));
        let mut record = Record::new(Some(Level::Fatal), msg);
        record.push_pairs(field_args);
        self.emitter.emit(record);
    }
}

fn render_split(format: &str, args: &[Value]) -> (String, Vec<Value>) {
    let split = classify::split_formatted(format, args);
    let msg = if split.format_args.is_empty() {
        format.to_string()
    } else {
        classify::format_message(format, split.format_args)
    };
    (msg, split.field_args.to_vec())
}

#[track_caller]
fn call_site() -> String {
    let location = Location::caller();
    format!("{}:{}", location.file(), location.line())
}
