//! Process-wide default logger
//!
//! One logger lives behind a package-level slot; the free functions in this
//! module forward to it. Install it with [`init`] exactly once during
//! startup, before spawning concurrent workers, and reconfigure it with
//! [`update`]. Both also mirror the logger into the `log` crate facade so
//! ecosystem code writing through the legacy macros lands in the same
//! structured output.
//!
//! The free functions load the slot at call time: a call racing an
//! [`update`] observes either the old or the new logger, never a torn one.
//! [`init`] and [`update`] themselves are single-writer; serialize
//! reconfiguration.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::error::Error as StdError;
use std::sync::Arc;

use super::config::Config;
use super::counter::ErrorCounter;
use super::logger::Logger;
use super::value::{Traced, Value};

static GLOBAL: Lazy<RwLock<Arc<Logger>>> =
    Lazy::new(|| RwLock::new(Arc::new(Logger::default())));

/// Builds a logger from `cfg` and installs it as the process-wide default.
pub fn init(cfg: Config, fields: &[Value]) {
    install(Logger::new(cfg, fields));
}

/// Rebuilds and re-installs the process-wide logger.
///
/// Not safe to run concurrently with [`init`] or another `update`.
pub fn update(cfg: Config, fields: &[Value]) {
    install(Logger::new(cfg, fields));
}

fn install(logger: Logger) {
    *GLOBAL.write() = Arc::new(logger);
    bridge::install();
}

/// The currently installed logger.
pub fn logger() -> Arc<Logger> {
    GLOBAL.read().clone()
}

/// Derives a logger from the installed one with `fields` applied to all its
/// records.
pub fn with_fields(fields: &[Value]) -> Logger {
    logger().with_fields(fields)
}

/// Derives a logger from the installed one with a different minimum level.
pub fn with_level(level: &str) -> Logger {
    logger().with_level(level)
}

/// The installed logger's error counter, if any.
pub fn error_counter() -> Option<Arc<dyn ErrorCounter>> {
    logger().error_counter()
}

#[track_caller]
pub fn trace(msg: impl Into<String>, fields: &[Value]) {
    logger().trace(msg, fields);
}

#[track_caller]
pub fn tracef(format: &str, args: &[Value]) {
    logger().tracef(format, args);
}

pub fn debug(msg: impl Into<String>, fields: &[Value]) {
    logger().debug(msg, fields);
}

pub fn debugf(format: &str, args: &[Value]) {
    logger().debugf(format, args);
}

pub fn info(msg: impl Into<String>, fields: &[Value]) {
    logger().info(msg, fields);
}

pub fn infof(format: &str, args: &[Value]) {
    logger().infof(format, args);
}

pub fn warn(msg: impl Into<String>, fields: &[Value]) {
    logger().warn(msg, fields);
}

pub fn warnf(format: &str, args: &[Value]) {
    logger().warnf(format, args);
}

pub fn error(msg: impl Into<String>, fields: &[Value]) {
    logger().error(msg, fields);
}

pub fn errorf(format: &str, args: &[Value]) {
    logger().errorf(format, args);
}

pub fn err(error: Option<&dyn StdError>, msg: impl Into<String>, fields: &[Value]) {
    logger().err(error, msg, fields);
}

pub fn err_traced<E: Traced + ?Sized>(error: &E, msg: impl Into<String>, fields: &[Value]) {
    logger().err_traced(error, msg, fields);
}

pub fn errf(error: Option<&dyn StdError>, format: &str, args: &[Value]) {
    logger().errf(error, format, args);
}

pub fn err_stack(error: &dyn StdError, fields: &[Value]) {
    logger().err_stack(error, fields);
}

pub fn print(msg: impl Into<String>) {
    logger().print(msg);
}

pub fn printf(format: &str, args: &[Value]) {
    logger().printf(format, args);
}

pub fn print_stack(fields: &[Value]) {
    logger().print_stack(fields);
}

pub fn fatal(msg: impl Into<String>) -> ! {
    logger().fatal(msg)
}

pub fn fatalf(format: &str, args: &[Value]) -> ! {
    logger().fatalf(format, args)
}

pub fn panic(msg: impl Into<String>) -> ! {
    logger().panic(msg)
}

pub fn panicf(format: &str, args: &[Value]) -> ! {
    logger().panicf(format, args)
}

mod bridge {
    //! Forwards `log` crate records into the installed logger.
    //!
    //! The legacy facade performs no decoration of its own, so records
    //! arrive as bare messages and the structured logger attaches the
    //! timestamp and level fields.

    use std::sync::Once;

    use super::logger;
    use crate::core::level::Level;

    struct LegacyBridge;

    impl log::Log for LegacyBridge {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            let level = match record.level() {
                log::Level::Error => Level::Error,
                log::Level::Warn => Level::Warn,
                log::Level::Info => Level::Info,
                log::Level::Debug => Level::Debug,
                log::Level::Trace => Level::Trace,
            };
            logger().leveled(level, record.args().to_string(), &[]);
        }

        fn flush(&self) {}
    }

    static BRIDGE: LegacyBridge = LegacyBridge;
    static INSTALL: Once = Once::new();

    /// Routes the `log` crate facade into the installed logger. The `log`
    /// crate accepts one logger per process, so this runs once; level
    /// filtering stays with the structured logger.
    pub(super) fn install() {
        INSTALL.call_once(|| {
            if log::set_logger(&BRIDGE).is_ok() {
                log::set_max_level(log::LevelFilter::Trace);
            }
        });
    }
}
