//! Facade core: argument classification, configuration, the logger and the
//! process-wide registry

pub mod classify;
pub mod config;
pub mod counter;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
pub mod record;
pub mod timestamp;
pub mod value;

pub use classify::{format_message, split_formatted, Classified};
pub use config::Config;
pub use counter::{ErrorCounter, SimpleErrorCounter};
pub use error::{FacadeError, Result};
pub use level::Level;
pub use logger::Logger;
pub use record::Record;
pub use timestamp::TimeFormat;
pub use value::{ErrorValue, Traced, Value};
