//! The record-emitting engine behind the facade
//!
//! The facade core never serializes or buffers anything itself; it builds a
//! [`crate::core::Record`] and hands it to an [`Emitter`]. The emitter owns
//! the level gate, pre-bound fields and the sink fan-out; [`BufferedSink`]
//! adds the non-blocking queue between producers and slow sinks.

pub mod buffered;
pub mod emitter;

pub use buffered::{
    BufferedSink, OverflowCallback, DEFAULT_BUFFER_CAPACITY, DEFAULT_FLUSH_INTERVAL,
};
pub use emitter::{Emitter, Hook};
