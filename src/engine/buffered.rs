//! Non-blocking buffered sink
//!
//! Decouples log producers from slow sinks: records go through a bounded
//! channel to a worker thread, and when the channel is full new records are
//! dropped and counted instead of blocking the caller. The worker flushes
//! the wrapped sinks on a fixed interval.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::core::{Record, Result};
use crate::sinks::Sink;

/// Default channel capacity. Records beyond this many in one flush interval
/// are dropped.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1000;

/// Default interval at which the worker flushes the wrapped sinks.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(10);

/// How long `drop` waits for the worker to drain pending records.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Callback invoked with the running total of dropped records.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;

enum Command {
    Write(Box<Record>),
    Flush,
}

/// Sink decorator wrapping a set of inner sinks behind a bounded queue.
pub struct BufferedSink {
    sender: Option<Sender<Command>>,
    worker: Option<thread::JoinHandle<()>>,
    dropped: AtomicU64,
    on_overflow: Option<OverflowCallback>,
}

impl BufferedSink {
    pub fn new(
        sinks: Vec<Box<dyn Sink>>,
        capacity: usize,
        flush_interval: Duration,
        on_overflow: Option<OverflowCallback>,
    ) -> Self {
        let (sender, receiver) = bounded(capacity);
        let worker = thread::spawn(move || Self::run(receiver, sinks, flush_interval));
        Self {
            sender: Some(sender),
            worker: Some(worker),
            dropped: AtomicU64::new(0),
            on_overflow,
        }
    }

    /// Total number of records dropped because the queue was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn run(receiver: Receiver<Command>, mut sinks: Vec<Box<dyn Sink>>, flush_interval: Duration) {
        loop {
            match receiver.recv_timeout(flush_interval) {
                Ok(Command::Write(record)) => {
                    for sink in sinks.iter_mut() {
                        if let Err(e) = sink.accept(&record) {
                            eprintln!("[LOGFACADE ERROR] sink '{}' failed: {}", sink.name(), e);
                        }
                    }
                }
                Ok(Command::Flush) | Err(RecvTimeoutError::Timeout) => {
                    Self::flush_sinks(&mut sinks);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    Self::flush_sinks(&mut sinks);
                    break;
                }
            }
        }
    }

    fn flush_sinks(sinks: &mut [Box<dyn Sink>]) {
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGFACADE ERROR] sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }

    /// Alert on the first drop and every 1000th thereafter.
    fn alert(&self, total: u64) {
        if total != 1 && total % 1000 != 0 {
            return;
        }
        match &self.on_overflow {
            Some(callback) => callback(total),
            None => eprintln!("[LOGFACADE WARNING] buffered sink dropped {} records", total),
        }
    }
}

impl Sink for BufferedSink {
    fn accept(&mut self, record: &Record) -> Result<()> {
        if let Some(sender) = &self.sender {
            match sender.try_send(Command::Write(Box::new(record.clone()))) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                    self.alert(total);
                }
                Err(TrySendError::Disconnected(_)) => {
                    // worker gone, shutting down
                }
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(Command::Flush);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "buffered"
    }
}

impl Drop for BufferedSink {
    fn drop(&mut self) {
        // Close the channel first so the worker drains pending records and exits.
        drop(self.sender.take());

        if let Some(worker) = self.worker.take() {
            let start = Instant::now();
            while !worker.is_finished() {
                if start.elapsed() >= DRAIN_TIMEOUT {
                    eprintln!(
                        "[LOGFACADE WARNING] buffered sink worker did not drain within {:?}, \
                         some records may be lost",
                        DRAIN_TIMEOUT
                    );
                    return;
                }
                thread::sleep(Duration::from_millis(10));
            }
            if worker.join().is_err() {
                eprintln!("[LOGFACADE ERROR] buffered sink worker panicked during shutdown");
            }
        }
    }
}
