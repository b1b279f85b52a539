//! Per-thread capture of `log` records.
//!
//! A process can install only one logger, so every test shares one capturing
//! logger and reads back the records emitted on its own thread.

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::sync::OnceLock;
use std::thread::{self, ThreadId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: Level,
    pub target: String,
    pub message: String,
}

struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, CapturedLog)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records.lock().push((
            thread::current().id(),
            CapturedLog {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            },
        ));
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<&'static CaptureLogger> = OnceLock::new();

fn logger() -> &'static CaptureLogger {
    LOGGER.get_or_init(|| {
        let logger: &'static CaptureLogger = Box::leak(Box::new(CaptureLogger {
            records: Mutex::new(Vec::new()),
        }));
        if log::set_logger(logger).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
        logger
    })
}

/// Handle reading back records logged on the calling thread after `start`.
///
/// Use with single-threaded runtimes (`#[tokio::test]` default) so async work
/// logs on the test thread.
pub struct LogCapture {
    thread: ThreadId,
}

impl LogCapture {
    pub fn start() -> Self {
        let thread = thread::current().id();
        logger().records.lock().retain(|(id, _)| *id != thread);
        Self { thread }
    }

    pub fn records(&self) -> Vec<CapturedLog> {
        logger()
            .records
            .lock()
            .iter()
            .filter(|(id, _)| *id == self.thread)
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub fn at_level(&self, level: Level) -> Vec<CapturedLog> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .collect()
    }

    pub fn warnings(&self) -> Vec<CapturedLog> {
        self.at_level(Level::Warn)
    }
}
