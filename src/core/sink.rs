//! Sink trait and per-sink threshold bookkeeping

use super::error::Result;
use super::pattern::Pattern;
use super::record::LogRecord;
use super::severity::Severity;

/// An output destination for log records.
///
/// Sinks are owned by the delivery side (the worker thread for async loggers)
/// and render records themselves so that destination-specific concerns such
/// as terminal colors stay inside the sink. `Send + Sync` because the slot
/// vector is shared between the emitting threads and the worker, and lives
/// in the process-wide registry.
pub trait Sink: Send + Sync {
    fn write(&mut self, record: &LogRecord, pattern: &Pattern) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn kind(&self) -> &str;
}

/// A sink paired with its mutable severity threshold.
///
/// `enable`/`disable` and `set_threshold` operate on the same field: disable
/// parks the threshold at `Off`, enable restores the configured default.
pub struct SinkSlot {
    threshold: Severity,
    default_threshold: Severity,
    sink: Box<dyn Sink>,
}

impl SinkSlot {
    pub fn new(sink: Box<dyn Sink>, threshold: Severity) -> Self {
        Self {
            threshold,
            default_threshold: threshold,
            sink,
        }
    }

    /// Threshold filter: a record passes iff its level is at or above the
    /// threshold. The boundary case (level == threshold) is accepted.
    pub fn accepts(&self, level: Severity) -> bool {
        level.is_record_level() && level >= self.threshold
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn set_threshold(&mut self, level: Severity) {
        self.threshold = level;
    }

    pub fn enable(&mut self) {
        self.threshold = self.default_threshold;
    }

    pub fn disable(&mut self) {
        self.threshold = Severity::Off;
    }

    pub fn kind(&self) -> &str {
        self.sink.kind()
    }

    pub fn write(&mut self, record: &LogRecord, pattern: &Pattern) -> Result<()> {
        self.sink.write(record, pattern)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }
}
