//! Multi-sink application logger
//!
//! The crate's main entry point: one asynchronous logger fanning out to a
//! colorized console, a size-rotated file for the general record stream and
//! an append-only file reserved for critical records. Each sink carries its
//! own severity threshold and can be retuned or muted at runtime without
//! rebuilding the logger.

use crate::core::{
    Logger, LoggerMetrics, OverflowPolicy, Pattern, Result, Severity, DEFAULT_QUEUE_CAPACITY,
};
use crate::registry::{default_registry, Registry};
use crate::sinks::{ConsoleSink, FileSink, RotatingFileSink};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default destination of the rotating general-record file.
pub const DEFAULT_ROTATING_PATH: &str = "logs/InfoLog.log";
/// Default destination of the critical-only file.
pub const DEFAULT_CRITICAL_PATH: &str = "logs/ExceptionLog.log";
/// Rotation budget of the general-record file: 5 MiB per file.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
/// Backups retained alongside the active general-record file.
pub const DEFAULT_MAX_FILE_COUNT: usize = 10;
/// Registry name of the application logger.
pub const DEFAULT_LOGGER_NAME: &str = "Logger";

/// Handle naming one of the facade's three sinks for runtime control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkId {
    Console,
    RotatingFile,
    CriticalFile,
}

impl SinkId {
    fn slot(self) -> usize {
        match self {
            SinkId::Console => 0,
            SinkId::RotatingFile => 1,
            SinkId::CriticalFile => 2,
        }
    }
}

/// Builder for [`MultiSinkLogger`].
pub struct MultiSinkLoggerBuilder {
    name: String,
    rotating_path: PathBuf,
    max_file_size: u64,
    max_file_count: usize,
    critical_path: PathBuf,
    queue_capacity: usize,
    overflow_policy: OverflowPolicy,
    use_colors: bool,
}

impl MultiSinkLoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            rotating_path: PathBuf::from(DEFAULT_ROTATING_PATH),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
            critical_path: PathBuf::from(DEFAULT_CRITICAL_PATH),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::Block,
            use_colors: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn rotating_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rotating_path = path.into();
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn max_file_count(mut self, count: usize) -> Self {
        self.max_file_count = count;
        self
    }

    pub fn critical_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.critical_path = path.into();
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Build the logger and register it in the process-wide registry under
    /// its name, replacing any earlier instance.
    pub fn build(self) -> Result<MultiSinkLogger> {
        self.build_in(default_registry())
    }

    /// Build the logger and register it in `registry`.
    ///
    /// Sink wiring, in slot order: console at `Info`, rotating file at
    /// `Info`, critical-only file (opened for append) at `Critical`.
    ///
    /// # Errors
    ///
    /// Fails when either file destination cannot be opened or the rotation
    /// settings are invalid; nothing is registered in that case.
    pub fn build_in(self, registry: &Registry) -> Result<MultiSinkLogger> {
        let rotating =
            RotatingFileSink::new(&self.rotating_path, self.max_file_size, self.max_file_count)?;
        let critical = FileSink::new(&self.critical_path, false)?;

        let logger = Logger::with_async(self.name, self.queue_capacity, self.overflow_policy);
        logger.add_sink(
            Box::new(ConsoleSink::with_colors(self.use_colors)),
            Severity::Info,
        );
        logger.add_sink(Box::new(rotating), Severity::Info);
        logger.add_sink(Box::new(critical), Severity::Critical);
        logger.set_min_level(Severity::Info);

        let inner = Arc::new(logger);
        registry.register(Arc::clone(&inner));
        Ok(MultiSinkLogger { inner })
    }
}

impl Default for MultiSinkLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MultiSinkLogger {
    inner: Arc<Logger>,
}

impl MultiSinkLogger {
    /// Build with every default: console + `logs/InfoLog.log` (5 MiB, ten
    /// backups) + `logs/ExceptionLog.log`, queue of 8192, blocking overflow.
    pub fn new() -> Result<Self> {
        MultiSinkLoggerBuilder::new().build()
    }

    /// Build with defaults except for the rotating file destination.
    pub fn with_rotating_file(
        path: impl Into<PathBuf>,
        max_file_size: u64,
        max_file_count: usize,
    ) -> Result<Self> {
        MultiSinkLoggerBuilder::new()
            .rotating_path(path)
            .max_file_size(max_file_size)
            .max_file_count(max_file_count)
            .build()
    }

    #[must_use]
    pub fn builder() -> MultiSinkLoggerBuilder {
        MultiSinkLoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn log(&self, level: Severity, message: impl Into<String>) {
        self.inner.log(level, message);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.inner.trace(message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.inner.debug(message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.inner.info(message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.inner.warn(message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.inner.error(message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.inner.critical(message);
    }

    /// Render a binary payload as a hex+ASCII dump suitable for a message.
    pub fn to_hex(&self, bytes: impl AsRef<[u8]>) -> String {
        crate::hex::to_hex(bytes)
    }

    /// Logger-wide threshold; records below it never reach any sink.
    pub fn set_level(&self, level: Severity) {
        self.inner.set_min_level(level);
    }

    pub fn level(&self) -> Severity {
        self.inner.min_level()
    }

    /// Retune one sink's threshold without touching the others.
    pub fn set_sink_level(&self, sink: SinkId, level: Severity) {
        self.inner.set_slot_threshold(sink.slot(), level);
    }

    pub fn sink_level(&self, sink: SinkId) -> Option<Severity> {
        self.inner.slot_threshold(sink.slot())
    }

    /// Mute one sink. Its threshold is remembered and restored by
    /// [`enable_sink`](Self::enable_sink).
    pub fn disable_sink(&self, sink: SinkId) {
        self.inner.disable_slot(sink.slot());
    }

    pub fn enable_sink(&self, sink: SinkId) {
        self.inner.enable_slot(sink.slot());
    }

    /// Replace the output pattern for subsequently delivered records.
    pub fn set_pattern(&self, pattern: &str) {
        self.inner.set_pattern(Pattern::new(pattern));
    }

    pub fn pattern(&self) -> String {
        self.inner.pattern()
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.inner.metrics()
    }

    /// Drain pending records and stop the worker. Returns `true` when the
    /// queue was fully delivered within `timeout`.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        self.inner.shutdown(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn test_builder(dir: &std::path::Path) -> MultiSinkLoggerBuilder {
        MultiSinkLoggerBuilder::new()
            .name("test-facade")
            .rotating_path(dir.join("InfoLog.log"))
            .critical_path(dir.join("ExceptionLog.log"))
            .use_colors(false)
    }

    #[test]
    fn test_sink_ids_map_to_wiring_order() {
        assert_eq!(SinkId::Console.slot(), 0);
        assert_eq!(SinkId::RotatingFile.slot(), 1);
        assert_eq!(SinkId::CriticalFile.slot(), 2);
    }

    #[test]
    fn test_default_thresholds() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();
        let logger = test_builder(dir.path()).build_in(&registry).unwrap();

        assert_eq!(logger.level(), Severity::Info);
        assert_eq!(logger.sink_level(SinkId::Console), Some(Severity::Info));
        assert_eq!(logger.sink_level(SinkId::RotatingFile), Some(Severity::Info));
        assert_eq!(
            logger.sink_level(SinkId::CriticalFile),
            Some(Severity::Critical)
        );
        assert!(logger.shutdown(Duration::from_secs(5)));
    }

    #[test]
    fn test_registered_under_its_name() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();
        let logger = test_builder(dir.path()).build_in(&registry).unwrap();

        assert!(registry.get("test-facade").is_some());
        assert_eq!(logger.name(), "test-facade");
        assert!(logger.shutdown(Duration::from_secs(5)));
    }

    #[test]
    fn test_critical_file_receives_only_critical() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();
        let logger = test_builder(dir.path()).build_in(&registry).unwrap();
        logger.set_pattern("{level} {message}");

        logger.info("routine");
        logger.error("bad");
        logger.critical("fatal");
        assert!(logger.shutdown(Duration::from_secs(5)));

        let critical = fs::read_to_string(dir.path().join("ExceptionLog.log")).unwrap();
        assert_eq!(critical, "CRITICAL fatal\n");

        let rotating = fs::read_to_string(dir.path().join("InfoLog.log")).unwrap();
        assert!(rotating.contains("INFO routine"));
        assert!(rotating.contains("ERROR bad"));
        assert!(rotating.contains("CRITICAL fatal"));
    }

    #[test]
    fn test_builder_failure_registers_nothing() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();
        let result = test_builder(dir.path())
            .max_file_size(0)
            .build_in(&registry);
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_disable_and_enable_sink() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();
        let logger = test_builder(dir.path()).build_in(&registry).unwrap();
        logger.set_pattern("{message}");

        logger.disable_sink(SinkId::RotatingFile);
        logger.info("muted");
        // Wait for the worker to deliver before re-enabling, so the muted
        // record is filtered against the disabled slot.
        while logger.metrics().total_logged() < 1 {
            std::thread::sleep(Duration::from_millis(1));
        }
        logger.enable_sink(SinkId::RotatingFile);
        logger.info("audible");
        assert!(logger.shutdown(Duration::from_secs(5)));

        let rotating = fs::read_to_string(dir.path().join("InfoLog.log")).unwrap();
        assert!(!rotating.contains("muted"));
        assert!(rotating.contains("audible"));
        assert_eq!(
            logger.sink_level(SinkId::RotatingFile),
            Some(Severity::Info)
        );
    }

    #[test]
    fn test_to_hex_delegates() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();
        let logger = test_builder(dir.path()).build_in(&registry).unwrap();
        assert_eq!(logger.to_hex([0x41u8]), crate::hex::to_hex([0x41u8]));
        assert!(logger.shutdown(Duration::from_secs(5)));
    }
}
