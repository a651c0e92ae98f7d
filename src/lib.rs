//! # multilog
//!
//! Multi-destination logging with per-sink severity control.
//!
//! One application logger fans every record out to a colorized console, a
//! size-rotated file and an append-only file reserved for critical records.
//! Each sink filters by its own threshold on top of the logger-wide one, and
//! delivery runs on a dedicated worker thread behind a bounded queue so the
//! calling thread never waits on file or terminal I/O.
//!
//! Alongside the facade, a process-wide registry backs one-call helpers
//! (`info_to_file`, `error_to_console`, ...) that lazily create named
//! loggers for ad-hoc destinations, and [`to_hex`] renders binary payloads
//! as hex+ASCII dumps for logging.
//!
//! ## Quick start
//!
//! ```no_run
//! use multilog::{MultiSinkLogger, Severity};
//!
//! # fn main() -> multilog::Result<()> {
//! let logger = MultiSinkLogger::new()?;
//! logger.info("service started");
//! logger.critical("wrote to the console, the rotating file and ExceptionLog");
//!
//! // Quiet the console without touching the files
//! logger.set_sink_level(multilog::SinkId::Console, Severity::Error);
//!
//! logger.info(logger.to_hex(b"\x00\x01binary payload"));
//! logger.shutdown(std::time::Duration::from_secs(5));
//! # Ok(())
//! # }
//! ```

pub mod adhoc;
pub mod core;
pub mod hex;
#[macro_use]
pub mod macros;
pub mod multi_sink;
pub mod registry;
pub mod sinks;

pub use crate::core::{
    LogError, LogRecord, Logger, LoggerMetrics, OverflowPolicy, Pattern, Result, Severity, Sink,
    SinkSlot, DEFAULT_PATTERN, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use adhoc::{
    critical_to_console, critical_to_file, critical_to_rotating_file, error_to_console,
    error_to_file, error_to_rotating_file, info_to_console, info_to_file, info_to_rotating_file,
    log_to_console, log_to_file, log_to_rotating_file, warn_to_console, warn_to_file,
    warn_to_rotating_file, FileTarget, RotatingTarget,
};
pub use hex::to_hex;
pub use multi_sink::{MultiSinkLogger, MultiSinkLoggerBuilder, SinkId};
pub use registry::{default_registry, Registry};
pub use sinks::{ConsoleSink, FileSink, RotatingFileSink};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::core::{LogError, Logger, OverflowPolicy, Pattern, Result, Severity, Sink};
    pub use crate::hex::to_hex;
    pub use crate::multi_sink::{MultiSinkLogger, MultiSinkLoggerBuilder, SinkId};
    pub use crate::registry::{default_registry, Registry};
    pub use crate::sinks::{ConsoleSink, FileSink, RotatingFileSink};
}
