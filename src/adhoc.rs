//! One-call logging to named destinations
//!
//! Each function resolves a logger in a [`Registry`] by name, creating it on
//! first use, then emits a single record through it. The name is the
//! identity: if a logger with the requested name already exists, the
//! destination described by the target is ignored and the existing logger is
//! reused, whatever it writes to.
//!
//! The `info_*`/`warn_*`/`error_*`/`critical_*` wrappers operate on the
//! process-wide [`default_registry`] with fixed names and paths, so two call
//! sites naming the same wrapper share one destination.

use crate::core::{Logger, Pattern, Result, Severity, DEFAULT_PATTERN};
use crate::registry::{default_registry, Registry};
use crate::sinks::{ConsoleSink, FileSink, RotatingFileSink};
use std::path::{Path, PathBuf};

/// Rotation defaults for ad-hoc rotating destinations: 5 MiB per file,
/// three retained backups.
pub const ADHOC_ROTATING_MAX_SIZE: u64 = 5 * 1024 * 1024;
pub const ADHOC_ROTATING_MAX_FILES: usize = 3;

/// A single-file destination for the ad-hoc functions.
///
/// The file is truncated when the logger is first created; subsequent calls
/// through the same name append.
#[derive(Debug, Clone)]
pub struct FileTarget {
    pub path: PathBuf,
    pub name: String,
    pub pattern: String,
}

impl FileTarget {
    pub fn new(path: impl AsRef<Path>, name: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: name.into(),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}

/// A size-rotated destination for the ad-hoc functions.
#[derive(Debug, Clone)]
pub struct RotatingTarget {
    pub path: PathBuf,
    pub name: String,
    pub pattern: String,
    pub max_file_size: u64,
    pub max_file_count: usize,
}

impl RotatingTarget {
    pub fn new(path: impl AsRef<Path>, name: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: name.into(),
            pattern: DEFAULT_PATTERN.to_string(),
            max_file_size: ADHOC_ROTATING_MAX_SIZE,
            max_file_count: ADHOC_ROTATING_MAX_FILES,
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_rotation(mut self, max_file_size: u64, max_file_count: usize) -> Self {
        self.max_file_size = max_file_size;
        self.max_file_count = max_file_count;
        self
    }
}

fn adhoc_logger(name: &str, sink: Box<dyn crate::core::Sink>) -> Logger {
    let logger = Logger::sync(name);
    // Filtering for these loggers is the caller's severity argument alone.
    logger.set_min_level(Severity::Trace);
    logger.add_sink(sink, Severity::Trace);
    logger
}

/// Delivery-time failures stay sink-local: reported to stderr and counted,
/// never returned to the emitting caller.
fn flush_quietly(logger: &Logger) {
    if let Err(e) = logger.flush() {
        logger.metrics().record_write_error();
        eprintln!("[multilog] logger '{}' flush failed: {}", logger.name(), e);
    }
}

/// Log one record to a named single-file destination in `registry`.
///
/// # Errors
///
/// Fails only if the logger must be created and the file cannot be opened;
/// no registry entry is left behind in that case. Once the logger exists,
/// delivery failures are sink-local and never surface here.
pub fn log_to_file(
    registry: &Registry,
    level: Severity,
    message: impl Into<String>,
    target: &FileTarget,
) -> Result<()> {
    let logger = registry.get_or_create(&target.name, || {
        let sink = FileSink::new(&target.path, true)?;
        Ok(adhoc_logger(&target.name, Box::new(sink)))
    })?;
    logger.set_pattern(Pattern::new(&target.pattern));
    logger.log(level, message);
    flush_quietly(&logger);
    Ok(())
}

/// Log one record to a named console destination in `registry`.
pub fn log_to_console(
    registry: &Registry,
    level: Severity,
    message: impl Into<String>,
    name: &str,
) -> Result<()> {
    let logger = registry.get_or_create(name, || {
        Ok(adhoc_logger(name, Box::new(ConsoleSink::new())))
    })?;
    logger.log(level, message);
    flush_quietly(&logger);
    Ok(())
}

/// Log one record to a named size-rotated destination in `registry`.
///
/// # Errors
///
/// Fails only if the logger must be created and the destination rejects the
/// rotation settings or cannot be opened; delivery failures through an
/// existing logger never surface here.
pub fn log_to_rotating_file(
    registry: &Registry,
    level: Severity,
    message: impl Into<String>,
    target: &RotatingTarget,
) -> Result<()> {
    let logger = registry.get_or_create(&target.name, || {
        let sink = RotatingFileSink::new(&target.path, target.max_file_size, target.max_file_count)?;
        Ok(adhoc_logger(&target.name, Box::new(sink)))
    })?;
    logger.set_pattern(Pattern::new(&target.pattern));
    logger.log(level, message);
    flush_quietly(&logger);
    Ok(())
}

macro_rules! default_file_fn {
    ($(#[$meta:meta])* $fn_name:ident, $level:expr, $path:literal) => {
        $(#[$meta])*
        pub fn $fn_name(message: impl Into<String>) -> Result<()> {
            let target = FileTarget::new($path, stringify!($fn_name));
            log_to_file(default_registry(), $level, message, &target)
        }
    };
}

macro_rules! default_console_fn {
    ($(#[$meta:meta])* $fn_name:ident, $level:expr) => {
        $(#[$meta])*
        pub fn $fn_name(message: impl Into<String>) -> Result<()> {
            log_to_console(default_registry(), $level, message, stringify!($fn_name))
        }
    };
}

macro_rules! default_rotating_fn {
    ($(#[$meta:meta])* $fn_name:ident, $level:expr, $path:literal) => {
        $(#[$meta])*
        pub fn $fn_name(message: impl Into<String>) -> Result<()> {
            let target = RotatingTarget::new($path, stringify!($fn_name));
            log_to_rotating_file(default_registry(), $level, message, &target)
        }
    };
}

default_file_fn!(
    /// Info-level record to `logs/InfoFileLog.log` (truncated on first use).
    info_to_file, Severity::Info, "logs/InfoFileLog.log");
default_file_fn!(warn_to_file, Severity::Warn, "logs/WarnFileLog.log");
default_file_fn!(error_to_file, Severity::Error, "logs/ErrorFileLog.log");
default_file_fn!(critical_to_file, Severity::Critical, "logs/CriticalFileLog.log");

default_console_fn!(
    /// Info-level record to the shared console logger.
    info_to_console, Severity::Info);
default_console_fn!(warn_to_console, Severity::Warn);
default_console_fn!(error_to_console, Severity::Error);
default_console_fn!(critical_to_console, Severity::Critical);

default_rotating_fn!(
    /// Info-level record to the rotating `logs/InfoRotatingLog.log`.
    info_to_rotating_file, Severity::Info, "logs/InfoRotatingLog.log");
default_rotating_fn!(warn_to_rotating_file, Severity::Warn, "logs/warnRotatingLog.log");
default_rotating_fn!(error_to_rotating_file, Severity::Error, "logs/errorRotatingLog.log");
default_rotating_fn!(critical_to_rotating_file, Severity::Critical, "logs/criticalRotatingLog.log");
