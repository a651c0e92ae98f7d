//! Logging macros
//!
//! Format-string front ends over any value with a
//! `log(Severity, impl Into<String>)` method, i.e. both the core logger and
//! the multi-sink facade.

/// Log at an explicit severity.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log($level, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Severity::Trace, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)*)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Severity::Critical, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogRecord, Logger, Pattern, Result, Severity, Sink};
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct CollectingSink(Arc<Mutex<Vec<String>>>);

    impl Sink for CollectingSink {
        fn write(&mut self, record: &LogRecord, pattern: &Pattern) -> Result<()> {
            self.0.lock().push(pattern.render(record));
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn kind(&self) -> &str {
            "collecting"
        }
    }

    fn collector() -> (Logger, Arc<Mutex<Vec<String>>>) {
        let logger = Logger::sync("macros");
        logger.set_min_level(Severity::Trace);
        logger.set_pattern(Pattern::new("{level} {message}"));
        let lines = Arc::new(Mutex::new(Vec::new()));
        logger.add_sink(Box::new(CollectingSink(Arc::clone(&lines))), Severity::Trace);
        (logger, lines)
    }

    #[test]
    fn test_level_macros() {
        let (logger, lines) = collector();
        trace!(logger, "t={}", 1);
        debug!(logger, "d");
        info!(logger, "i");
        warn!(logger, "w");
        error!(logger, "e");
        critical!(logger, "c");
        assert_eq!(
            lines.lock().as_slice(),
            ["TRACE t=1", "DEBUG d", "INFO i", "WARN w", "ERROR e", "CRITICAL c"]
        );
    }

    #[test]
    fn test_explicit_level_macro() {
        let (logger, lines) = collector();
        log!(logger, Severity::Warn, "count {}", 42);
        assert_eq!(lines.lock().as_slice(), ["WARN count 42"]);
    }
}
