//! Core logger types and traits

pub mod error;
pub mod logger;
pub mod metrics;
pub mod overflow;
pub mod pattern;
pub mod record;
pub mod severity;
pub mod sink;

pub use error::{LogError, Result};
pub use logger::{Logger, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use overflow::OverflowPolicy;
pub use pattern::{Pattern, DEFAULT_PATTERN};
pub use record::LogRecord;
pub use severity::Severity;
pub use sink::{Sink, SinkSlot};
