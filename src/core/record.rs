//! Log record structure

use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ephemeral log record: created at the call site, consumed once by delivery.
///
/// The message is carried verbatim, newlines included, so multi-line
/// payloads such as hex dumps render unescaped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Severity,
    pub logger_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(logger_name: impl Into<String>, level: Severity, message: String) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            message,
            timestamp: Utc::now(),
        }
    }
}
