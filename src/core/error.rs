//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LogError>;

/// Construction-time errors are surfaced to the caller; delivery-time errors
/// stay sink-local (reported to stderr, counted in metrics) and never reach
/// the emitting thread.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSink { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    Rotation { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    Writer(String),
}

impl LogError {
    /// Create an IO error with operation context
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        LogError::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::FileSink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a rotation error
    pub fn rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::Rotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic writer error
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LogError::Writer(msg.into())
    }
}
