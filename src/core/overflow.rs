//! Overflow policy for the bounded delivery queue

use std::fmt;

/// What `log` does when the delivery queue is full.
///
/// The default is `Block`: backpressure is applied to the caller and no
/// record is lost. `DropNewest` trades delivery guarantees for latency;
/// drops are counted in [`LoggerMetrics`](super::metrics::LoggerMetrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Default)]
pub enum OverflowPolicy {
    /// Block the emitting thread until queue space is available.
    #[default]
    Block,

    /// Drop the new record and account for it in metrics.
    DropNewest,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
        }
    }
}
