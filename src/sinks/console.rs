//! Console sink implementation

use crate::core::{LogRecord, Pattern, Result, Sink};
use std::io::Write;

/// Writes rendered records to stdout, colorizing the level token.
///
/// Write errors (e.g. a closed stdout) surface as `Err` and are isolated by
/// the delivery loop; other sinks of the same logger are unaffected.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &LogRecord, pattern: &Pattern) -> Result<()> {
        let rendered = if self.use_colors {
            pattern.render_colored(record)
        } else {
            pattern.render(record)
        };
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", rendered)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn kind(&self) -> &str {
        "console"
    }
}
