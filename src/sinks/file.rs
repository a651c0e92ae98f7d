//! Single-file sink implementation

use crate::core::{LogError, LogRecord, Pattern, Result, Sink};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends rendered records to one file, optionally truncating it on open.
///
/// The facade's critical-only sink opens in append mode; the registry's
/// ad-hoc file loggers truncate on first open.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created, which
    /// makes the owning logger's construction fail.
    pub fn new<P: AsRef<Path>>(path: P, truncate: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| LogError::io("creating log directory", e))?;
            }
        }

        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }
        let file = options.open(&path).map_err(|e| {
            LogError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
        })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &LogRecord, pattern: &Pattern) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LogError::writer("file writer not initialized"))?;

        let mut output = pattern.render(record);
        output.push('\n');
        writer.write_all(output.as_bytes()).map_err(|e| {
            LogError::file_sink(
                self.path.display().to_string(),
                format!("Failed to write record: {}", e),
            )
        })?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LogError::file_sink(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn kind(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
