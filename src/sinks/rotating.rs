//! Size-rotating file sink
//!
//! Keeps the active file under a byte budget by rolling it to indexed
//! backups (`app.log` -> `app.log.1` -> ... -> `app.log.N`), retiring the
//! oldest backup beyond the retention count. Rotation happens before the
//! write that would push the active file past the limit, so records already
//! written are never split, lost or duplicated.

use crate::core::{LogError, LogRecord, Pattern, Result, Sink};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct RotatingFileSink {
    base_path: PathBuf,
    max_file_size: u64,
    max_file_count: usize,
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

impl RotatingFileSink {
    /// Open (or create) the active file at `path`.
    ///
    /// `max_file_count` is the number of rotated backups retained alongside
    /// the active file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero size or count, or a file
    /// sink error if the destination cannot be opened.
    pub fn new<P: AsRef<Path>>(path: P, max_file_size: u64, max_file_count: usize) -> Result<Self> {
        if max_file_size == 0 {
            return Err(LogError::config(
                "RotatingFileSink",
                "max_file_size must be greater than zero",
            ));
        }
        if max_file_count == 0 {
            return Err(LogError::config(
                "RotatingFileSink",
                "max_file_count must be greater than zero",
            ));
        }

        let base_path = path.as_ref().to_path_buf();
        if let Some(parent) = base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| LogError::io("creating log directory", e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&base_path)
            .map_err(|e| {
                LogError::file_sink(
                    base_path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let current_size = file
            .metadata()
            .map_err(|e| {
                LogError::file_sink(
                    base_path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            base_path,
            max_file_size,
            max_file_count,
            writer: Some(BufWriter::new(file)),
            current_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn max_file_count(&self) -> usize {
        self.max_file_count
    }

    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LogError::rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
            // Writer dropped here, releasing the file handle
        }

        // Retire the oldest backup beyond the retention count
        let oldest = self.backup_path(self.max_file_count);
        if oldest.exists() {
            if let Err(e) = fs::remove_file(&oldest) {
                eprintln!(
                    "[multilog] failed to remove oldest backup {}: {}",
                    oldest.display(),
                    e
                );
            }
        }

        // Shift remaining backups up by one index
        for i in (1..self.max_file_count).rev() {
            let old_path = self.backup_path(i);
            let new_path = self.backup_path(i + 1);
            if old_path.exists() {
                // rename replaces the destination atomically on most
                // platforms; fall back to remove-then-rename elsewhere
                if fs::rename(&old_path, &new_path).is_err() {
                    if new_path.exists() {
                        let _ = fs::remove_file(&new_path);
                    }
                    fs::rename(&old_path, &new_path).map_err(|e| {
                        LogError::rotation(
                            old_path.display().to_string(),
                            format!("Failed to shift backup files: {}", e),
                        )
                    })?;
                }
            }
        }

        if self.base_path.exists() {
            fs::rename(&self.base_path, self.backup_path(1)).map_err(|e| {
                LogError::rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate active file: {}", e),
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.base_path)
            .map_err(|e| {
                LogError::rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to create new active file: {}", e),
                )
            })?;

        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }

    fn reopen(&mut self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.base_path)
            .map_err(|e| {
                LogError::file_sink(
                    self.base_path.display().to_string(),
                    format!("Failed to reopen after rotation failure: {}", e),
                )
            })?;
        self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn write(&mut self, record: &LogRecord, pattern: &Pattern) -> Result<()> {
        let mut output = pattern.render(record);
        output.push('\n');
        let incoming = output.len() as u64;

        if self.current_size > 0 && self.current_size + incoming > self.max_file_size {
            if let Err(e) = self.rotate() {
                // Keep writing to the current file rather than losing the
                // record; the file may grow past the limit in this case.
                eprintln!("[multilog] rotation failed: {}; continuing with current file", e);
                if self.writer.is_none() {
                    self.reopen()?;
                }
            }
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LogError::writer("rotating file writer not initialized"))?;
        writer.write_all(output.as_bytes()).map_err(|e| {
            LogError::file_sink(
                self.base_path.display().to_string(),
                format!("Failed to write record: {}", e),
            )
        })?;
        self.current_size += incoming;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LogError::file_sink(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn kind(&self) -> &str {
        "rotating_file"
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
