//! Append-mode file sink

use super::Sink;
use crate::core::{Result, WtermError};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file opened in append mode.
///
/// Clones share one handle, which lets the primary and secondary streams of a
/// logger write into the same file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    writer: Arc<Mutex<Option<BufWriter<File>>>>,
}

impl FileSink {
    /// Resolve `path` to an absolute path, create missing parent directories
    /// and open the file for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref())
            .map_err(|e| WtermError::io_operation("resolving", path.as_ref(), e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| WtermError::io_operation("creating directory", parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| WtermError::io_operation("opening log file", &path, e))?;

        Ok(Self {
            path,
            writer: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.writer.lock().is_none()
    }

    /// Flush and release the handle for every clone. Idempotent.
    pub fn close(&self) -> Result<()> {
        if let Some(mut writer) = self.writer.lock().take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Sink for FileSink {
    fn write_str(&mut self, text: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard.as_mut().ok_or_else(|| {
            WtermError::io_operation(
                "writing",
                &self.path,
                io::Error::other("file sink is closed"),
            )
        })?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
