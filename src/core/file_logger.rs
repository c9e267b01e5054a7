//! Logger backed by an append-mode file

use super::{
    error::{Result, WtermError},
    level::{Level, LevelRegistry},
    logger::{Logger, LoggerBuilder},
    timestamp::TimestampFormat,
};
use crate::sinks::{FileSink, Sink, StderrSink, StdoutSink};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A [`Logger`] that owns the log file it opened.
///
/// Both streams go to the file unless explicit sinks are given. The file is
/// flushed and released by [`close`](Self::close) or on drop.
///
/// # Example
/// ```no_run
/// use wterm::FileLogger;
///
/// let mut logger = FileLogger::builder()
///     .filename("logs/app.log")
///     .name("app")
///     .tee(true)
///     .build()?;
/// logger.info("started")?;
/// logger.close()?;
/// # Ok::<(), wterm::WtermError>(())
/// ```
pub struct FileLogger {
    logger: Logger,
    file: Option<FileSink>,
}

impl FileLogger {
    #[must_use]
    pub fn builder() -> FileLoggerBuilder {
        FileLoggerBuilder::new()
    }

    /// Absolute path of the owned log file, if one was opened.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(FileSink::path)
    }

    /// Flush everything and release the file handle. Later writes to the
    /// file fail.
    pub fn close(&mut self) -> Result<()> {
        self.logger.flush()?;
        if let Some(ref file) = self.file {
            file.close()?;
        }
        Ok(())
    }

    pub fn into_inner(mut self) -> Logger {
        let logger = std::mem::take(&mut self.logger);
        self.file = None;
        logger
    }
}

impl Deref for FileLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.logger
    }
}

impl DerefMut for FileLogger {
    fn deref_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        let Some(ref file) = self.file else {
            return;
        };
        if file.is_closed() {
            return;
        }
        if let Err(e) = self.logger.flush().and_then(|()| file.close()) {
            eprintln!(
                "[wterm ERROR] Failed to close log file '{}': {}",
                file.path().display(),
                e
            );
        }
    }
}

/// Builder for [`FileLogger`]
pub struct FileLoggerBuilder {
    logger: LoggerBuilder,
    filename: Option<PathBuf>,
    out: Option<Box<dyn Sink>>,
    err: Option<Box<dyn Sink>>,
    tee: bool,
    tee_out: Option<Box<dyn Sink>>,
    tee_err: Option<Box<dyn Sink>>,
}

impl FileLoggerBuilder {
    pub fn new() -> Self {
        Self {
            logger: LoggerBuilder::new(),
            filename: None,
            out: None,
            err: None,
            tee: false,
            tee_out: None,
            tee_err: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.filename = Some(path.into());
        self
    }

    /// Explicit sink for primary-stream lines instead of the file.
    #[must_use = "builder methods return a new value"]
    pub fn out<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.out = Some(Box::new(sink));
        self
    }

    /// Explicit sink for secondary-stream lines instead of the file.
    #[must_use = "builder methods return a new value"]
    pub fn err<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.err = Some(Box::new(sink));
        self
    }

    /// Mirror lines to the process stdout/stderr unless explicit tee sinks
    /// are set.
    #[must_use = "builder methods return a new value"]
    pub fn tee(mut self, tee: bool) -> Self {
        self.tee = tee;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tee_out<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.tee_out = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tee_err<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.tee_err = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.logger = self.logger.name(name);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.logger = self.logger.format(template);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.logger = self.logger.min_level(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_name(mut self, name: impl Into<String>) -> Self {
        self.logger = self.logger.level_name(name);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.logger = self.logger.timestamp_format(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<LevelRegistry>) -> Self {
        self.logger = self.logger.registry(registry);
        self
    }

    /// Adjust the underlying [`LoggerBuilder`] directly.
    #[must_use = "builder methods return a new value"]
    pub fn with_logger(mut self, f: impl FnOnce(LoggerBuilder) -> LoggerBuilder) -> Self {
        self.logger = f(self.logger);
        self
    }

    /// Open the file (creating directories as needed) and wire the sinks.
    pub fn build(self) -> Result<FileLogger> {
        let file = self.filename.as_deref().map(FileSink::open).transpose()?;

        let fallback = |stream: &str| -> Result<Box<dyn Sink>> {
            match file {
                Some(ref file) => Ok(Box::new(file.clone())),
                None => Err(WtermError::config(
                    "FileLogger",
                    format!("no filename and no explicit {stream} sink"),
                )),
            }
        };
        let out = match self.out {
            Some(sink) => sink,
            None => fallback("out")?,
        };
        let err = match self.err {
            Some(sink) => sink,
            None => fallback("err")?,
        };

        let mut logger = self.logger.stdout_boxed(out).stderr_boxed(err);
        match self.tee_out {
            Some(sink) => logger = logger.tee_out_boxed(sink),
            None if self.tee => logger = logger.tee_out(StdoutSink),
            None => {}
        }
        match self.tee_err {
            Some(sink) => logger = logger.tee_err_boxed(sink),
            None if self.tee => logger = logger.tee_err(StderrSink),
            None => {}
        }

        Ok(FileLogger {
            logger: logger.build()?,
            file,
        })
    }
}

impl Default for FileLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
