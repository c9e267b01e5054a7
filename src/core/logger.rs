//! Leveled logger built on [`ConsoleWriter`]

use super::{
    config::{LevelPrefixes, WriteOptions, WriterConfig},
    error::Result,
    level::{Level, LevelRegistry, Stream, DEBUG, ERROR, INFO, WARNING},
    template::{LineFields, LineTemplate},
    timestamp::TimestampFormat,
    writer::ConsoleWriter,
};
use crate::sinks::{Sink, StderrSink, StdoutSink};
use std::collections::HashMap;
use std::sync::Arc;

/// Leveling and formatting policy of a [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LineTemplate,
    /// `None` disables the logger entirely.
    pub min_level: Option<Level>,
    pub name: String,
    pub timestamp: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LineTemplate::default(),
            min_level: Some(INFO),
            name: "root".to_string(),
            timestamp: TimestampFormat::default(),
        }
    }
}

/// Writer settings a logger starts from: no colors, no prefixes.
pub fn logger_writer_defaults() -> WriterConfig {
    WriterConfig::default()
        .with_colors_enabled(false)
        .with_level_prefixes(LevelPrefixes::none())
}

/// Transient overrides for a single log call.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub tty: Option<bool>,
    pub notty: Option<bool>,
    pub colors_enabled: Option<bool>,
    pub endl: Option<String>,
    pub format: Option<LineTemplate>,
    pub name: Option<String>,
    pub min_level: Option<Level>,
}

impl LogOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tty(mut self, tty: bool) -> Self {
        self.tty = Some(tty);
        self
    }

    #[must_use]
    pub fn notty(mut self, notty: bool) -> Self {
        self.notty = Some(notty);
        self
    }

    #[must_use]
    pub fn colors_enabled(mut self, enabled: bool) -> Self {
        self.colors_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn endl(mut self, endl: impl Into<String>) -> Self {
        self.endl = Some(endl.into());
        self
    }

    #[must_use]
    pub fn format(mut self, template: LineTemplate) -> Self {
        self.format = Some(template);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            tty: self.tty,
            notty: self.notty,
            colors_enabled: self.colors_enabled,
            endl: self.endl.clone(),
            prefix: None,
            style: None,
        }
    }
}

/// Leveled logger that formats lines through a [`LineTemplate`] and writes
/// them with a [`ConsoleWriter`].
///
/// Messages below the minimum level are dropped. Each level goes to the
/// stream it is routed to and is mirrored to the tee of its severity class.
pub struct Logger {
    writer: ConsoleWriter,
    config: LoggerConfig,
    registry: Arc<LevelRegistry>,
    routes: HashMap<String, Stream>,
    tee_out: Option<Box<dyn Sink>>,
    tee_err: Option<Box<dyn Sink>>,
}

impl Logger {
    /// A logger on the process stdout/stderr with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ConsoleWriter::builder()
                .config(logger_writer_defaults())
                .build(),
            config: LoggerConfig::default(),
            registry: Arc::new(LevelRegistry::standard()),
            routes: HashMap::new(),
            tee_out: None,
            tee_err: None,
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn writer_config(&self) -> &WriterConfig {
        self.writer.config()
    }

    pub fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    /// Replace the leveling and formatting policy. The timestamp format is
    /// checked first; on error the current policy is kept.
    pub fn configure(&mut self, config: LoggerConfig) -> Result<()> {
        config.timestamp.validate()?;
        self.config = config;
        Ok(())
    }

    /// Replace the writer settings. Any prefix is dropped so it cannot
    /// corrupt the line template.
    pub fn configure_writer(&mut self, config: WriterConfig) {
        self.writer.configure(config.without_prefix());
    }

    pub fn restore_defaults(&mut self) {
        self.config = LoggerConfig::default();
        self.writer.configure(logger_writer_defaults());
    }

    /// `None` silences the logger.
    pub fn set_min_level(&mut self, level: Option<Level>) {
        self.config.min_level = level;
    }

    /// Set the minimum level to a registered level.
    pub fn set_level_by_name(&mut self, name: &str) -> Result<()> {
        let level = self.registry.resolve(name)?.clone();
        self.config.min_level = Some(level);
        Ok(())
    }

    /// Mirror sink for debug and info lines.
    pub fn set_tee_out(&mut self, sink: Option<Box<dyn Sink>>) {
        self.tee_out = sink;
    }

    /// Mirror sink for warning and error lines.
    pub fn set_tee_err(&mut self, sink: Option<Box<dyn Sink>>) {
        self.tee_err = sink;
    }

    /// Stream a level is written to.
    pub fn route(&self, level: &Level) -> Stream {
        self.routes
            .get(level.name())
            .copied()
            .unwrap_or_else(|| level.stream())
    }

    /// Whether a message at `level` would pass the level gate.
    pub fn is_enabled(&self, level: &Level) -> bool {
        self.config
            .min_level
            .as_ref()
            .is_some_and(|min_level| level >= min_level)
    }

    /// Write `message` at `level` if it passes the minimum level.
    pub fn log(&mut self, level: &Level, message: &str) -> Result<()> {
        self.log_with(level, message, &LogOptions::default())
    }

    /// [`log`](Self::log) with per-call overrides.
    pub fn log_with(&mut self, level: &Level, message: &str, options: &LogOptions) -> Result<()> {
        let Some(min_level) = options.min_level.as_ref().or(self.config.min_level.as_ref()) else {
            return Ok(());
        };
        if level < min_level {
            return Ok(());
        }

        let write_options = options.write_options();

        let line = self.format_line(level, message, options);
        self.writer.print(self.route(level), Some(&line), &write_options)?;

        // Tees follow the level's severity class, not its route.
        let has_tee = match level.stream() {
            Stream::Primary => self.tee_out.is_some(),
            Stream::Secondary => self.tee_err.is_some(),
        };
        if has_tee {
            let line = self.format_line(level, message, options);
            let tee = match level.stream() {
                Stream::Primary => self.tee_out.as_deref_mut(),
                Stream::Secondary => self.tee_err.as_deref_mut(),
            };
            if let Some(tee) = tee {
                ConsoleWriter::write_to(self.writer.config(), tee, Some(&line), &write_options)?;
            }
        }

        Ok(())
    }

    /// Log at a level looked up by name in this logger's registry.
    pub fn log_named(&mut self, level: &str, message: &str) -> Result<()> {
        let level = self.registry.resolve(level)?.clone();
        self.log(&level, message)
    }

    pub fn debug(&mut self, message: &str) -> Result<()> {
        self.log(&DEBUG, message)
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        self.log(&INFO, message)
    }

    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.log(&WARNING, message)
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.log(&ERROR, message)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        if let Some(ref mut tee) = self.tee_out {
            tee.flush()?;
        }
        if let Some(ref mut tee) = self.tee_err {
            tee.flush()?;
        }
        Ok(())
    }

    fn format_line(&self, level: &Level, message: &str, options: &LogOptions) -> String {
        let template = options.format.as_ref().unwrap_or(&self.config.format);
        let timestamp = if template.uses_timestamp() {
            self.config.timestamp.now()
        } else {
            String::new()
        };
        template.render(&LineFields {
            timestamp: &timestamp,
            name: options.name.as_deref().unwrap_or(&self.config.name),
            level: level.name(),
            message,
        })
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`Logger`]
///
/// # Example
/// ```
/// use wterm::prelude::*;
///
/// let capture = MemorySink::new();
/// let mut logger = Logger::builder()
///     .name("svc")
///     .format("{name} [{level}] {message}")
///     .min_level(DEBUG)
///     .stdout(capture.clone())
///     .build()
///     .unwrap();
///
/// logger.debug("starting").unwrap();
/// assert_eq!(capture.contents(), "svc [debug] starting\n");
/// ```
pub struct LoggerBuilder {
    stdout: Option<Box<dyn Sink>>,
    stderr: Option<Box<dyn Sink>>,
    tee_out: Option<Box<dyn Sink>>,
    tee_err: Option<Box<dyn Sink>>,
    writer_config: WriterConfig,
    format: Option<String>,
    min_level: Option<Level>,
    level_name: Option<String>,
    name: String,
    timestamp: TimestampFormat,
    registry: Arc<LevelRegistry>,
    routes: HashMap<String, Stream>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        let defaults = LoggerConfig::default();
        Self {
            stdout: None,
            stderr: None,
            tee_out: None,
            tee_err: None,
            writer_config: logger_writer_defaults(),
            format: None,
            min_level: defaults.min_level,
            level_name: None,
            name: defaults.name,
            timestamp: defaults.timestamp,
            registry: Arc::new(LevelRegistry::standard()),
            routes: HashMap::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stdout = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stderr<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stderr = Some(Box::new(sink));
        self
    }

    /// Mirror primary-stream lines into `sink`.
    #[must_use = "builder methods return a new value"]
    pub fn tee_out<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.tee_out = Some(Box::new(sink));
        self
    }

    /// Mirror secondary-stream lines into `sink`.
    #[must_use = "builder methods return a new value"]
    pub fn tee_err<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.tee_err = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.stdout = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stderr_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.stderr = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tee_out_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.tee_out = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tee_err_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.tee_err = Some(sink);
        self
    }

    /// Writer settings; a prefix, if any, is discarded.
    #[must_use = "builder methods return a new value"]
    pub fn writer_config(mut self, config: WriterConfig) -> Self {
        self.writer_config = config.without_prefix();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tty(mut self, tty: bool) -> Self {
        self.writer_config.tty = tty;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn notty(mut self, notty: bool) -> Self {
        self.writer_config.notty = notty;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors_enabled(mut self, enabled: bool) -> Self {
        self.writer_config.colors_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn endl(mut self, endl: impl Into<String>) -> Self {
        self.writer_config.endl = endl.into();
        self
    }

    /// Line template; validated by [`build`](Self::build).
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self.level_name = None;
        self
    }

    /// Minimum level by name; resolved against the registry by [`build`](Self::build).
    #[must_use = "builder methods return a new value"]
    pub fn level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    /// Build a logger that never emits.
    #[must_use = "builder methods return a new value"]
    pub fn disabled(mut self) -> Self {
        self.min_level = None;
        self.level_name = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<LevelRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Send `level` to `stream` instead of the level's own default.
    #[must_use = "builder methods return a new value"]
    pub fn route(mut self, level: &Level, stream: Stream) -> Self {
        self.routes.insert(level.name().to_string(), stream);
        self
    }

    pub fn build(self) -> Result<Logger> {
        let format = match self.format {
            Some(ref source) => LineTemplate::parse(source)?,
            None => LineTemplate::default(),
        };
        let min_level = match self.level_name {
            Some(ref name) => Some(self.registry.resolve(name)?.clone()),
            None => self.min_level,
        };
        self.timestamp.validate()?;

        let writer = ConsoleWriter::builder()
            .config(self.writer_config)
            .stdout_boxed(self.stdout.unwrap_or_else(|| Box::new(StdoutSink)))
            .stderr_boxed(self.stderr.unwrap_or_else(|| Box::new(StderrSink)))
            .build();

        Ok(Logger {
            writer,
            config: LoggerConfig {
                format,
                min_level,
                name: self.name,
                timestamp: self.timestamp,
            },
            registry: self.registry,
            routes: self.routes,
            tee_out: self.tee_out,
            tee_err: self.tee_err,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
