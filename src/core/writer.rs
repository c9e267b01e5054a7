//! Styled console writer
//!
//! Every write runs the same decision procedure: skip absent messages, pick
//! the sink, gate on terminal-ness, add the prefix, then strip or apply style
//! and write the line followed by the terminator.

use super::{
    config::{LevelPrefixes, Prefix, WriteOptions, WriterConfig},
    error::Result,
    level::Stream,
    style::{self, Style},
};
use crate::sinks::{Sink, StderrSink, StdoutSink};

/// Terminal-aware line writer over a primary and a secondary [`Sink`].
///
/// Styles are applied only when the target sink is a terminal and colors are
/// enabled; otherwise they are stripped.
pub struct ConsoleWriter {
    stdout: Box<dyn Sink>,
    stderr: Box<dyn Sink>,
    config: WriterConfig,
}

impl ConsoleWriter {
    /// A writer on the process stdout/stderr with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> ConsoleWriterBuilder {
        ConsoleWriterBuilder::new()
    }

    /// Current configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Replace the whole configuration.
    pub fn configure(&mut self, config: WriterConfig) {
        self.config = config;
    }

    /// Go back to [`WriterConfig::default`].
    pub fn restore_defaults(&mut self) {
        self.config = WriterConfig::default();
    }

    /// Sink behind `stream`.
    pub fn sink_mut(&mut self, stream: Stream) -> &mut dyn Sink {
        match stream {
            Stream::Primary => self.stdout.as_mut(),
            Stream::Secondary => self.stderr.as_mut(),
        }
    }

    /// Run the write procedure for `message` against one of this writer's sinks.
    pub fn print(
        &mut self,
        stream: Stream,
        message: Option<&str>,
        options: &WriteOptions,
    ) -> Result<()> {
        let sink = match stream {
            Stream::Primary => self.stdout.as_mut(),
            Stream::Secondary => self.stderr.as_mut(),
        };
        Self::write_to(&self.config, sink, message, options)
    }

    /// Run the write procedure against an arbitrary sink.
    ///
    /// The message and the terminator are written as two separate calls.
    pub fn write_to(
        config: &WriterConfig,
        sink: &mut dyn Sink,
        message: Option<&str>,
        options: &WriteOptions,
    ) -> Result<()> {
        let Some(message) = message else {
            return Ok(());
        };

        let config = config.overridden(options);
        let terminal = sink.is_terminal();
        if !config.should_emit(terminal) {
            return Ok(());
        }

        let mut line = match config.prefix.as_ref().and_then(Prefix::resolve) {
            Some(prefix) => format!("{prefix} {message}"),
            None => message.to_string(),
        };

        if !terminal || !config.colors_enabled {
            line = style::strip(&line);
        } else if let Some(ref style) = options.style {
            line = style::render(&line, style);
        }

        sink.write_str(&line)?;
        sink.write_str(&config.endl)?;
        Ok(())
    }

    /// Plain line on the primary sink.
    pub fn log(&mut self, message: &str) -> Result<()> {
        self.print(Stream::Primary, Some(message), &WriteOptions::default())
    }

    /// [`log`](Self::log) with per-call overrides.
    pub fn log_with(&mut self, message: &str, options: &WriteOptions) -> Result<()> {
        self.print(Stream::Primary, Some(message), options)
    }

    /// Line on the primary sink with the given foreground color spec
    /// (`"red"`, `"208"`, `"#ff8000"`, ...). Nothing is written if the spec
    /// does not parse.
    pub fn log_colored(&mut self, message: &str, color: &str) -> Result<()> {
        let style = Style::new().try_fg(color)?;
        self.print(
            Stream::Primary,
            Some(message),
            &WriteOptions::new().style(style),
        )
    }

    pub fn debug(&mut self, message: &str) -> Result<()> {
        self.tagged(Stream::Primary, |p| p.debug.as_deref(), message)
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        self.tagged(Stream::Primary, |p| p.info.as_deref(), message)
    }

    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.tagged(Stream::Secondary, |p| p.warning.as_deref(), message)
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.tagged(Stream::Secondary, |p| p.error.as_deref(), message)
    }

    fn tagged(
        &mut self,
        stream: Stream,
        tag: impl Fn(&LevelPrefixes) -> Option<&str>,
        message: &str,
    ) -> Result<()> {
        let line = match tag(&self.config.level_prefixes) {
            Some(tag) if !tag.is_empty() => format!("{tag} {message}"),
            _ => message.to_string(),
        };
        self.print(stream, Some(&line), &WriteOptions::default())
    }

    /// Render `text` with `style`, regardless of the sinks.
    pub fn style(&self, text: &str, style: &Style) -> String {
        style::render(text, style)
    }

    /// Remove escape sequences from `text`.
    pub fn strip_style(&self, text: &str) -> String {
        style::strip(text)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()?;
        Ok(())
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ConsoleWriter`]
///
/// # Example
/// ```
/// use wterm::prelude::*;
///
/// let capture = MemorySink::new();
/// let mut writer = ConsoleWriter::builder()
///     .stdout(capture.clone())
///     .prefix("app")
///     .build();
/// writer.log("ready").unwrap();
/// assert_eq!(capture.contents(), "app ready\n");
/// ```
pub struct ConsoleWriterBuilder {
    stdout: Option<Box<dyn Sink>>,
    stderr: Option<Box<dyn Sink>>,
    config: WriterConfig,
}

impl ConsoleWriterBuilder {
    pub fn new() -> Self {
        Self {
            stdout: None,
            stderr: None,
            config: WriterConfig::default(),
        }
    }

    /// Primary sink, the process stdout by default.
    #[must_use = "builder methods return a new value"]
    pub fn stdout<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stdout = Some(Box::new(sink));
        self
    }

    /// Secondary sink, the process stderr by default.
    #[must_use = "builder methods return a new value"]
    pub fn stderr<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stderr = Some(Box::new(sink));
        self
    }

    /// Same as [`stdout`](Self::stdout) for an already boxed sink.
    #[must_use = "builder methods return a new value"]
    pub fn stdout_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.stdout = Some(sink);
        self
    }

    /// Same as [`stderr`](Self::stderr) for an already boxed sink.
    #[must_use = "builder methods return a new value"]
    pub fn stderr_boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.stderr = Some(sink);
        self
    }

    /// Start from `config` instead of [`WriterConfig::default`].
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Emit when the sink is a terminal.
    #[must_use = "builder methods return a new value"]
    pub fn tty(mut self, tty: bool) -> Self {
        self.config.tty = tty;
        self
    }

    /// Emit when the sink is not a terminal.
    #[must_use = "builder methods return a new value"]
    pub fn notty(mut self, notty: bool) -> Self {
        self.config.notty = notty;
        self
    }

    /// Allow styles on terminal sinks.
    #[must_use = "builder methods return a new value"]
    pub fn colors_enabled(mut self, enabled: bool) -> Self {
        self.config.colors_enabled = enabled;
        self
    }

    /// Line terminator, `"\n"` by default.
    #[must_use = "builder methods return a new value"]
    pub fn endl(mut self, endl: impl Into<String>) -> Self {
        self.config.endl = endl.into();
        self
    }

    /// Text written before every message, followed by a space.
    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.config.prefix = Some(prefix.into());
        self
    }

    /// Tags prepended by the leveled convenience methods.
    #[must_use = "builder methods return a new value"]
    pub fn level_prefixes(mut self, prefixes: LevelPrefixes) -> Self {
        self.config.level_prefixes = prefixes;
        self
    }

    pub fn build(self) -> ConsoleWriter {
        ConsoleWriter {
            stdout: self.stdout.unwrap_or_else(|| Box::new(StdoutSink)),
            stderr: self.stderr.unwrap_or_else(|| Box::new(StderrSink)),
            config: self.config,
        }
    }
}

impl Default for ConsoleWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
