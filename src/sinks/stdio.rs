//! Standard stream sinks

use super::Sink;
use crate::core::Result;
use std::io::{self, IsTerminal, Write};

/// Process standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_str(&mut self, text: &str) -> Result<()> {
        io::stdout().write_all(text.as_bytes())?;
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        io::stdout().is_terminal()
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// Process standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_str(&mut self, text: &str) -> Result<()> {
        io::stderr().write_all(text.as_bytes())?;
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        io::stderr().is_terminal()
    }

    fn flush(&mut self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stderr"
    }
}

/// Adapts any [`Write`] into a sink with a fixed terminal flag.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    terminal: bool,
}

impl<W: Write + Send> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            terminal: false,
        }
    }

    #[must_use]
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> Sink for IoSink<W> {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "io"
    }
}
