//! Output destinations
//!
//! A [`Sink`] is an opaque text destination that can report whether it is
//! attached to an interactive terminal.

pub mod file;
pub mod memory;
pub mod stdio;

pub use file::FileSink;
pub use memory::MemorySink;
pub use stdio::{IoSink, StderrSink, StdoutSink};

use crate::core::Result;

/// A text destination for console writers and loggers.
///
/// Implementations must be `Send` so loggers can move between threads.
pub trait Sink: Send {
    /// Write `text` as-is. Line terminators are written by the caller.
    fn write_str(&mut self, text: &str) -> Result<()>;

    /// Whether the destination is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// Flush any buffered output
    fn flush(&mut self) -> Result<()>;

    /// Short name for diagnostics
    fn name(&self) -> &str;
}
