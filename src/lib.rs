//! # wterm
//!
//! ANSI-styled terminal output and a small leveled logger.
//!
//! ## Features
//!
//! - **Styling**: render named, 256-color and truecolor styles; strip them again
//! - **Console writer**: per-write terminal gating, prefixes, style stripping
//! - **Leveled logging**: level filtering, line templates, stream routing, tee
//! - **File logging**: append-mode log files with directory creation

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Color, ConsoleWriter, FileLogger, Level, LevelRegistry, LineTemplate, LogOptions, Logger,
        NamedColor, Prefix, Result, Stream, Style, TimestampFormat, WriteOptions, WriterConfig,
        WtermError, DEBUG, ERROR, INFO, WARNING,
    };
    pub use crate::sinks::{FileSink, MemorySink, Sink, StderrSink, StdoutSink};
}

pub use crate::core::{
    render, strip, Color, ConsoleWriter, ConsoleWriterBuilder, FileLogger, FileLoggerBuilder,
    Level, LevelOperand, LevelPrefixes, LevelRegistry, LineTemplate, LogOptions, Logger,
    LoggerBuilder, LoggerConfig, NamedColor, Prefix, Result, Stream, Style, TimestampFormat,
    WriteOptions, WriterConfig, WtermError, DEBUG, DEFAULT_FORMAT, ERROR, INFO, RESET_ALL, WARNING,
};
pub use sinks::{FileSink, IoSink, MemorySink, Sink, StderrSink, StdoutSink};
