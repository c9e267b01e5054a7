//! Core types: styling, levels, configuration, writer and loggers

pub mod config;
pub mod error;
pub mod file_logger;
pub mod level;
pub mod logger;
pub mod style;
pub mod template;
pub mod timestamp;
pub mod writer;

pub use config::{LevelPrefixes, Prefix, WriteOptions, WriterConfig};
pub use error::{Result, WtermError};
pub use file_logger::{FileLogger, FileLoggerBuilder};
pub use level::{Level, LevelOperand, LevelRegistry, Stream, DEBUG, ERROR, INFO, WARNING};
pub use logger::{LogOptions, Logger, LoggerBuilder, LoggerConfig};
pub use style::{render, strip, Color, NamedColor, Style, RESET_ALL};
pub use template::{LineTemplate, DEFAULT_FORMAT};
pub use timestamp::TimestampFormat;
pub use writer::{ConsoleWriter, ConsoleWriterBuilder};
