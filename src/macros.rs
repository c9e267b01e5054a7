//! Logging macros with `format!`-style arguments.
//!
//! Each macro expands to the matching [`Logger`](crate::Logger) call and
//! evaluates to its `Result`.
//!
//! # Examples
//!
//! ```
//! use wterm::prelude::*;
//! use wterm::info;
//!
//! let capture = MemorySink::new();
//! let mut logger = Logger::builder()
//!     .format("{message}")
//!     .stdout(capture.clone())
//!     .build()?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//! assert_eq!(capture.contents(), "Server listening on port 8080\n");
//! # Ok::<(), wterm::WtermError>(())
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use wterm::prelude::*;
/// # let mut logger = Logger::builder().stdout(MemorySink::new()).build()?;
/// use wterm::log;
/// log!(logger, WARNING, "Disk at {}%", 91)?;
/// # Ok::<(), wterm::WtermError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(&$level, &format!($($arg)+))
    };
}

/// Log a formatted debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::DEBUG, $($arg)+)
    };
}

/// Log a formatted info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::INFO, $($arg)+)
    };
}

/// Log a formatted warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::WARNING, $($arg)+)
    };
}

/// Log a formatted error-level message.
///
/// ```
/// # use wterm::prelude::*;
/// # let mut logger = Logger::builder().stderr(MemorySink::new()).build()?;
/// use wterm::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error")?;
/// # Ok::<(), wterm::WtermError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::ERROR, $($arg)+)
    };
}
