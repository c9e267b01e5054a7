//! Error types for styled output and logging

use std::path::Path;

pub type Result<T> = std::result::Result<T, WtermError>;

#[derive(Debug, thiserror::Error)]
pub enum WtermError {
    /// Unknown color name or malformed style request
    #[error("Format error: {message}")]
    Format { message: String },

    /// Level name that is not present in the registry
    #[error("Unknown level '{name}'")]
    UnknownLevel { name: String },

    /// Level name registered twice
    #[error("Level '{name}' is already registered")]
    DuplicateLevel { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation} '{path}': {source}")]
    IoOperation {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WtermError {
    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        WtermError::Format {
            message: message.into(),
        }
    }

    pub fn unknown_color(name: &str) -> Self {
        Self::format(format!("unknown color {name:?}"))
    }

    pub fn unknown_level(name: impl Into<String>) -> Self {
        WtermError::UnknownLevel { name: name.into() }
    }

    pub fn duplicate_level(name: impl Into<String>) -> Self {
        WtermError::DuplicateLevel { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        WtermError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO error that remembers which path was being touched
    pub fn io_operation(
        operation: impl Into<String>,
        path: &Path,
        source: std::io::Error,
    ) -> Self {
        WtermError::IoOperation {
            operation: operation.into(),
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WtermError::unknown_color("chartreuse");
        assert!(matches!(err, WtermError::Format { .. }));

        let err = WtermError::config("LineTemplate", "unknown placeholder");
        assert!(matches!(err, WtermError::InvalidConfiguration { .. }));

        let err = WtermError::duplicate_level("info");
        assert!(matches!(err, WtermError::DuplicateLevel { .. }));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            WtermError::unknown_color("chartreuse").to_string(),
            "Format error: unknown color \"chartreuse\""
        );
        assert_eq!(
            WtermError::unknown_level("verbose").to_string(),
            "Unknown level 'verbose'"
        );
        assert_eq!(
            WtermError::config("FileLogger", "no filename").to_string(),
            "Invalid configuration for FileLogger: no filename"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = WtermError::io_operation("opening log file", Path::new("/var/log/app.log"), io_err);

        assert!(matches!(err, WtermError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("/var/log/app.log"));
    }
}
