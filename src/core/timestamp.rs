//! Timestamp formatting for log lines
//!
//! The default renders local time to the second, `2025-01-08T10:30:45`.

use super::error::{Result, WtermError};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};

/// Timestamp format options for the `{timestamp}` placeholder
///
/// # Examples
///
/// ```
/// use wterm::TimestampFormat;
///
/// let stamp = TimestampFormat::default().now();
/// assert_eq!(stamp.len(), "2025-01-08T10:30:45".len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45`, no fraction and no offset.
    #[default]
    Seconds,

    /// `2025-01-08T10:30:45.123`
    Millis,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+02:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Any strftime-compatible format string.
    ///
    /// ```
    /// use wterm::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Reject a `Custom` format containing an unknown strftime specifier.
    ///
    /// ```
    /// use wterm::TimestampFormat;
    ///
    /// assert!(TimestampFormat::Custom("%H:%M".into()).validate().is_ok());
    /// assert!(TimestampFormat::Custom("%Q".into()).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let TimestampFormat::Custom(format_str) = self else {
            return Ok(());
        };
        if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
            return Err(WtermError::config(
                "TimestampFormat",
                format!("invalid strftime format {format_str:?}"),
            ));
        }
        Ok(())
    }

    /// Format `datetime`. A `Custom` format that fails
    /// [`validate`](Self::validate) renders as an empty string.
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            TimestampFormat::Seconds => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            TimestampFormat::Millis => datetime.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => String::new(),
                }
            }
        }
    }

    /// Format the current local time.
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed_datetime() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_seconds_format() {
        assert_eq!(
            TimestampFormat::Seconds.format(&fixed_datetime()),
            "2025-01-08T10:30:45"
        );
    }

    #[test]
    fn test_millis_format() {
        assert_eq!(
            TimestampFormat::Millis.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123"
        );
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.ends_with("+02:00"));
    }

    #[test]
    fn test_unix_format() {
        let result = TimestampFormat::Unix.format(&fixed_datetime());
        let parsed: i64 = result.parse().expect("valid unix timestamp");
        assert_eq!(parsed, 1_736_325_045);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_validate_custom_format() {
        assert!(TimestampFormat::Seconds.validate().is_ok());
        assert!(TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string())
            .validate()
            .is_ok());

        let err = TimestampFormat::Custom("%Y %Q".to_string())
            .validate()
            .unwrap_err();
        assert!(matches!(err, WtermError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_custom_format_does_not_panic() {
        let format = TimestampFormat::Custom("%Q".to_string());
        assert_eq!(format.format(&fixed_datetime()), "");
    }

    #[test]
    fn test_default_is_seconds() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Seconds);
    }

    #[test]
    fn test_now_shape() {
        let stamp = TimestampFormat::Seconds.now();
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[10..11], "T");
    }
}
