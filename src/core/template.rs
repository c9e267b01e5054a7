//! Line-format templates with named placeholders
//!
//! Recognized placeholders are `{timestamp}`, `{name}`, `{level}` and
//! `{message}`. Literal braces are written `{{` and `}}`.

use super::error::{Result, WtermError};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_FORMAT: &str = "{timestamp} {name} [{level}] {message}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Name,
    Level,
    Message,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(Field::Timestamp),
            "name" => Some(Field::Name),
            "level" => Some(Field::Level),
            "message" => Some(Field::Message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct LineFields<'a> {
    pub timestamp: &'a str,
    pub name: &'a str,
    pub level: &'a str,
    pub message: &'a str,
}

/// A parsed, validated line template.
///
/// ```
/// use wterm::core::template::{LineFields, LineTemplate};
///
/// let template: LineTemplate = "{name}: {message}".parse().unwrap();
/// let line = template.render(&LineFields {
///     timestamp: "",
///     name: "svc",
///     level: "info",
///     message: "up",
/// });
/// assert_eq!(line, "svc: up");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl LineTemplate {
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(WtermError::config(
                                    "LineTemplate",
                                    format!("unclosed placeholder in {source:?}"),
                                ))
                            }
                        }
                    }
                    let field = Field::parse(&name).ok_or_else(|| {
                        WtermError::config(
                            "LineTemplate",
                            format!("unknown placeholder {{{name}}} in {source:?}"),
                        )
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => {
                    return Err(WtermError::config(
                        "LineTemplate",
                        format!("single '}}' in {source:?}"),
                    ))
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, fields: &LineFields<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + fields.message.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Timestamp) => out.push_str(fields.timestamp),
                Segment::Field(Field::Name) => out.push_str(fields.name),
                Segment::Field(Field::Level) => out.push_str(fields.level),
                Segment::Field(Field::Message) => out.push_str(fields.message),
            }
        }
        out
    }

    /// Whether `{timestamp}` appears, so callers can skip reading the clock.
    pub fn uses_timestamp(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| *segment == Segment::Field(Field::Timestamp))
    }
}

impl Default for LineTemplate {
    fn default() -> Self {
        Self::parse(DEFAULT_FORMAT).expect("default template is valid")
    }
}

impl FromStr for LineTemplate {
    type Err = WtermError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LineTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> LineFields<'static> {
        LineFields {
            timestamp: "2025-01-08T10:30:45",
            name: "svc",
            level: "info",
            message: "hello",
        }
    }

    #[test]
    fn test_default_template() {
        let template = LineTemplate::default();
        assert_eq!(template.as_str(), DEFAULT_FORMAT);
        assert_eq!(
            template.render(&fields()),
            "2025-01-08T10:30:45 svc [info] hello"
        );
        assert!(template.uses_timestamp());
    }

    #[test]
    fn test_escaped_braces() {
        let template = LineTemplate::parse("{{{level}}} {message}").unwrap();
        assert_eq!(template.render(&fields()), "{info} hello");
        assert!(!template.uses_timestamp());
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = LineTemplate::parse("{message}/{message}").unwrap();
        assert_eq!(template.render(&fields()), "hello/hello");
    }

    #[test]
    fn test_message_braces_are_not_interpreted() {
        let template = LineTemplate::parse("{message}").unwrap();
        let mut f = fields();
        f.message = "{name}";
        assert_eq!(template.render(&f), "{name}");
    }

    #[test]
    fn test_invalid_templates() {
        for bad in ["{unknown}", "{message", "oops }", "{}"] {
            let err = LineTemplate::parse(bad).unwrap_err();
            assert!(
                matches!(err, WtermError::InvalidConfiguration { .. }),
                "{bad:?} -> {err}"
            );
        }
    }
}
