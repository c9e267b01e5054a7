//! Severity levels and the level registry

use super::error::{Result, WtermError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Which of a writer's two sinks a line goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stream {
    /// Normal output (stdout by default)
    #[default]
    Primary,
    /// Warning and error output (stderr by default)
    Secondary,
}

/// A named severity with an ordinal.
///
/// Levels order by ordinal. They can also be compared directly against a raw
/// ordinal, and tested for equality against a name.
///
/// ```
/// use wterm::{Level, DEBUG, INFO};
///
/// assert!(DEBUG < INFO);
/// assert!(INFO == 1u32);
/// assert!(INFO == "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    name: Cow<'static, str>,
    ordinal: u32,
    stream: Stream,
}

pub const DEBUG: Level = Level::new_static("debug", 0, Stream::Primary);
pub const INFO: Level = Level::new_static("info", 1, Stream::Primary);
pub const WARNING: Level = Level::new_static("warning", 2, Stream::Secondary);
pub const ERROR: Level = Level::new_static("error", 3, Stream::Secondary);

impl Level {
    /// A level routed to the primary stream.
    pub fn new(name: impl Into<Cow<'static, str>>, ordinal: u32) -> Self {
        Self {
            name: name.into(),
            ordinal,
            stream: Stream::Primary,
        }
    }

    pub const fn new_static(name: &'static str, ordinal: u32, stream: Stream) -> Self {
        Self {
            name: Cow::Borrowed(name),
            ordinal,
            stream,
        }
    }

    #[must_use]
    pub fn with_stream(mut self, stream: Stream) -> Self {
        self.stream = stream;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// The stream this level is routed to unless a logger overrides it.
    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal.cmp(&other.ordinal)
    }
}

impl PartialEq<u32> for Level {
    fn eq(&self, other: &u32) -> bool {
        self.ordinal == *other
    }
}

impl PartialOrd<u32> for Level {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        Some(self.ordinal.cmp(other))
    }
}

impl PartialEq<str> for Level {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for Level {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

/// Anything a level can be compared against.
#[derive(Debug, Clone, Copy)]
pub enum LevelOperand<'a> {
    Level(&'a Level),
    Ordinal(u32),
    Name(&'a str),
}

impl<'a> From<&'a Level> for LevelOperand<'a> {
    fn from(level: &'a Level) -> Self {
        LevelOperand::Level(level)
    }
}

impl From<u32> for LevelOperand<'_> {
    fn from(ordinal: u32) -> Self {
        LevelOperand::Ordinal(ordinal)
    }
}

impl<'a> From<&'a str> for LevelOperand<'a> {
    fn from(name: &'a str) -> Self {
        LevelOperand::Name(name)
    }
}

/// Name to level table.
///
/// Built once at startup and shared by reference. Registering a name twice
/// is an error.
#[derive(Debug, Clone, Default)]
pub struct LevelRegistry {
    levels: HashMap<String, Level>,
}

impl LevelRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `debug`, `info`, `warning` and `error`.
    pub fn standard() -> Self {
        let mut levels = HashMap::new();
        for level in [DEBUG, INFO, WARNING, ERROR] {
            levels.insert(level.name().to_string(), level);
        }
        Self { levels }
    }

    /// Add a level. Names must be non-empty and unique.
    pub fn register(&mut self, level: Level) -> Result<()> {
        if level.name().is_empty() {
            return Err(WtermError::config(
                "LevelRegistry",
                "level name must not be empty",
            ));
        }
        if self.levels.contains_key(level.name()) {
            return Err(WtermError::duplicate_level(level.name()));
        }
        self.levels.insert(level.name().to_string(), level);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_level(mut self, level: Level) -> Result<Self> {
        self.register(level)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Level> {
        self.levels.get(name)
    }

    pub fn resolve(&self, name: &str) -> Result<&Level> {
        self.get(name).ok_or_else(|| WtermError::unknown_level(name))
    }

    /// Registered levels in ordinal order.
    pub fn levels(&self) -> Vec<&Level> {
        let mut levels: Vec<&Level> = self.levels.values().collect();
        levels.sort_by_key(|level| level.ordinal());
        levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Order `level` against another level, an ordinal, or a registered name.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use wterm::{LevelRegistry, INFO};
    ///
    /// let registry = LevelRegistry::standard();
    /// assert_eq!(registry.compare(&INFO, "warning").unwrap(), Ordering::Less);
    /// assert!(registry.compare(&INFO, "verbose").is_err());
    /// ```
    pub fn compare<'a>(
        &self,
        level: &Level,
        other: impl Into<LevelOperand<'a>>,
    ) -> Result<Ordering> {
        let ordinal = match other.into() {
            LevelOperand::Level(other) => other.ordinal(),
            LevelOperand::Ordinal(ordinal) => ordinal,
            LevelOperand::Name(name) => self.resolve(name)?.ordinal(),
        };
        Ok(level.ordinal().cmp(&ordinal))
    }

    /// Equality test; names compare by name and need not be registered.
    pub fn equals<'a>(&self, level: &Level, other: impl Into<LevelOperand<'a>>) -> bool {
        match other.into() {
            LevelOperand::Level(other) => level == other,
            LevelOperand::Ordinal(ordinal) => *level == ordinal,
            LevelOperand::Name(name) => level.name() == name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ordering() {
        assert!(DEBUG < INFO);
        assert!(INFO < WARNING);
        assert!(WARNING < ERROR);
        assert!(ERROR >= WARNING);
        assert_eq!(INFO.clone(), INFO);
    }

    #[test]
    fn test_compare_with_ordinal() {
        assert!(WARNING == 2u32);
        assert!(WARNING > 1u32);
        assert!(DEBUG < 1u32);
    }

    #[test]
    fn test_equality_with_name() {
        assert!(ERROR == "error");
        assert!(ERROR != "warning");
        assert!(INFO == *"info");
    }

    #[test]
    fn test_default_streams() {
        assert_eq!(DEBUG.stream(), Stream::Primary);
        assert_eq!(INFO.stream(), Stream::Primary);
        assert_eq!(WARNING.stream(), Stream::Secondary);
        assert_eq!(ERROR.stream(), Stream::Secondary);
    }

    #[test]
    fn test_registry_compare_by_name() {
        let registry = LevelRegistry::standard();
        assert_eq!(registry.compare(&ERROR, "debug").unwrap(), Ordering::Greater);
        assert_eq!(registry.compare(&INFO, "info").unwrap(), Ordering::Equal);
        assert_eq!(registry.compare(&INFO, 3u32).unwrap(), Ordering::Less);
        assert_eq!(registry.compare(&INFO, &DEBUG).unwrap(), Ordering::Greater);

        let err = registry.compare(&INFO, "verbose").unwrap_err();
        assert!(matches!(err, WtermError::UnknownLevel { .. }));
    }

    #[test]
    fn test_registry_equals() {
        let registry = LevelRegistry::standard();
        assert!(registry.equals(&INFO, "info"));
        assert!(registry.equals(&INFO, 1u32));
        assert!(registry.equals(&INFO, &INFO));
        assert!(!registry.equals(&INFO, "unregistered"));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = LevelRegistry::standard();
        let err = registry.register(Level::new("info", 7)).unwrap_err();
        assert!(matches!(err, WtermError::DuplicateLevel { .. }));
        assert_eq!(registry.resolve("info").unwrap().ordinal(), 1);
    }

    #[test]
    fn test_registry_rejects_empty_name() {
        let err = LevelRegistry::standard()
            .with_level(Level::new("", 7))
            .unwrap_err();
        assert!(matches!(err, WtermError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_registry_custom_level() {
        let registry = LevelRegistry::standard()
            .with_level(Level::new("critical", 4).with_stream(Stream::Secondary))
            .unwrap();
        assert_eq!(registry.len(), 5);
        let names: Vec<&str> = registry.levels().iter().map(|l| l.name()).collect();
        assert_eq!(names, ["debug", "info", "warning", "error", "critical"]);
        assert_eq!(
            registry.compare(&ERROR, "critical").unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_level_serialization() {
        let json = serde_json::to_string(&WARNING).expect("serialize");
        assert_eq!(json, r#"{"name":"warning","ordinal":2,"stream":"Secondary"}"#);
        let back: Level = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, WARNING);
        assert_eq!(back.name(), "warning");
    }
}
