//! Writer configuration and per-call overrides

use super::style::Style;
use std::fmt;
use std::sync::Arc;

/// Line prefix: fixed text or a function evaluated on every write.
#[derive(Clone)]
pub enum Prefix {
    Static(String),
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Prefix {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Prefix::Computed(Arc::new(f))
    }

    /// The prefix text, or `None` when it resolves to an empty string.
    pub fn resolve(&self) -> Option<String> {
        let text = match self {
            Prefix::Static(text) => text.clone(),
            Prefix::Computed(f) => f(),
        };
        (!text.is_empty()).then_some(text)
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Prefix::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Prefix {
    fn from(text: &str) -> Self {
        Prefix::Static(text.to_string())
    }
}

impl From<String> for Prefix {
    fn from(text: String) -> Self {
        Prefix::Static(text)
    }
}

/// Tags put in front of messages by the writer's leveled methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPrefixes {
    pub debug: Option<String>,
    pub info: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl LevelPrefixes {
    pub fn none() -> Self {
        Self {
            debug: None,
            info: None,
            warning: None,
            error: None,
        }
    }
}

impl Default for LevelPrefixes {
    fn default() -> Self {
        Self {
            debug: None,
            info: None,
            warning: Some("[warning]".to_string()),
            error: Some("[error]".to_string()),
        }
    }
}

/// Immutable writer settings. `with_*` methods return a modified copy.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Emit when the sink is an interactive terminal.
    pub tty: bool,
    /// Emit when the sink is not an interactive terminal.
    pub notty: bool,
    pub colors_enabled: bool,
    pub endl: String,
    pub prefix: Option<Prefix>,
    pub level_prefixes: LevelPrefixes,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            tty: true,
            notty: true,
            colors_enabled: true,
            endl: "\n".to_string(),
            prefix: None,
            level_prefixes: LevelPrefixes::default(),
        }
    }
}

impl WriterConfig {
    #[must_use]
    pub fn with_tty(mut self, tty: bool) -> Self {
        self.tty = tty;
        self
    }

    #[must_use]
    pub fn with_notty(mut self, notty: bool) -> Self {
        self.notty = notty;
        self
    }

    #[must_use]
    pub fn with_colors_enabled(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_endl(mut self, endl: impl Into<String>) -> Self {
        self.endl = endl.into();
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn without_prefix(mut self) -> Self {
        self.prefix = None;
        self
    }

    #[must_use]
    pub fn with_level_prefixes(mut self, prefixes: LevelPrefixes) -> Self {
        self.level_prefixes = prefixes;
        self
    }

    /// A copy with the per-call `options` applied.
    #[must_use]
    pub fn overridden(&self, options: &WriteOptions) -> Self {
        let mut config = self.clone();
        if let Some(tty) = options.tty {
            config.tty = tty;
        }
        if let Some(notty) = options.notty {
            config.notty = notty;
        }
        if let Some(enabled) = options.colors_enabled {
            config.colors_enabled = enabled;
        }
        if let Some(ref endl) = options.endl {
            config.endl.clone_from(endl);
        }
        if options.prefix == Some(false) {
            config.prefix = None;
        }
        config
    }

    /// Gate decision for a sink with the given terminal-ness.
    pub fn should_emit(&self, terminal: bool) -> bool {
        (terminal && self.tty) || (!terminal && self.notty)
    }
}

/// Transient overrides for a single write. Unset fields keep the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub tty: Option<bool>,
    pub notty: Option<bool>,
    pub colors_enabled: Option<bool>,
    pub endl: Option<String>,
    /// `Some(false)` suppresses the configured prefix.
    pub prefix: Option<bool>,
    pub style: Option<Style>,
}

impl WriteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tty(mut self, tty: bool) -> Self {
        self.tty = Some(tty);
        self
    }

    #[must_use]
    pub fn notty(mut self, notty: bool) -> Self {
        self.notty = Some(notty);
        self
    }

    #[must_use]
    pub fn colors_enabled(mut self, enabled: bool) -> Self {
        self.colors_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn endl(mut self, endl: impl Into<String>) -> Self {
        self.endl = Some(endl.into());
        self
    }

    #[must_use]
    pub fn prefix(mut self, show: bool) -> Self {
        self.prefix = Some(show);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}
