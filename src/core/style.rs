//! ANSI style rendering and stripping
//!
//! A [`Style`] is a set of optional attributes. Rendering emits one SGR escape
//! sequence per attribute that is set, in the fixed order foreground,
//! background, bold, dim, underline, blink, reverse, followed by the text and
//! (unless disabled) a single reset-all sequence.

use super::error::{Result, WtermError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Sequence that resets every attribute.
pub const RESET_ALL: &str = "\x1b[0m";

/// `ESC '[' {digits|';'|'?'}* ALPHA`
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[;?0-9]*[a-zA-Z]").expect("escape pattern is valid"));

/// The 16-entry named palette: 8 base colors and their bright variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
        NamedColor::BrightBlack,
        NamedColor::BrightRed,
        NamedColor::BrightGreen,
        NamedColor::BrightYellow,
        NamedColor::BrightBlue,
        NamedColor::BrightMagenta,
        NamedColor::BrightCyan,
        NamedColor::BrightWhite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::White => "white",
            NamedColor::BrightBlack => "bright_black",
            NamedColor::BrightRed => "bright_red",
            NamedColor::BrightGreen => "bright_green",
            NamedColor::BrightYellow => "bright_yellow",
            NamedColor::BrightBlue => "bright_blue",
            NamedColor::BrightMagenta => "bright_magenta",
            NamedColor::BrightCyan => "bright_cyan",
            NamedColor::BrightWhite => "bright_white",
        }
    }

    /// Foreground SGR code: 30-37 for base colors, 90-97 for bright ones.
    pub fn code(&self) -> u8 {
        let index = *self as u8;
        if index < 8 {
            30 + index
        } else {
            90 + (index - 8)
        }
    }

    /// Render `text` with this color as foreground.
    ///
    /// ```
    /// use wterm::NamedColor;
    ///
    /// assert_eq!(NamedColor::Red.paint("oops"), "\x1b[31moops\x1b[0m");
    /// ```
    pub fn paint(self, text: &str) -> String {
        render(text, &Style::new().fg(self))
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedColor {
    type Err = WtermError;

    fn from_str(s: &str) -> Result<Self> {
        NamedColor::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| WtermError::unknown_color(s))
    }
}

/// One color representation: a palette name, an 8-bit index or a 24-bit triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Named(NamedColor),
    Indexed(u8),
    Rgb(u8, u8, u8),
    /// Terminal default color (39 / 49).
    Default,
}

impl Color {
    /// SGR parameters for this color, as foreground or background.
    pub fn sgr(&self, background: bool) -> String {
        let offset: u8 = if background { 10 } else { 0 };
        match *self {
            Color::Named(named) => (named.code() + offset).to_string(),
            Color::Default => (39 + offset).to_string(),
            Color::Indexed(index) => format!("{};5;{}", 38 + offset, index),
            Color::Rgb(r, g, b) => format!("{};2;{};{};{}", 38 + offset, r, g, b),
        }
    }
}

impl From<NamedColor> for Color {
    fn from(color: NamedColor) -> Self {
        Color::Named(color)
    }
}

impl From<u8> for Color {
    fn from(index: u8) -> Self {
        Color::Indexed(index)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

fn parse_component(part: &str, spec: &str) -> Result<u8> {
    part.trim()
        .parse::<u8>()
        .map_err(|_| WtermError::format(format!("invalid color component in {spec:?}")))
}

/// Accepts palette names, `reset`/`default`, a decimal index (`"208"`),
/// `"r,g,b"` and `"#rrggbb"`.
impl FromStr for Color {
    type Err = WtermError;

    fn from_str(s: &str) -> Result<Self> {
        let spec = s.trim();

        if spec == "reset" || spec == "default" {
            return Ok(Color::Default);
        }

        if !spec.is_empty() && spec.bytes().all(|b| b.is_ascii_digit()) {
            return spec
                .parse::<u8>()
                .map(Color::Indexed)
                .map_err(|_| WtermError::format(format!("color index out of range: {spec}")));
        }

        if spec.contains(',') {
            let parts: Vec<&str> = spec.split(',').collect();
            let [r, g, b] = parts.as_slice() else {
                return Err(WtermError::format(format!(
                    "expected three RGB components, got {spec:?}"
                )));
            };
            return Ok(Color::Rgb(
                parse_component(r, spec)?,
                parse_component(g, spec)?,
                parse_component(b, spec)?,
            ));
        }

        if let Some(hex) = spec.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&hex[range], 16)
                        .map_err(|_| WtermError::format(format!("invalid hex color {spec:?}")))
                };
                return Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
            }
            return Err(WtermError::format(format!("invalid hex color {spec:?}")));
        }

        spec.parse::<NamedColor>().map(Color::Named)
    }
}

/// A style request. `None` leaves an attribute untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub underline: Option<bool>,
    pub blink: Option<bool>,
    pub reverse: Option<bool>,
    /// Append the reset-all sequence after the text.
    pub reset: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: None,
            dim: None,
            underline: None,
            blink: None,
            reverse: None,
            reset: true,
        }
    }
}

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fg(mut self, color: impl Into<Color>) -> Self {
        self.fg = Some(color.into());
        self
    }

    #[must_use]
    pub fn bg(mut self, color: impl Into<Color>) -> Self {
        self.bg = Some(color.into());
        self
    }

    /// Set the foreground from a textual color spec.
    pub fn try_fg(self, spec: &str) -> Result<Self> {
        Ok(self.fg(spec.parse::<Color>()?))
    }

    /// Set the background from a textual color spec.
    pub fn try_bg(self, spec: &str) -> Result<Self> {
        Ok(self.bg(spec.parse::<Color>()?))
    }

    #[must_use]
    pub fn bold(mut self, on: bool) -> Self {
        self.bold = Some(on);
        self
    }

    #[must_use]
    pub fn dim(mut self, on: bool) -> Self {
        self.dim = Some(on);
        self
    }

    #[must_use]
    pub fn underline(mut self, on: bool) -> Self {
        self.underline = Some(on);
        self
    }

    #[must_use]
    pub fn blink(mut self, on: bool) -> Self {
        self.blink = Some(on);
        self
    }

    #[must_use]
    pub fn reverse(mut self, on: bool) -> Self {
        self.reverse = Some(on);
        self
    }

    #[must_use]
    pub fn reset(mut self, on: bool) -> Self {
        self.reset = on;
        self
    }

    /// SGR parameter of every attribute that is set, in emission order.
    fn codes(&self) -> Vec<String> {
        let toggles = [
            (self.bold, 1, 22),
            (self.dim, 2, 22),
            (self.underline, 4, 24),
            (self.blink, 5, 25),
            (self.reverse, 7, 27),
        ];

        let mut codes = Vec::with_capacity(7);
        if let Some(color) = self.fg {
            codes.push(color.sgr(false));
        }
        if let Some(color) = self.bg {
            codes.push(color.sgr(true));
        }
        for (value, on, off) in toggles {
            if let Some(enabled) = value {
                let code = if enabled { on } else { off };
                codes.push(code.to_string());
            }
        }
        codes
    }

    /// Shorthand for [`render`].
    pub fn apply(&self, text: &str) -> String {
        render(text, self)
    }
}

/// Wrap `text` in the escape sequences requested by `style`.
pub fn render(text: &str, style: &Style) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    for code in style.codes() {
        out.push_str("\x1b[");
        out.push_str(&code);
        out.push('m');
    }
    out.push_str(text);
    if style.reset {
        out.push_str(RESET_ALL);
    }
    out
}

/// Remove every escape sequence from `text`.
///
/// Removal repeats until no sequence is left, since deleting one sequence can
/// join its neighbours into a new one.
/// Unlike a single pass, this also drops text that only becomes a sequence
/// after an inner one is removed: `"a\x1b[\x1b[31mmb"` strips to `"ab"`.
pub fn strip(text: &str) -> String {
    let mut out = ANSI_ESCAPE.replace_all(text, "").into_owned();
    while ANSI_ESCAPE.is_match(&out) {
        out = ANSI_ESCAPE.replace_all(&out, "").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_codes() {
        assert_eq!(NamedColor::Black.code(), 30);
        assert_eq!(NamedColor::White.code(), 37);
        assert_eq!(NamedColor::BrightBlack.code(), 90);
        assert_eq!(NamedColor::BrightWhite.code(), 97);
        assert_eq!(Color::Named(NamedColor::Blue).sgr(true), "44");
        assert_eq!(Color::Named(NamedColor::BrightBlue).sgr(true), "104");
        assert_eq!(Color::Default.sgr(false), "39");
        assert_eq!(Color::Default.sgr(true), "49");
    }

    #[test]
    fn test_render_order() {
        let style = Style::new()
            .reverse(true)
            .bold(true)
            .bg(NamedColor::Blue)
            .fg(NamedColor::Red)
            .underline(false);
        assert_eq!(
            render("hi", &style),
            "\x1b[31m\x1b[44m\x1b[1m\x1b[24m\x1b[7mhi\x1b[0m"
        );
    }

    #[test]
    fn test_render_extended_colors() {
        assert_eq!(
            render("x", &Style::new().fg(208u8).reset(false)),
            "\x1b[38;5;208mx"
        );
        assert_eq!(
            render("x", &Style::new().bg((1, 2, 3))),
            "\x1b[48;2;1;2;3mx\x1b[0m"
        );
        // Index zero is a real color, not "unset".
        assert_eq!(render("x", &Style::new().fg(0u8)), "\x1b[38;5;0mx\x1b[0m");
    }

    #[test]
    fn test_boolean_off_codes() {
        let style = Style::new()
            .bold(false)
            .dim(false)
            .underline(false)
            .blink(false)
            .reverse(false);
        assert_eq!(
            render("", &style),
            "\x1b[22m\x1b[22m\x1b[24m\x1b[25m\x1b[27m\x1b[0m"
        );
    }

    #[test]
    fn test_empty_style_only_resets() {
        assert_eq!(render("plain", &Style::new()), "plain\x1b[0m");
        assert_eq!(render("plain", &Style::new().reset(false)), "plain");
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::Named(NamedColor::Red));
        assert_eq!(
            "bright_cyan".parse::<Color>().unwrap(),
            Color::Named(NamedColor::BrightCyan)
        );
        assert_eq!("reset".parse::<Color>().unwrap(), Color::Default);
        assert_eq!("208".parse::<Color>().unwrap(), Color::Indexed(208));
        assert_eq!("10, 20, 30".parse::<Color>().unwrap(), Color::Rgb(10, 20, 30));
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::Rgb(255, 128, 0));
    }

    #[test]
    fn test_parse_rejects_bad_colors() {
        for bad in ["chartreuse", "256", "1,2", "1,2,300", "#12345", "#gggggg", ""] {
            let err = bad.parse::<Color>().unwrap_err();
            assert!(matches!(err, WtermError::Format { .. }), "{bad:?} -> {err}");
        }
    }

    #[test]
    fn test_try_fg_unknown_color() {
        let err = Style::new().try_fg("chartreuse").unwrap_err();
        assert!(err.to_string().contains("chartreuse"));
        assert!(Style::new().try_bg("bright_red").is_ok());
    }

    #[test]
    fn test_strip_nested_sequence_fully_removed() {
        assert_eq!(strip("a\x1b[\x1b[31mmb"), "ab");
    }

    #[test]
    fn test_strip() {
        let styled = "\x1b[31m\x1b[1mred\x1b[0m and \x1b[38;2;1;2;3mrgb\x1b[?25h";
        assert_eq!(strip(styled), "red and rgb");
        assert_eq!(strip("no escapes [31m here"), "no escapes [31m here");
        assert_eq!(strip("\x1b[31"), "\x1b[31");
    }

    #[test]
    fn test_strip_nested_sequence() {
        let tricky = "a\x1b[\x1b[31mmb";
        assert_eq!(strip(tricky), "ab");
        assert_eq!(strip(&strip(tricky)), strip(tricky));
    }

    #[test]
    fn test_paint() {
        assert_eq!(NamedColor::Green.paint("ok"), "\x1b[32mok\x1b[0m");
        assert_eq!(strip(&NamedColor::Green.paint("ok")), "ok");
    }

    #[test]
    fn test_style_serialization() {
        let style = Style::new().fg(NamedColor::BrightRed).bold(true);
        let json = serde_json::to_string(&style).expect("serialize");
        assert!(json.contains("bright_red"));
        let back: Style = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, style);

        let partial: Style = serde_json::from_str("{}").expect("deserialize empty");
        assert!(partial.reset);
    }
}
