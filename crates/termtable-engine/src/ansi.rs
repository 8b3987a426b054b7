use crate::error::{Error, Result};
use owo_colors::{AnsiColors, DynColors, Style};
use serde_json::Value;

pub const RESET: &str = "\x1b[0m";

/// Color and text attributes for one piece of styled text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleAttrs {
    pub color: Option<DynColors>,
    pub background: Option<DynColors>,
    pub bold: bool,
    pub underline: bool,
    pub italic: bool,
    pub dim: bool,
}

impl StyleAttrs {
    pub const fn new() -> Self {
        Self {
            color: None,
            background: None,
            bold: false,
            underline: false,
            italic: false,
            dim: false,
        }
    }

    pub fn fg(color: AnsiColors) -> Self {
        Self::new().color(DynColors::Ansi(color))
    }

    pub fn color(mut self, color: DynColors) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background(mut self, color: DynColors) -> Self {
        self.background = Some(color);
        self
    }

    pub fn on(self, color: AnsiColors) -> Self {
        self.background(DynColors::Ansi(color))
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::new()
    }

    fn to_style(self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style = style.color(color);
        }
        if let Some(background) = self.background {
            style = style.on_color(background);
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dimmed();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underline();
        }
        style
    }

    /// Read attributes from `{"color": "green", "bold": true, ...}` or a bare
    /// color string such as `"red"`.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Self::new().color(parse_color_or_err(name)?)),
            Value::Object(map) => {
                let mut attrs = Self::new();
                for (key, v) in map {
                    match key.as_str() {
                        "color" | "fg" | "foreground" => {
                            attrs.color = optional_color(v)?;
                        }
                        "background" | "bg" => {
                            attrs.background = optional_color(v)?;
                        }
                        "bold" => attrs.bold = v.as_bool().unwrap_or(false),
                        "underline" => attrs.underline = v.as_bool().unwrap_or(false),
                        "italic" => attrs.italic = v.as_bool().unwrap_or(false),
                        "dim" => attrs.dim = v.as_bool().unwrap_or(false),
                        _ => {}
                    }
                }
                Ok(attrs)
            }
            Value::Null => Ok(Self::new()),
            other => Err(Error::Config(format!(
                "style attributes must be a color name or an object, got {}",
                other
            ))),
        }
    }
}

fn optional_color(value: &Value) -> Result<Option<DynColors>> {
    match value {
        Value::Null => Ok(None),
        Value::String(name) => parse_color_or_err(name).map(Some),
        other => Err(Error::Config(format!("invalid color value: {}", other))),
    }
}

fn parse_color_or_err(name: &str) -> Result<DynColors> {
    parse_color(name).ok_or_else(|| Error::Config(format!("unknown color '{}'", name)))
}

/// Resolve one of the 16 ANSI color names (`bright_blue`, `gray`, ...) or a
/// `#rrggbb` hex string.
pub fn parse_color(name: &str) -> Option<DynColors> {
    let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");

    if let Some(hex) = normalized.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(DynColors::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let color = match normalized.as_str() {
        "black" => AnsiColors::Black,
        "red" => AnsiColors::Red,
        "green" => AnsiColors::Green,
        "yellow" => AnsiColors::Yellow,
        "blue" => AnsiColors::Blue,
        "magenta" | "purple" => AnsiColors::Magenta,
        "cyan" => AnsiColors::Cyan,
        "white" => AnsiColors::White,
        "default" => AnsiColors::Default,
        "bright_black" | "gray" | "grey" => AnsiColors::BrightBlack,
        "bright_red" => AnsiColors::BrightRed,
        "bright_green" => AnsiColors::BrightGreen,
        "bright_yellow" => AnsiColors::BrightYellow,
        "bright_blue" => AnsiColors::BrightBlue,
        "bright_magenta" => AnsiColors::BrightMagenta,
        "bright_cyan" => AnsiColors::BrightCyan,
        "bright_white" => AnsiColors::BrightWhite,
        _ => return None,
    };
    Some(DynColors::Ansi(color))
}

/// Wrap `text` in the escape codes for `attrs`, terminated by a reset.
/// Plain attributes return the text unchanged.
pub fn paint(text: &str, attrs: &StyleAttrs) -> String {
    if attrs.is_plain() {
        return text.to_string();
    }
    let styled = attrs.to_style().style(text).to_string();
    if styled.ends_with(RESET) {
        styled
    } else {
        format!("{}{}", styled, RESET)
    }
}
