use crate::ansi::{StyleAttrs, paint};
use crate::formatter;
use crate::text::{display_width, is_numeric_like, single_line, truncate_to_width};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use termtable_data::CellValue;

pub type ValueFormatter = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;
pub type ValueColorizer = Arc<dyn Fn(&str) -> StyleAttrs + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    Center,
    #[default]
    Auto,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Alignment::Left),
            "right" | "r" => Ok(Alignment::Right),
            "center" | "centre" | "c" => Ok(Alignment::Center),
            "auto" => Ok(Alignment::Auto),
            _ => Err(format!("unknown alignment '{}'", s)),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Left => write!(f, "left"),
            Alignment::Right => write!(f, "right"),
            Alignment::Center => write!(f, "center"),
            Alignment::Auto => write!(f, "auto"),
        }
    }
}

/// How a cell wider than its column is shortened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncateMode {
    /// Never shorten; the row overflows instead.
    Off,
    #[default]
    Hard,
    /// Prefer cutting at a space when it keeps most of the content.
    #[serde(alias = "word_aware", alias = "word-aware")]
    Word,
}

/// Per-column layout and presentation settings.
#[derive(Clone)]
pub struct Column {
    pub name: String,
    /// Fixed width; overrides `min_width`/`max_width` during negotiation.
    pub width: Option<usize>,
    pub min_width: Option<usize>,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
    pub truncate: TruncateMode,
    pub ellipsis: String,
    pub formatter: Option<ValueFormatter>,
    pub colorizer: Option<ValueColorizer>,
    pub visible: bool,
    /// Shown in place of null/empty values.
    pub default_value: String,
    pub metadata: BTreeMap<String, String>,
    /// `TableFormatter` type applied by the builder before rendering.
    pub format_type: Option<String>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("alignment", &self.alignment)
            .field("truncate", &self.truncate)
            .field("ellipsis", &self.ellipsis)
            .field("formatter", &self.formatter.is_some())
            .field("colorizer", &self.colorizer.is_some())
            .field("visible", &self.visible)
            .field("default_value", &self.default_value)
            .field("metadata", &self.metadata)
            .field("format_type", &self.format_type)
            .finish()
    }
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: None,
            min_width: None,
            max_width: None,
            alignment: Alignment::Auto,
            truncate: TruncateMode::Hard,
            ellipsis: "...".to_string(),
            formatter: None,
            colorizer: None,
            visible: true,
            default_value: String::new(),
            metadata: BTreeMap::new(),
            format_type: None,
        }
    }

    pub fn left(name: impl Into<String>) -> Self {
        Self::new(name).align(Alignment::Left)
    }

    pub fn right(name: impl Into<String>) -> Self {
        Self::new(name).align(Alignment::Right)
    }

    pub fn center(name: impl Into<String>) -> Self {
        Self::new(name).align(Alignment::Center)
    }

    /// Right-aligned, thousands-grouped numbers.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::right(name).formatter(|value| formatter::format_number(value, 2))
    }

    /// Centered ISO dates.
    pub fn date(name: impl Into<String>) -> Self {
        Self::center(name).formatter(|value| formatter::format_date(value, "%Y-%m-%d"))
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn truncate(mut self, mode: TruncateMode) -> Self {
        self.truncate = mode;
        self
    }

    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    pub fn formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(f));
        self
    }

    pub fn colorizer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> StyleAttrs + Send + Sync + 'static,
    {
        self.colorizer = Some(Arc::new(f));
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn hidden(self) -> Self {
        self.visible(false)
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn format_type(mut self, type_name: impl Into<String>) -> Self {
        self.format_type = Some(type_name.into());
        self
    }

    /// Raw value to display text. Empty values become `default_value`;
    /// otherwise the column formatter runs, or the value is shown as-is.
    /// Line breaks are folded so the cell stays on one line.
    pub fn format_value(&self, raw: &CellValue) -> String {
        if raw.is_empty() {
            return self.default_value.clone();
        }
        let text = match &self.formatter {
            Some(format) => format(raw),
            None => raw.to_string(),
        };
        single_line(&text)
    }

    pub fn colorize_value(&self, text: &str) -> String {
        match &self.colorizer {
            Some(colorize) => paint(text, &colorize(text)),
            None => text.to_string(),
        }
    }

    pub fn truncate_text(&self, text: &str, width: usize) -> String {
        match self.truncate {
            TruncateMode::Off => text.to_string(),
            TruncateMode::Hard => truncate_to_width(text, width, &self.ellipsis, false),
            TruncateMode::Word => truncate_to_width(text, width, &self.ellipsis, true),
        }
    }

    /// `Auto` becomes `Right` for numeric-looking text, `Left` otherwise.
    pub fn resolve_alignment(&self, text: &str) -> Alignment {
        match self.alignment {
            Alignment::Auto if is_numeric_like(text) => Alignment::Right,
            Alignment::Auto => Alignment::Left,
            explicit => explicit,
        }
    }

    pub fn align_text(&self, text: &str, width: usize) -> String {
        pad(text, width, self.resolve_alignment(text))
    }

    /// Widest of the header and `values`, clamped to the column's own bounds.
    pub fn calculate_ideal_width<S: AsRef<str>>(&self, values: &[S]) -> usize {
        let content = values
            .iter()
            .map(|v| display_width(v.as_ref()))
            .fold(display_width(&self.name), usize::max);

        let mut width = content;
        if let Some(min) = self.min_width {
            width = width.max(min);
        }
        if let Some(max) = self.max_width {
            width = width.min(max);
        }
        width
    }
}

/// Pad `text` to `width` cells; text already at or over `width` is returned
/// unchanged. `Center` puts the odd cell on the right.
pub fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let current = display_width(text);
    if current >= width {
        return text.to_string();
    }
    let gap = width - current;
    match alignment {
        Alignment::Right => format!("{}{}", " ".repeat(gap), text),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
        Alignment::Left | Alignment::Auto => format!("{}{}", text, " ".repeat(gap)),
    }
}
