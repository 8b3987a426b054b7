use crate::ansi::{StyleAttrs, paint};
use crate::error::{Error, Result};
use crate::text::strip_ansi;
use owo_colors::AnsiColors;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type HeaderStyler = Arc<dyn Fn(&str) -> String + Send + Sync>;
pub type CellStyler = Arc<dyn Fn(&str, usize, usize) -> String + Send + Sync>;

/// Color policy layered onto an already laid-out table.
///
/// Cell precedence, highest first: custom styler, status keyword,
/// alternating row color, flat cell color.
#[derive(Clone)]
pub struct TableTheme {
    pub name: String,
    pub header_colors: StyleAttrs,
    pub cell_colors: StyleAttrs,
    pub alternating_row_colors: Vec<StyleAttrs>,
    pub use_alternating_rows: bool,
    /// Keyword and color, in configuration order.
    pub status_colors: Vec<(String, StyleAttrs)>,
    pub header_styler: Option<HeaderStyler>,
    pub cell_styler: Option<CellStyler>,
}

impl fmt::Debug for TableTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableTheme")
            .field("name", &self.name)
            .field("header_colors", &self.header_colors)
            .field("cell_colors", &self.cell_colors)
            .field("alternating_row_colors", &self.alternating_row_colors)
            .field("use_alternating_rows", &self.use_alternating_rows)
            .field("status_colors", &self.status_colors)
            .field("header_styler", &self.header_styler.is_some())
            .field("cell_styler", &self.cell_styler.is_some())
            .finish()
    }
}

impl Default for TableTheme {
    fn default() -> Self {
        Self::standard()
    }
}

fn default_status_colors() -> Vec<(String, StyleAttrs)> {
    let green = StyleAttrs::fg(AnsiColors::Green);
    let gray = StyleAttrs::fg(AnsiColors::BrightBlack);
    let red = StyleAttrs::fg(AnsiColors::Red);
    let yellow = StyleAttrs::fg(AnsiColors::Yellow);
    [
        ("active", green),
        ("success", green),
        ("enabled", green),
        ("online", green),
        ("completed", green),
        ("inactive", gray),
        ("disabled", gray),
        ("offline", gray),
        ("error", red),
        ("failed", red),
        ("pending", yellow),
        ("warning", yellow),
    ]
    .into_iter()
    .map(|(keyword, attrs)| (keyword.to_string(), attrs))
    .collect()
}

impl TableTheme {
    pub const PRESETS: [&'static str; 6] =
        ["default", "dark", "light", "colorful", "minimal", "ocean"];

    fn base(name: &str) -> Self {
        Self {
            name: name.to_string(),
            header_colors: StyleAttrs::new(),
            cell_colors: StyleAttrs::new(),
            alternating_row_colors: Vec::new(),
            use_alternating_rows: false,
            status_colors: default_status_colors(),
            header_styler: None,
            cell_styler: None,
        }
    }

    pub fn standard() -> Self {
        Self {
            header_colors: StyleAttrs::fg(AnsiColors::Cyan).bold(),
            ..Self::base("default")
        }
    }

    pub fn dark() -> Self {
        Self {
            header_colors: StyleAttrs::fg(AnsiColors::BrightWhite).bold(),
            cell_colors: StyleAttrs::fg(AnsiColors::White),
            alternating_row_colors: vec![
                StyleAttrs::fg(AnsiColors::White),
                StyleAttrs::fg(AnsiColors::BrightBlack),
            ],
            use_alternating_rows: true,
            ..Self::base("dark")
        }
    }

    pub fn light() -> Self {
        Self {
            header_colors: StyleAttrs::fg(AnsiColors::Blue).bold(),
            cell_colors: StyleAttrs::fg(AnsiColors::Black),
            ..Self::base("light")
        }
    }

    pub fn colorful() -> Self {
        Self {
            header_colors: StyleAttrs::fg(AnsiColors::Magenta).bold().underline(),
            alternating_row_colors: vec![
                StyleAttrs::fg(AnsiColors::Cyan),
                StyleAttrs::fg(AnsiColors::Yellow),
            ],
            use_alternating_rows: true,
            ..Self::base("colorful")
        }
    }

    /// No colors at all, status keywords included.
    pub fn minimal() -> Self {
        Self {
            status_colors: Vec::new(),
            ..Self::base("minimal")
        }
    }

    pub fn ocean() -> Self {
        Self {
            header_colors: StyleAttrs::fg(AnsiColors::BrightWhite)
                .on(AnsiColors::Blue)
                .bold(),
            cell_colors: StyleAttrs::fg(AnsiColors::Cyan),
            alternating_row_colors: vec![
                StyleAttrs::fg(AnsiColors::Cyan),
                StyleAttrs::fg(AnsiColors::BrightBlue),
            ],
            use_alternating_rows: true,
            ..Self::base("ocean")
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &Self::PRESETS
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let theme = match name.trim().to_lowercase().as_str() {
            "default" | "standard" => Self::standard(),
            "dark" => Self::dark(),
            "light" => Self::light(),
            "colorful" | "colourful" => Self::colorful(),
            "minimal" | "none" | "plain" => Self::minimal(),
            "ocean" => Self::ocean(),
            _ => return None,
        };
        Some(theme)
    }

    pub fn with_header_styler<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.header_styler = Some(Arc::new(f));
        self
    }

    pub fn with_cell_styler<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, usize, usize) -> String + Send + Sync + 'static,
    {
        self.cell_styler = Some(Arc::new(f));
        self
    }

    /// Add a keyword color, replacing an existing entry for the same keyword.
    pub fn with_status_color(mut self, keyword: impl Into<String>, attrs: StyleAttrs) -> Self {
        set_status_color(&mut self.status_colors, keyword.into(), attrs);
        self
    }

    /// Update fields from a JSON-style map. Keys may be camelCase
    /// (`headerColors`) or snake_case (`header_colors`); unknown keys are
    /// ignored. `statusColors` entries are merged into the existing list.
    pub fn configure(mut self, options: &Value) -> Result<Self> {
        let Value::Object(map) = options else {
            return Err(Error::Config(format!(
                "theme options must be a table, got {}",
                options
            )));
        };

        for (key, value) in map {
            match snake_case(key).as_str() {
                "header_colors" => self.header_colors = StyleAttrs::from_json(value)?,
                "cell_colors" => self.cell_colors = StyleAttrs::from_json(value)?,
                "alternating_row_colors" => {
                    let Value::Array(items) = value else {
                        return Err(Error::Config(
                            "alternating_row_colors must be a list".to_string(),
                        ));
                    };
                    self.alternating_row_colors = items
                        .iter()
                        .map(StyleAttrs::from_json)
                        .collect::<Result<_>>()?;
                }
                "use_alternating_rows" => {
                    self.use_alternating_rows = value.as_bool().ok_or_else(|| {
                        Error::Config("use_alternating_rows must be a boolean".to_string())
                    })?;
                }
                "status_colors" => {
                    let Value::Object(entries) = value else {
                        return Err(Error::Config(
                            "status_colors must map keywords to colors".to_string(),
                        ));
                    };
                    for (keyword, attrs) in entries {
                        let attrs = StyleAttrs::from_json(attrs)?;
                        set_status_color(&mut self.status_colors, keyword.clone(), attrs);
                    }
                }
                "name" => {
                    if let Some(name) = value.as_str() {
                        self.name = name.to_string();
                    }
                }
                _ => {}
            }
        }
        Ok(self)
    }

    /// Longest configured keyword contained in `text`, case-insensitively.
    /// Equal lengths resolve to the earlier entry.
    pub fn status_match(&self, text: &str) -> Option<&StyleAttrs> {
        if self.status_colors.is_empty() {
            return None;
        }
        let haystack = strip_ansi(text).to_lowercase();
        let mut best: Option<&(String, StyleAttrs)> = None;
        for entry in &self.status_colors {
            let keyword = entry.0.to_lowercase();
            if keyword.is_empty() || !haystack.contains(&keyword) {
                continue;
            }
            if best.is_none_or(|b| keyword.len() > b.0.len()) {
                best = Some(entry);
            }
        }
        best.map(|(_, attrs)| attrs)
    }

    pub fn apply_header_style(&self, text: &str) -> String {
        match &self.header_styler {
            Some(styler) => styler(text),
            None => paint(text, &self.header_colors),
        }
    }

    pub fn apply_cell_style(&self, text: &str, row: usize, col: usize) -> String {
        if let Some(styler) = &self.cell_styler {
            return styler(text, row, col);
        }

        let attrs = self
            .status_match(text)
            .or_else(|| self.alternating_color(row))
            .unwrap_or(&self.cell_colors);
        paint(text, attrs)
    }

    /// Header colors in bold; themes without header colors leave titles plain.
    pub fn apply_title_style(&self, text: &str) -> String {
        if self.header_colors.is_plain() {
            return text.to_string();
        }
        paint(text, &self.header_colors.bold())
    }

    fn alternating_color(&self, row: usize) -> Option<&StyleAttrs> {
        if !self.use_alternating_rows || self.alternating_row_colors.is_empty() {
            return None;
        }
        self.alternating_row_colors
            .get(row % self.alternating_row_colors.len())
    }
}

fn set_status_color(colors: &mut Vec<(String, StyleAttrs)>, keyword: String, attrs: StyleAttrs) {
    match colors
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(&keyword))
    {
        Some(entry) => entry.1 = attrs,
        None => colors.push((keyword, attrs)),
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::RESET;
    use serde_json::json;

    #[test]
    fn test_plain_theme_adds_no_escape_codes() {
        let theme = TableTheme::minimal();
        assert_eq!(theme.apply_header_style("Name"), "Name");
        assert_eq!(theme.apply_cell_style("active", 0, 0), "active");
        assert_eq!(theme.apply_title_style("Users"), "Users");
    }

    #[test]
    fn test_header_style_resets() {
        let out = TableTheme::standard().apply_header_style("Name");
        assert!(out.starts_with("\x1b["));
        assert!(out.ends_with(RESET));
    }

    #[test]
    fn test_status_match_prefers_longest_keyword() {
        let theme = TableTheme::standard();
        assert_eq!(
            theme.status_match("Inactive"),
            Some(&StyleAttrs::fg(AnsiColors::BrightBlack))
        );
        assert_eq!(theme.status_match("ACTIVE"), Some(&StyleAttrs::fg(AnsiColors::Green)));
        assert_eq!(theme.status_match("queued"), None);
    }

    #[test]
    fn test_status_beats_alternating_beats_flat() {
        let red = StyleAttrs::fg(AnsiColors::Red);
        let blue = StyleAttrs::fg(AnsiColors::Blue);
        let flat = StyleAttrs::fg(AnsiColors::White);
        let theme = TableTheme {
            cell_colors: flat,
            alternating_row_colors: vec![blue],
            use_alternating_rows: true,
            ..TableTheme::minimal()
        }
        .with_status_color("error", red);

        assert_eq!(theme.apply_cell_style("error: disk", 0, 0), paint("error: disk", &red));
        assert_eq!(theme.apply_cell_style("fine", 0, 0), paint("fine", &blue));

        let flat_only = TableTheme {
            use_alternating_rows: false,
            ..theme
        };
        assert_eq!(flat_only.apply_cell_style("fine", 1, 0), paint("fine", &flat));
    }

    #[test]
    fn test_alternating_cycles_by_row() {
        let theme = TableTheme::ocean();
        let first = theme.apply_cell_style("x", 0, 0);
        let second = theme.apply_cell_style("x", 1, 0);
        let third = theme.apply_cell_style("x", 2, 0);
        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_custom_stylers_override_everything() {
        let theme = TableTheme::standard()
            .with_header_styler(|t| format!("<{}>", t))
            .with_cell_styler(|t, row, col| format!("{}@{}:{}", t, row, col));
        assert_eq!(theme.apply_header_style("Name"), "<Name>");
        assert_eq!(theme.apply_cell_style("active", 2, 1), "active@2:1");
    }

    #[test]
    fn test_configure_accepts_both_key_styles() {
        let camel = TableTheme::minimal()
            .configure(&json!({
                "headerColors": {"color": "yellow", "bold": true},
                "useAlternatingRows": true,
                "alternatingRowColors": ["red", {"color": "blue"}],
                "statusColors": {"paid": "green"},
                "somethingElse": 1
            }))
            .unwrap();
        let snake = TableTheme::minimal()
            .configure(&json!({
                "header_colors": {"color": "yellow", "bold": true},
                "use_alternating_rows": true,
                "alternating_row_colors": ["red", {"color": "blue"}],
                "status_colors": {"paid": "green"}
            }))
            .unwrap();

        for theme in [&camel, &snake] {
            assert_eq!(theme.header_colors, StyleAttrs::fg(AnsiColors::Yellow).bold());
            assert!(theme.use_alternating_rows);
            assert_eq!(theme.alternating_row_colors.len(), 2);
            assert_eq!(theme.status_match("PAID"), Some(&StyleAttrs::fg(AnsiColors::Green)));
        }
    }

    #[test]
    fn test_configure_rejects_bad_input() {
        assert!(TableTheme::standard().configure(&json!([1, 2])).is_err());
        assert!(
            TableTheme::standard()
                .configure(&json!({"cellColors": {"color": "octarine"}}))
                .is_err()
        );
    }

    #[test]
    fn test_presets_resolve() {
        for name in TableTheme::PRESETS {
            assert_eq!(TableTheme::from_name(name).unwrap().name, name);
        }
        assert!(TableTheme::from_name("neon").is_none());
    }
}
