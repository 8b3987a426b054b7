use serde::{Deserialize, Serialize};

/// Box-drawing characters used for borders and separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub cross: char,
    pub top_tee: char,
    pub bottom_tee: char,
    pub left_tee: char,
    pub right_tee: char,
}

impl BorderGlyphs {
    const LIGHT: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        cross: '┼',
        top_tee: '┬',
        bottom_tee: '┴',
        left_tee: '├',
        right_tee: '┤',
    };

    const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
        cross: '+',
        top_tee: '+',
        bottom_tee: '+',
        left_tee: '+',
        right_tee: '+',
    };

    /// Only the horizontal rule is drawn; everything else is blank.
    const fn rule_only(horizontal: char) -> Self {
        Self {
            top_left: ' ',
            top_right: ' ',
            bottom_left: ' ',
            bottom_right: ' ',
            horizontal,
            vertical: ' ',
            cross: ' ',
            top_tee: ' ',
            bottom_tee: ' ',
            left_tee: ' ',
            right_tee: ' ',
        }
    }

    fn all(&self) -> [char; 11] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
            self.horizontal,
            self.vertical,
            self.cross,
            self.top_tee,
            self.bottom_tee,
            self.left_tee,
            self.right_tee,
        ]
    }
}

/// Border glyphs, padding and structural toggles. Immutable value object;
/// build variants with the preset constructors or [`TableStyle::custom`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    pub name: String,
    pub glyphs: BorderGlyphs,
    pub padding_left: usize,
    pub padding_right: usize,
    pub show_borders: bool,
    pub show_header_separator: bool,
    pub show_row_separators: bool,
    /// Draw the top and bottom rules when borders are shown.
    pub show_edge_rules: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self::bordered()
    }
}

impl TableStyle {
    pub const PRESETS: [&'static str; 9] = [
        "default",
        "simple",
        "minimal",
        "compact",
        "markdown",
        "double_bordered",
        "rounded",
        "heavy",
        "none",
    ];

    fn preset(name: &str, glyphs: BorderGlyphs) -> Self {
        Self {
            name: name.to_string(),
            glyphs,
            padding_left: 1,
            padding_right: 1,
            show_borders: true,
            show_header_separator: true,
            show_row_separators: false,
            show_edge_rules: true,
        }
    }

    pub fn bordered() -> Self {
        Self::preset("default", BorderGlyphs::LIGHT)
    }

    pub fn simple() -> Self {
        Self::preset("simple", BorderGlyphs::ASCII)
    }

    pub fn minimal() -> Self {
        Self {
            show_borders: false,
            ..Self::preset("minimal", BorderGlyphs::rule_only('─'))
        }
    }

    pub fn compact() -> Self {
        Self {
            padding_left: 0,
            padding_right: 1,
            show_borders: false,
            ..Self::preset("compact", BorderGlyphs::rule_only('-'))
        }
    }

    /// GitHub-flavored markdown pipe table.
    pub fn markdown() -> Self {
        Self {
            show_row_separators: false,
            show_edge_rules: false,
            ..Self::preset(
                "markdown",
                BorderGlyphs {
                    top_left: '|',
                    top_right: '|',
                    bottom_left: '|',
                    bottom_right: '|',
                    horizontal: '-',
                    vertical: '|',
                    cross: '|',
                    top_tee: '|',
                    bottom_tee: '|',
                    left_tee: '|',
                    right_tee: '|',
                },
            )
        }
    }

    pub fn double_bordered() -> Self {
        Self::preset(
            "double_bordered",
            BorderGlyphs {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
                cross: '╬',
                top_tee: '╦',
                bottom_tee: '╩',
                left_tee: '╠',
                right_tee: '╣',
            },
        )
    }

    pub fn rounded() -> Self {
        Self::preset(
            "rounded",
            BorderGlyphs {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                ..BorderGlyphs::LIGHT
            },
        )
    }

    pub fn heavy() -> Self {
        Self::preset(
            "heavy",
            BorderGlyphs {
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                horizontal: '━',
                vertical: '┃',
                cross: '╋',
                top_tee: '┳',
                bottom_tee: '┻',
                left_tee: '┣',
                right_tee: '┫',
            },
        )
    }

    pub fn none() -> Self {
        Self {
            padding_left: 0,
            padding_right: 2,
            show_borders: false,
            show_header_separator: false,
            show_row_separators: false,
            ..Self::preset("none", BorderGlyphs::rule_only(' '))
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &Self::PRESETS
    }

    /// Resolve a preset by name. Dashes and underscores are interchangeable
    /// and a few common aliases are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        let style = match normalized.as_str() {
            "default" | "bordered" | "box" => Self::bordered(),
            "simple" | "ascii" => Self::simple(),
            "minimal" => Self::minimal(),
            "compact" => Self::compact(),
            "markdown" | "md" => Self::markdown(),
            "double" | "double_bordered" => Self::double_bordered(),
            "rounded" => Self::rounded(),
            "heavy" | "bold" => Self::heavy(),
            "none" | "plain" => Self::none(),
            _ => return None,
        };
        Some(style)
    }

    /// Start from the default preset and apply only the supplied overrides.
    pub fn custom(overrides: &StyleOverrides) -> Self {
        let mut style = overrides.apply_to(Self::bordered());
        style.name = "custom".to_string();
        style
    }

    pub fn total_padding(&self) -> usize {
        self.padding_left + self.padding_right
    }

    /// Width taken by vertical rules: one between and around each column.
    pub fn border_width(&self, column_count: usize) -> usize {
        if self.show_borders {
            column_count + 1
        } else {
            0
        }
    }

    pub fn is_unicode(&self) -> bool {
        self.glyphs.all().iter().any(|c| c.len_utf8() > 1)
    }

    /// Swap Unicode glyphs for the ASCII set, keeping padding and toggles.
    pub fn ascii_fallback(&self) -> Self {
        if !self.is_unicode() {
            return self.clone();
        }

        let glyphs = if self.show_borders {
            BorderGlyphs::ASCII
        } else {
            BorderGlyphs::rule_only(BorderGlyphs::ASCII.horizontal)
        };
        Self {
            name: format!("{}_ascii", self.name),
            glyphs,
            ..self.clone()
        }
    }
}

/// Partial style description; `None` fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub top_left: Option<char>,
    pub top_right: Option<char>,
    pub bottom_left: Option<char>,
    pub bottom_right: Option<char>,
    pub horizontal: Option<char>,
    pub vertical: Option<char>,
    pub cross: Option<char>,
    pub top_tee: Option<char>,
    pub bottom_tee: Option<char>,
    pub left_tee: Option<char>,
    pub right_tee: Option<char>,
    pub padding_left: Option<usize>,
    pub padding_right: Option<usize>,
    pub show_borders: Option<bool>,
    pub show_header_separator: Option<bool>,
    pub show_row_separators: Option<bool>,
    pub show_edge_rules: Option<bool>,
}

impl StyleOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, base: TableStyle) -> TableStyle {
        let mut style = base;
        let g = &mut style.glyphs;
        set(&mut g.top_left, self.top_left);
        set(&mut g.top_right, self.top_right);
        set(&mut g.bottom_left, self.bottom_left);
        set(&mut g.bottom_right, self.bottom_right);
        set(&mut g.horizontal, self.horizontal);
        set(&mut g.vertical, self.vertical);
        set(&mut g.cross, self.cross);
        set(&mut g.top_tee, self.top_tee);
        set(&mut g.bottom_tee, self.bottom_tee);
        set(&mut g.left_tee, self.left_tee);
        set(&mut g.right_tee, self.right_tee);
        set(&mut style.padding_left, self.padding_left);
        set(&mut style.padding_right, self.padding_right);
        set(&mut style.show_borders, self.show_borders);
        set(&mut style.show_header_separator, self.show_header_separator);
        set(&mut style.show_row_separators, self.show_row_separators);
        set(&mut style.show_edge_rules, self.show_edge_rules);
        style
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toggles_and_padding() {
        let style = TableStyle::default();
        assert!(style.show_borders);
        assert!(style.show_header_separator);
        assert!(!style.show_row_separators);
        assert_eq!(style.total_padding(), 2);
        assert_eq!(style.border_width(3), 4);
        assert_eq!(TableStyle::minimal().border_width(3), 0);
    }

    #[test]
    fn test_preset_table() {
        let cases = [
            ("default", true, true, false),
            ("simple", true, true, false),
            ("minimal", false, true, false),
            ("markdown", true, true, false),
            ("double_bordered", true, true, false),
            ("rounded", true, true, false),
            ("heavy", true, true, false),
            ("none", false, false, false),
        ];
        for (name, borders, header_sep, row_sep) in cases {
            let style = TableStyle::from_name(name).unwrap();
            assert_eq!(style.show_borders, borders, "{name}");
            assert_eq!(style.show_header_separator, header_sep, "{name}");
            assert_eq!(style.show_row_separators, row_sep, "{name}");
        }
        assert_eq!(TableStyle::compact().padding_left, 0);
        assert_eq!(TableStyle::compact().padding_right, 1);
        assert_eq!(TableStyle::none().padding_right, 2);
        assert_eq!(TableStyle::double_bordered().glyphs.top_left, '╔');
        assert_eq!(TableStyle::rounded().glyphs.bottom_right, '╯');
        assert_eq!(TableStyle::heavy().glyphs.vertical, '┃');
    }

    #[test]
    fn test_every_listed_preset_resolves() {
        for name in TableStyle::PRESETS {
            assert_eq!(TableStyle::from_name(name).unwrap().name, name);
        }
        assert_eq!(TableStyle::from_name("Double-Bordered").unwrap().name, "double_bordered");
        assert!(TableStyle::from_name("sparkly").is_none());
    }

    #[test]
    fn test_unicode_detection_and_fallback() {
        assert!(TableStyle::bordered().is_unicode());
        assert!(TableStyle::minimal().is_unicode());
        assert!(!TableStyle::simple().is_unicode());
        assert!(!TableStyle::markdown().is_unicode());

        let ascii = TableStyle::rounded().ascii_fallback();
        assert!(!ascii.is_unicode());
        assert_eq!(ascii.glyphs, TableStyle::simple().glyphs);

        let minimal = TableStyle::minimal().ascii_fallback();
        assert!(!minimal.show_borders);
        assert_eq!(minimal.glyphs.horizontal, '-');

        let simple = TableStyle::simple();
        assert_eq!(simple.ascii_fallback(), simple);
    }

    #[test]
    fn test_custom_applies_only_supplied_keys() {
        let style = TableStyle::custom(&StyleOverrides {
            horizontal: Some('='),
            show_row_separators: Some(true),
            padding_left: Some(2),
            ..Default::default()
        });
        assert_eq!(style.glyphs.horizontal, '=');
        assert_eq!(style.glyphs.vertical, '│');
        assert!(style.show_row_separators);
        assert_eq!(style.padding_left, 2);
        assert_eq!(style.padding_right, 1);
    }

    #[test]
    fn test_overrides_deserialize_from_toml() {
        let overrides: StyleOverrides =
            toml::from_str("vertical = \"!\"\nshow_borders = false\n").unwrap();
        assert_eq!(overrides.vertical, Some('!'));
        assert_eq!(overrides.show_borders, Some(false));
        assert!(overrides.horizontal.is_none());
        assert!(StyleOverrides::default().is_empty());
    }
}
