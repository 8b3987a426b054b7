use crate::builder::TableBuilder;
use crate::column::{Alignment, Column, TruncateMode};
use crate::error::{Error, Result};
use crate::style::{StyleOverrides, TableStyle};
use crate::theme::TableTheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-column settings keyed by header name in `[columns.<name>]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub width: Option<usize>,
    pub min_width: Option<usize>,
    pub max_width: Option<usize>,
    pub align: Option<Alignment>,
    pub truncate: Option<TruncateMode>,
    pub ellipsis: Option<String>,
    pub visible: Option<bool>,
    pub default: Option<String>,
    /// Formatter type name, e.g. `currency` or `filesize`.
    pub format: Option<String>,
}

impl ColumnConfig {
    pub fn apply_to(&self, mut column: Column) -> Column {
        if let Some(width) = self.width {
            column.width = Some(width);
        }
        if let Some(min) = self.min_width {
            column.min_width = Some(min);
        }
        if let Some(max) = self.max_width {
            column.max_width = Some(max);
        }
        if let Some(align) = self.align {
            column.alignment = align;
        }
        if let Some(mode) = self.truncate {
            column.truncate = mode;
        }
        if let Some(ellipsis) = &self.ellipsis {
            column.ellipsis = ellipsis.clone();
        }
        if let Some(visible) = self.visible {
            column.visible = visible;
        }
        if let Some(default) = &self.default {
            column.default_value = default.clone();
        }
        if let Some(format) = &self.format {
            column.format_type = Some(format.clone());
        }
        column
    }
}

/// Table settings as read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub style: String,
    pub theme: Option<String>,
    pub max_width: Option<usize>,
    pub show_headers: bool,
    pub title: Option<String>,
    pub ascii: bool,
    #[serde(skip_serializing_if = "StyleOverrides::is_empty")]
    pub style_overrides: StyleOverrides,
    /// Passed to [`TableTheme::configure`] on top of `theme`.
    #[serde(skip_serializing_if = "toml::Table::is_empty")]
    pub theme_overrides: toml::Table,
    pub columns: BTreeMap<String, ColumnConfig>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: "default".to_string(),
            theme: None,
            max_width: None,
            show_headers: true,
            title: None,
            ascii: false,
            style_overrides: StyleOverrides::default(),
            theme_overrides: toml::Table::new(),
            columns: BTreeMap::new(),
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn resolve_style(&self) -> Result<TableStyle> {
        let mut style = TableStyle::from_name(&self.style)
            .ok_or_else(|| Error::Config(format!("unknown style '{}'", self.style)))?;
        if !self.style_overrides.is_empty() {
            style = self.style_overrides.apply_to(style);
        }
        if self.ascii {
            style = style.ascii_fallback();
        }
        Ok(style)
    }

    /// `None` when neither a theme name nor overrides are configured.
    pub fn resolve_theme(&self) -> Result<Option<TableTheme>> {
        let base = match &self.theme {
            Some(name) => Some(
                TableTheme::from_name(name)
                    .ok_or_else(|| Error::Config(format!("unknown theme '{}'", name)))?,
            ),
            None => None,
        };

        if self.theme_overrides.is_empty() {
            return Ok(base);
        }

        let options = serde_json::to_value(&self.theme_overrides)
            .map_err(|e| Error::Config(format!("invalid theme overrides: {}", e)))?;
        base.unwrap_or_default().configure(&options).map(Some)
    }

    pub fn apply(&self, builder: TableBuilder) -> Result<TableBuilder> {
        let mut builder = builder
            .style(self.resolve_style()?)
            .show_headers(self.show_headers);

        if let Some(theme) = self.resolve_theme()? {
            builder = builder.theme(theme);
        }
        if let Some(width) = self.max_width {
            builder = builder.max_width(width);
        }
        if let Some(title) = &self.title {
            builder = builder.title(title.clone());
        }

        let resolved = builder.resolved_columns();
        for (name, column_config) in &self.columns {
            match builder.data().column_index(name) {
                Some(index) => {
                    let column = column_config.apply_to(resolved[index].clone());
                    builder = builder.column(index, column);
                }
                None => tracing::warn!(column = %name, "config names an unknown column"),
            }
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use termtable_data::CellValue;

    const SAMPLE: &str = r#"
style = "rounded"
theme = "ocean"
max_width = 60
title = "Inventory"

[style_overrides]
padding_left = 2

[theme_overrides]
useAlternatingRows = false
status_colors = { low = "red" }

[columns.Price]
align = "right"
format = "currency"
default = "-"

[columns.Notes]
visible = false
truncate = "word"
"#;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.style, "default");
        assert!(config.show_headers);
        assert!(config.resolve_theme().unwrap().is_none());
        assert_eq!(config.resolve_style().unwrap(), TableStyle::default());
    }

    #[test]
    fn test_parse_sample() {
        let config = TableConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.max_width, Some(60));

        let style = config.resolve_style().unwrap();
        assert_eq!(style.glyphs.top_left, '╭');
        assert_eq!(style.padding_left, 2);

        let theme = config.resolve_theme().unwrap().unwrap();
        assert_eq!(theme.name, "ocean");
        assert!(!theme.use_alternating_rows);
        assert!(theme.status_match("LOW stock").is_some());

        let price = &config.columns["Price"];
        assert_eq!(price.align, Some(Alignment::Right));
        assert_eq!(price.format.as_deref(), Some("currency"));
        assert_eq!(config.columns["Notes"].truncate, Some(TruncateMode::Word));
    }

    #[test]
    fn test_unknown_names_are_config_errors() {
        let config = TableConfig::from_toml_str("style = \"wavy\"").unwrap();
        assert!(matches!(config.resolve_style(), Err(Error::Config(_))));

        let config = TableConfig::from_toml_str("theme = \"neon\"").unwrap();
        assert!(matches!(config.resolve_theme(), Err(Error::Config(_))));

        assert!(TableConfig::from_toml_str("max_width = \"wide\"").is_err());
    }

    #[test]
    fn test_non_ascii_hex_color_is_config_error() {
        let config =
            TableConfig::from_toml_str("theme = \"dark\"\n[theme_overrides]\nheader_colors = \"#aééb\"\n")
                .unwrap();
        assert!(matches!(config.resolve_theme(), Err(Error::Config(_))));
    }

    #[test]
    fn test_ascii_flag() {
        let config = TableConfig::from_toml_str("style = \"heavy\"\nascii = true").unwrap();
        assert!(!config.resolve_style().unwrap().is_unicode());
    }

    #[test]
    fn test_apply_to_builder() {
        let config = TableConfig::from_toml_str(SAMPLE).unwrap();
        let builder = TableBuilder::new(["Item", "Price", "Notes"])
            .add_row(vec!["Widget".into(), CellValue::Float(1234.5), "fragile".into()])
            .add_row(vec!["Gadget".into(), CellValue::Null, "".into()]);

        let builder = config.apply(builder).unwrap();
        let columns = builder.resolved_columns();
        assert_eq!(columns[1].format_type.as_deref(), Some("currency"));
        assert_eq!(columns[1].default_value, "-");
        assert!(!columns[2].visible);

        let out = builder.build();
        assert!(out.contains("Inventory"));
        assert!(out.contains("$1,234.50"));
        assert!(!out.contains("fragile"));
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = TableConfig::from_toml_str(SAMPLE)?;
        config.save_to(&path)?;
        let loaded = TableConfig::load_from(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_load_missing_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = TableConfig::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(loaded, TableConfig::default());
        Ok(())
    }
}
