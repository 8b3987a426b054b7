use crate::calculator::ColumnCalculator;
use crate::column::Column;
use crate::error::{Error, Result};
use crate::formatter::TableFormatter;
use crate::renderer::TableRenderer;
use crate::style::TableStyle;
use crate::theme::TableTheme;
use std::collections::BTreeMap;
use termtable_data::{CellValue, TableData};

pub const DEFAULT_MAX_WIDTH: usize = 80;

/// Fluent front end wiring data, columns, style, theme and formatter into
/// one render call.
///
/// ```ignore
/// let out = TableBuilder::new(["Name", "Size"])
///     .add_row(vec!["report.pdf".into(), 1536.into()])
///     .column_named("Size", Column::right("Size").format_type("filesize"))
///     .style_named("rounded")?
///     .max_width(60)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder {
    data: TableData,
    columns: BTreeMap<usize, Column>,
    style: TableStyle,
    theme: Option<TableTheme>,
    formatter: TableFormatter,
    max_width: usize,
    show_headers: bool,
    title: Option<String>,
    ascii: bool,
    sort: Option<(usize, bool)>,
    window: Option<(usize, usize)>,
}

impl TableBuilder {
    pub fn new<H, S>(headers: H) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_data(TableData::new(headers, Vec::new()))
    }

    pub fn from_data(data: TableData) -> Self {
        Self {
            data,
            columns: BTreeMap::new(),
            style: TableStyle::default(),
            theme: None,
            formatter: TableFormatter::new(),
            max_width: DEFAULT_MAX_WIDTH,
            show_headers: true,
            title: None,
            ascii: false,
            sort: None,
            window: None,
        }
    }

    pub fn data(&self) -> &TableData {
        &self.data
    }

    /// Replace all rows.
    pub fn rows(mut self, rows: Vec<Vec<CellValue>>) -> Self {
        self.data = TableData::new(self.data.headers().to_vec(), rows);
        self
    }

    pub fn add_row(mut self, values: Vec<CellValue>) -> Self {
        self.data = self.data.add_row(values);
        self
    }

    pub fn column(mut self, index: usize, column: Column) -> Self {
        self.columns.insert(index, column);
        self
    }

    /// Configure the first column whose header is `name`. Unknown names are
    /// ignored.
    pub fn column_named(self, name: &str, column: Column) -> Self {
        match self.data.column_index(name) {
            Some(index) => self.column(index, column),
            None => {
                tracing::warn!(column = name, "no such column, ignoring configuration");
                self
            }
        }
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style_named(self, name: &str) -> Result<Self> {
        let style = TableStyle::from_name(name)
            .ok_or_else(|| Error::Config(format!("unknown style '{}'", name)))?;
        Ok(self.style(style))
    }

    pub fn theme(mut self, theme: TableTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn no_theme(mut self) -> Self {
        self.theme = None;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn show_headers(mut self, show: bool) -> Self {
        self.show_headers = show;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Swap Unicode border glyphs for ASCII at build time.
    pub fn ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn formatter(mut self, formatter: TableFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn sort_by(mut self, index: usize, ascending: bool) -> Self {
        self.sort = Some((index, ascending));
        self
    }

    pub fn limit(mut self, count: usize, offset: usize) -> Self {
        self.window = Some((count, offset));
        self
    }

    /// Auto-configured columns with the explicitly configured ones laid on
    /// top.
    pub fn resolved_columns(&self) -> Vec<Column> {
        let mut columns = ColumnCalculator::auto_configure_columns(&self.data);
        for (&index, column) in &self.columns {
            if let Some(slot) = columns.get_mut(index) {
                *slot = column.clone();
            }
        }
        columns
    }

    pub fn build(&self) -> String {
        let mut data = self.data.clone();
        if let Some((index, ascending)) = self.sort {
            data = data.sort_by_column(index, ascending);
        }
        if let Some((count, offset)) = self.window {
            data = data.limit(count, offset);
        }

        let mut columns = self.resolved_columns();
        let data = self.preformat(&data, &mut columns);

        let style = if self.ascii {
            self.style.ascii_fallback()
        } else {
            self.style.clone()
        };
        let mut renderer = TableRenderer::new(style);
        if let Some(theme) = &self.theme {
            renderer = renderer.with_theme(theme.clone());
        }
        renderer.render(
            &data,
            &columns,
            self.max_width,
            self.show_headers,
            self.title.as_deref(),
        )
    }

    /// Run the formatter pipeline over columns that need it: those with a
    /// `format_type`, or all of them once global formatters are registered.
    /// Their column formatter has then been applied and is cleared.
    fn preformat(&self, data: &TableData, columns: &mut [Column]) -> TableData {
        let global = self.formatter.has_global_formatters();
        let targets: Vec<bool> = columns
            .iter()
            .map(|c| global || c.format_type.is_some())
            .collect();
        if !targets.contains(&true) {
            return data.clone();
        }

        let formatted = data.transform(|row| {
            row.iter()
                .enumerate()
                .map(|(i, value)| match columns.get(i) {
                    Some(column) if targets[i] => CellValue::Str(self.formatter.format_cell(
                        value,
                        column,
                        column.format_type.as_deref(),
                    )),
                    _ => value.clone(),
                })
                .collect()
        });

        for (column, target) in columns.iter_mut().zip(&targets) {
            if *target {
                column.formatter = None;
            }
        }
        formatted
    }
}
