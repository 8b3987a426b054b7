use crate::ansi::paint;
use crate::calculator::ColumnCalculator;
use crate::column::{Alignment, Column, pad};
use crate::style::TableStyle;
use crate::text::display_width;
use crate::theme::TableTheme;
use termtable_data::TableData;

pub const EMPTY_MESSAGE: &str = "No data to display";

/// Places cells into negotiated widths and draws borders and separators.
#[derive(Debug, Clone, Default)]
pub struct TableRenderer {
    style: TableStyle,
    theme: Option<TableTheme>,
}

/// Columns and widths of one render pass, visible columns only.
struct Layout<'a> {
    columns: Vec<(usize, &'a Column)>,
    widths: Vec<usize>,
    width: usize,
}

impl TableRenderer {
    pub fn new(style: TableStyle) -> Self {
        Self { style, theme: None }
    }

    pub fn with_theme(mut self, theme: TableTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    pub fn theme(&self) -> Option<&TableTheme> {
        self.theme.as_ref()
    }

    pub fn render(
        &self,
        data: &TableData,
        columns: &[Column],
        max_width: usize,
        show_headers: bool,
        title: Option<&str>,
    ) -> String {
        self.render_lines(data, columns, max_width, show_headers, title)
            .join("\n")
    }

    pub fn render_lines(
        &self,
        data: &TableData,
        columns: &[Column],
        max_width: usize,
        show_headers: bool,
        title: Option<&str>,
    ) -> Vec<String> {
        let title = title.filter(|t| !t.is_empty());
        let columns = ColumnCalculator::resolve_columns(data, columns);
        let visible = ColumnCalculator::visible_indices(&columns);

        if data.row_count() == 0 || visible.is_empty() {
            let mut lines = Vec::with_capacity(2);
            if let Some(title) = title {
                lines.push(self.style_title(title));
            }
            lines.push(EMPTY_MESSAGE.to_string());
            return lines;
        }

        let widths = ColumnCalculator::calculate_widths(data, &columns, max_width, &self.style);
        let layout = Layout {
            width: ColumnCalculator::table_width(&widths, &self.style),
            columns: visible.iter().map(|&i| (i, &columns[i])).collect(),
            widths,
        };
        tracing::debug!(
            rows = data.row_count(),
            columns = layout.columns.len(),
            width = layout.width,
            max_width,
            "rendering table"
        );

        let style = &self.style;
        let glyphs = &style.glyphs;
        let mut lines = Vec::with_capacity(data.row_count() + 6);

        if let Some(title) = title {
            lines.push(self.title_line(title, layout.width));
        }

        let edge_rules = style.show_borders && style.show_edge_rules;
        if edge_rules {
            lines.push(self.rule(&layout, glyphs.top_left, glyphs.top_tee, glyphs.top_right));
        }

        if show_headers {
            let cells = layout
                .columns
                .iter()
                .zip(&layout.widths)
                .map(|(&(_, column), &width)| self.header_cell(column, width))
                .collect();
            lines.push(self.line(cells));

            if style.show_header_separator {
                lines.push(self.separator(&layout));
            }
        }

        let last = data.row_count() - 1;
        for (r, row) in data.rows().iter().enumerate() {
            let cells = layout
                .columns
                .iter()
                .zip(&layout.widths)
                .map(|(&(index, column), &width)| self.body_cell(column, &row[index], width, r, index))
                .collect();
            lines.push(self.line(cells));

            if style.show_row_separators && r < last {
                lines.push(self.separator(&layout));
            }
        }

        if edge_rules {
            lines.push(self.rule(
                &layout,
                glyphs.bottom_left,
                glyphs.bottom_tee,
                glyphs.bottom_right,
            ));
        }

        lines
    }

    fn header_cell(&self, column: &Column, width: usize) -> String {
        let text = column.truncate_text(&column.name, width);
        let alignment = match column.alignment {
            Alignment::Auto => Alignment::Left,
            explicit => explicit,
        };
        let aligned = pad(&text, width, alignment);
        match &self.theme {
            Some(theme) => theme.apply_header_style(&aligned),
            None => aligned,
        }
    }

    fn body_cell(
        &self,
        column: &Column,
        value: &termtable_data::CellValue,
        width: usize,
        row: usize,
        col: usize,
    ) -> String {
        let text = column.format_value(value);
        let truncated = column.truncate_text(&text, width);
        let aligned = pad(&truncated, width, column.resolve_alignment(&text));

        if let Some(colorize) = &column.colorizer {
            return paint(&aligned, &colorize(&text));
        }
        match &self.theme {
            Some(theme) => theme.apply_cell_style(&aligned, row, col),
            None => aligned,
        }
    }

    fn line(&self, cells: Vec<String>) -> String {
        let style = &self.style;
        let left = " ".repeat(style.padding_left);
        let right = " ".repeat(style.padding_right);

        if style.show_borders {
            let vertical = style.glyphs.vertical.to_string();
            let mut out = vertical.clone();
            for cell in cells {
                out.push_str(&left);
                out.push_str(&cell);
                out.push_str(&right);
                out.push_str(&vertical);
            }
            out
        } else {
            let mut out = String::new();
            for cell in cells {
                out.push_str(&left);
                out.push_str(&cell);
                out.push_str(&right);
            }
            out.trim_end().to_string()
        }
    }

    fn rule(&self, layout: &Layout<'_>, left: char, mid: char, right: char) -> String {
        let padding = self.style.total_padding();
        let horizontal = self.style.glyphs.horizontal;
        let segments: Vec<String> = layout
            .widths
            .iter()
            .map(|w| horizontal.to_string().repeat(w + padding))
            .collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn separator(&self, layout: &Layout<'_>) -> String {
        let glyphs = &self.style.glyphs;
        if self.style.show_borders {
            self.rule(layout, glyphs.left_tee, glyphs.cross, glyphs.right_tee)
        } else {
            glyphs.horizontal.to_string().repeat(layout.width)
        }
    }

    fn style_title(&self, title: &str) -> String {
        match &self.theme {
            Some(theme) => theme.apply_title_style(title),
            None => title.to_string(),
        }
    }

    /// Centered over the table when it fits, otherwise printed as-is.
    fn title_line(&self, title: &str, table_width: usize) -> String {
        let title_width = display_width(title);
        if title_width >= table_width {
            return self.style_title(title);
        }
        let left = (table_width - title_width) / 2;
        format!("{}{}", " ".repeat(left), self.style_title(title))
    }
}
