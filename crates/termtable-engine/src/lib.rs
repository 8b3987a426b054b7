// Layout and rendering engine for terminal tables.
// Data flows one way: TableData -> Column configuration -> width
// negotiation -> renderer -> String. Nothing here performs I/O except
// TableConfig file loading.

pub mod ansi;
pub mod builder;
pub mod calculator;
pub mod column;
pub mod config;
pub mod error;
pub mod formatter;
pub mod renderer;
pub mod style;
pub mod text;
pub mod theme;

pub use ansi::{StyleAttrs, paint, parse_color};
pub use builder::TableBuilder;
pub use calculator::{AUTO_MAX_WIDTH, ColumnCalculator, MIN_COLUMN_WIDTH};
pub use column::{Alignment, Column, TruncateMode};
pub use config::{ColumnConfig, TableConfig};
pub use error::{Error, Result};
pub use formatter::{CurrencyPosition, FormatterOptions, TableFormatter};
pub use renderer::TableRenderer;
pub use style::{BorderGlyphs, StyleOverrides, TableStyle};
pub use theme::TableTheme;

pub use termtable_data::{CellValue, ColumnType, TableData};

use std::sync::LazyLock;

/// Render `data` with auto-configured columns in the given style.
pub fn render_table(data: &TableData, style: &TableStyle, max_width: usize) -> String {
    TableRenderer::new(style.clone()).render(data, &[], max_width, true, None)
}

/// Preview rows shared by `termtable styles` and the snapshot tests.
pub static SAMPLE_DATA: LazyLock<TableData> = LazyLock::new(|| {
    TableData::new(
        ["Name", "Status", "Score"],
        vec![
            vec![CellValue::from("Alice"), CellValue::from("active"), CellValue::Int(92)],
            vec![CellValue::from("Bob"), CellValue::from("pending"), CellValue::Int(78)],
        ],
    )
});
