//! Tabular data for termtable: the `TableData` container, the `CellValue`
//! scalar union, per-column type inference and statistics, and CSV/JSON
//! interop.

pub mod error;
mod interop;
pub mod stats;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use stats::ColumnStats;
pub use table::TableData;
pub use value::{CellValue, ColumnType};
