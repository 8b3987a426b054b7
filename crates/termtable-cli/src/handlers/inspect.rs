use crate::args::InspectArgs;
use crate::input;
use crate::terminal::Environment;
use anyhow::Result;
use termtable_data::{CellValue, TableData};
use termtable_engine::{Column, TableBuilder, TableConfig};

const STAT_HEADERS: [&str; 8] = [
    "Column", "Type", "Count", "Non-empty", "Unique", "Min", "Max", "Avg",
];

pub fn handle(args: &InspectArgs, config: &TableConfig, env: &Environment) -> Result<()> {
    let data = input::read_table(&args.input)?;
    let stats = column_stats(&data);

    let mut builder = TableBuilder::from_data(stats)
        .style(config.resolve_style()?)
        .title(format!("{} rows", data.row_count()))
        .max_width(args.width.unwrap_or_else(|| env.width_or_default()));
    for name in ["Min", "Max", "Avg"] {
        builder = builder.column_named(name, Column::right(name));
    }
    if env.color {
        builder = builder.theme(config.resolve_theme()?.unwrap_or_default());
    }

    println!("{}", builder.build());
    Ok(())
}

/// One row of statistics per input column.
pub fn column_stats(data: &TableData) -> TableData {
    let rows = data
        .headers()
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let stats = data.column_statistics(index);
            vec![
                CellValue::from(header),
                CellValue::from(stats.column_type.as_str()),
                CellValue::from(stats.count),
                CellValue::from(stats.non_empty),
                CellValue::from(stats.unique),
                summary_cell(stats.min),
                summary_cell(stats.max),
                summary_cell(stats.avg),
            ]
        })
        .collect();
    TableData::new(STAT_HEADERS, rows)
}

fn summary_cell(value: Option<f64>) -> CellValue {
    match value {
        Some(v) => CellValue::Str(format!("{:.2}", v)),
        None => CellValue::from("-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_stats() {
        let data = TableData::new(
            ["name", "score"],
            vec![
                vec!["Alice".into(), CellValue::Int(90)],
                vec!["Bob".into(), CellValue::Int(75)],
                vec!["Alice".into(), CellValue::Null],
            ],
        );
        let stats = column_stats(&data);
        assert_eq!(stats.headers(), STAT_HEADERS);

        assert_eq!(
            stats.row(0),
            [
                CellValue::from("name"),
                CellValue::from("string"),
                CellValue::Int(3),
                CellValue::Int(3),
                CellValue::Int(2),
                CellValue::from("-"),
                CellValue::from("-"),
                CellValue::from("-"),
            ]
        );
        assert_eq!(stats.row(1)[1], CellValue::from("integer"));
        assert_eq!(stats.row(1)[3], CellValue::Int(2));
        assert_eq!(stats.row(1)[5], CellValue::from("75.00"));
        assert_eq!(stats.row(1)[7], CellValue::from("82.50"));
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let stats = column_stats(&TableData::default());
        assert_eq!(stats.row_count(), 0);
    }
}
