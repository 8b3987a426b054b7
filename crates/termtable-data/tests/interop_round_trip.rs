use termtable_data::{CellValue, ColumnType, TableData};

fn inventory() -> TableData {
    TableData::new(
        ["sku", "name", "qty", "price", "in_stock"],
        vec![
            vec![
                "A-1".into(),
                "Widget, large".into(),
                CellValue::Int(12),
                CellValue::Float(9.5),
                CellValue::Bool(true),
            ],
            vec![
                "B-2".into(),
                "Gadget \"pro\"".into(),
                CellValue::Int(0),
                CellValue::Float(120.25),
                CellValue::Bool(false),
            ],
            vec!["C-3".into(), "Doohickey".into()],
        ],
    )
}

#[test]
fn every_row_matches_header_count() {
    let ragged = TableData::new(
        ["a", "b", "c"],
        vec![
            vec![],
            vec!["1".into()],
            vec!["1".into(), "2".into(), "3".into(), "4".into(), "5".into()],
        ],
    );
    assert!(ragged.rows().iter().all(|row| row.len() == 3));

    let widened = ragged.add_row(vec!["x".into(); 9]).limit(10, 0);
    assert!(widened.rows().iter().all(|row| row.len() == 3));
}

#[test]
fn csv_round_trip_reproduces_headers_and_string_rows() {
    let data = inventory();
    let csv = data.to_csv(true).unwrap();
    let parsed = TableData::from_csv(&csv, true).unwrap();

    assert_eq!(parsed.headers(), data.headers());
    for (original, reparsed) in data.rows().iter().zip(parsed.rows()) {
        let original: Vec<String> = original.iter().map(|v| v.to_string()).collect();
        let reparsed: Vec<String> = reparsed.iter().map(|v| v.to_string()).collect();
        assert_eq!(original, reparsed);
    }
    assert_eq!(parsed.column_type(2), ColumnType::Integer);
    assert_eq!(parsed.column_type(3), ColumnType::Float);
    assert_eq!(parsed.column_type(4), ColumnType::Boolean);
}

#[test]
fn json_round_trip_keeps_scalar_types() {
    let data = inventory();
    let json = data.to_json(true).unwrap();
    let parsed = TableData::from_json(&json).unwrap();

    assert_eq!(parsed.headers(), data.headers());
    assert_eq!(parsed.row(0), data.row(0));
    assert_eq!(parsed.row(1), data.row(1));
}

#[test]
fn associative_rows_are_keyed_by_header() {
    let rows = inventory().to_associative_array();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["name"], serde_json::json!("Gadget \"pro\""));
    assert_eq!(rows[2]["qty"], serde_json::json!(""));
}
