use termtable_engine::{
    CellValue, Column, SAMPLE_DATA, TableBuilder, TableData, TableRenderer, TableStyle,
};

fn render(style: TableStyle, width: usize) -> String {
    TableRenderer::new(style).render(&SAMPLE_DATA, &[], width, true, None)
}

#[test]
fn test_sample_default() {
    let out = render(TableStyle::default(), 80);
    insta::assert_snapshot!("sample_default", out);
}

#[test]
fn test_sample_markdown() {
    let out = render(TableStyle::markdown(), 80);
    insta::assert_snapshot!("sample_markdown", out);
}

#[test]
fn test_sample_compact() {
    let out = render(TableStyle::compact(), 80);
    insta::assert_snapshot!("sample_compact", out);
}

#[test]
fn test_sample_double_bordered() {
    let out = render(TableStyle::double_bordered(), 80);
    insta::assert_snapshot!("sample_double_bordered", out);
}

#[test]
fn test_sample_narrow() {
    let out = render(TableStyle::default(), 20);
    insta::assert_snapshot!("sample_narrow", out);
}

#[test]
fn test_users_simple() {
    let data = TableData::new(
        ["Name", "Status"],
        vec![
            vec![CellValue::from("Alice"), CellValue::from("Active")],
            vec![CellValue::from("Bob"), CellValue::from("Inactive")],
        ],
    );
    let out = TableRenderer::new(TableStyle::simple()).render(&data, &[], 40, true, None);
    insta::assert_snapshot!("users_simple", out);
}

#[test]
fn test_formatted_inventory() {
    let out = TableBuilder::new(["Item", "Price", "Size", "Updated"])
        .add_row(vec![
            "Laptop".into(),
            CellValue::Float(1299.99),
            CellValue::Int(1_572_864),
            "2024-01-15T08:30:00Z".into(),
        ])
        .add_row(vec![
            "Mouse".into(),
            CellValue::Float(24.5),
            CellValue::Int(512),
            "2024-02-01".into(),
        ])
        .column(1, Column::right("Price").format_type("currency"))
        .column(2, Column::right("Size").format_type("filesize"))
        .column(3, Column::date("Updated"))
        .style(TableStyle::rounded())
        .build();
    insta::assert_snapshot!("formatted_inventory", out);
}
