use rust_xlsxwriter::Workbook;
use rusty_sheet::data::{
    apply_column_filter, apply_query, export_table, load_table, CellValue, DecodeError, Row, Table,
};

fn name_age_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Name").unwrap();
    sheet.write_string(0, 1, "Age").unwrap();
    sheet.write_string(1, 0, "Alice").unwrap();
    sheet.write_number(1, 1, 30).unwrap();
    sheet.write_string(2, 0, "Bob").unwrap();
    sheet.write_number(2, 1, 25).unwrap();
    workbook.save_to_buffer().unwrap()
}

fn ids(rows: &[&Row]) -> Vec<usize> {
    rows.iter().map(|r| r.id).collect()
}

#[test]
fn loads_searches_and_exports_name_age_sheet() {
    let table = load_table(&name_age_workbook()).unwrap();

    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.columns[0].title, "Name");
    assert_eq!(table.columns[1].title, "Age");
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].id, 0);
    assert_eq!(table.rows[0].get("0"), Some(&CellValue::from("Alice")));
    assert_eq!(table.rows[0].get("1"), Some(&CellValue::Number(30.0)));
    assert_eq!(table.rows[1].get("0"), Some(&CellValue::from("Bob")));

    assert_eq!(ids(&apply_query(&table, "bob")), [1]);
    assert_eq!(ids(&apply_query(&table, "30")), [0]);
    assert_eq!(ids(&apply_query(&table, "")), [0, 1]);
    assert_eq!(ids(&apply_column_filter(&table, "1", &["2".to_string()])), [1]);

    let view = apply_query(&table, "BOB");
    let exported = load_table(&export_table(&table, &view).unwrap()).unwrap();
    assert_eq!(exported.columns, table.columns);
    assert_eq!(exported.len(), 1);
    assert_eq!(exported.rows[0].cells, table.rows[1].cells);
}

#[test]
fn placeholder_titles_follow_header_positions() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "First").unwrap();
    sheet.write_string(0, 2, "Third").unwrap();
    sheet.write_string(1, 1, "under the gap").unwrap();
    let table = load_table(&workbook.save_to_buffer().unwrap()).unwrap();

    let titles: Vec<&str> = table.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["First", "Column 2", "Third"]);
    assert_eq!(ids(&apply_query(&table, "GAP")), [0]);
}

#[test]
fn failed_load_produces_no_table() {
    let result: Result<Table, DecodeError> = load_table(b"\x00\x01 not a workbook");
    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("not a recognizable spreadsheet"));
}
