use sheetsift_sheet::{ExportFormat, SheetError, SourceFormat, Table};
use tempfile::tempdir;

fn awkward_table() -> Table {
    Table::from_rows(vec![
        vec!["id", "note", "amount"],
        vec!["1", "plain", "10"],
        vec!["2", "comma, inside", "20.5"],
        vec!["3", "she said \"yes\"", ""],
        vec!["4", "two\nlines", "-3"],
        vec!["5", "", ""],
    ])
    .unwrap()
}

// ===== CSV =====

#[test]
fn test_csv_roundtrip_preserves_cells() {
    let table = awkward_table();
    let csv = table.to_csv_string().unwrap();
    let restored = Table::from_csv_str(&csv).unwrap();

    assert_eq!(restored.row_count(), table.row_count());
    assert_eq!(restored.columns(), table.columns());
    for (left, right) in table.rows().iter().zip(restored.rows()) {
        assert_eq!(left.cells(), right.cells());
    }
}

#[test]
fn test_csv_bytes_roundtrip_via_formats() {
    let table = awkward_table();
    let bytes = table.to_bytes(ExportFormat::Csv).unwrap();
    let restored = Table::from_bytes(&bytes, SourceFormat::Csv).unwrap();
    assert_eq!(restored.rows(), table.rows());
}

// ===== JSON =====

#[test]
fn test_json_roundtrip() {
    let table = awkward_table();
    let bytes = table.to_bytes(ExportFormat::Json).unwrap();
    let restored = Table::from_bytes(&bytes, SourceFormat::Json).unwrap();

    assert_eq!(restored.columns(), table.columns());
    assert_eq!(restored.rows(), table.rows());
}

#[test]
fn test_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.json");
    awkward_table().save_as_json(&path).unwrap();

    let restored = Table::from_path(&path).unwrap();
    assert_eq!(restored.name(), "rows");
    assert_eq!(restored.value(1, "note"), Some("comma, inside"));
}

// ===== Excel =====

#[test]
fn test_xlsx_roundtrip_through_bytes() {
    let mut table = awkward_table();
    table.set_name("Filtered Data");
    let bytes = table.to_bytes(ExportFormat::Xlsx).unwrap();
    let restored = Table::from_bytes(&bytes, SourceFormat::Xlsx).unwrap();

    assert_eq!(restored.name(), "Filtered Data");
    assert_eq!(restored.columns(), table.columns());
    // trailing empty cells are not stored in the workbook but come back padded
    assert_eq!(restored.rows(), table.rows());
}

// ===== Errors =====

#[test]
fn test_corrupt_input_is_an_error() {
    let result = Table::from_bytes(b"\x00\x01\x02", SourceFormat::Xlsx);
    assert!(matches!(result, Err(SheetError::Xlsx(_))));

    let result = Table::from_bytes(b"{not json", SourceFormat::Json);
    assert!(matches!(result, Err(SheetError::Parse(_))));
}
