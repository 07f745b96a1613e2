//! RecordBook tests: sheet creation, export targets and import

mod common;

use common::{date, sample_orders, Item, Order};
use pretty_assertions::assert_eq;
use royalbit_tabula::{Cell, RecordBook, TabulaError};
use std::io::Read;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// SHEET CREATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_create_template_writes_only_headers() {
    let mut book = RecordBook::new();
    let sheet = book.create_template::<Order>(Some("Template")).unwrap();

    assert_eq!(sheet.name(), "Template");
    assert_eq!(sheet.last_row_num(), Some(0));
    assert_eq!(
        book.headers("Template"),
        vec!["id", "Quantity", "due", "price", "active"]
    );
    assert!(book.import_sheet::<Order>("Template").is_empty());
}

#[test]
fn test_create_sheet_writes_rows_from_one() {
    let mut book = RecordBook::new();
    let orders = sample_orders();
    let sheet = book
        .create_sheet(&orders, Some("Orders"))
        .unwrap()
        .expect("non-empty collection creates a sheet");

    assert_eq!(sheet.last_row_num(), Some(2));
    assert_eq!(sheet.cell(1, 0), Some(&Cell::text("A1")));
    assert_eq!(sheet.cell(1, 1), Some(&Cell::Number(3.0)));
    assert_eq!(sheet.cell(1, 2), Some(&Cell::text("2024-01-05")));
    assert_eq!(sheet.cell(2, 4), Some(&Cell::Boolean(false)));
    assert_eq!(sheet.cell(2, 2), None);
}

#[test]
fn test_create_sheet_skips_missing_records() {
    let mut book = RecordBook::new();
    let mut orders = sample_orders();
    let second = orders.pop();
    let first = orders.pop();
    let sparse = vec![first, None, second];

    let sheet = book.create_sheet(&sparse, None).unwrap().unwrap();

    // None entries consume no row
    assert_eq!(sheet.last_row_num(), Some(2));
    assert_eq!(sheet.cell(2, 0), Some(&Cell::text("B7")));
}

#[test]
fn test_create_sheet_accepts_iterator_of_options() {
    let mut book = RecordBook::new();
    let orders = sample_orders();
    let active = orders.iter().map(|o| o.active.then_some(o));

    let sheet = book.create_sheet(active, Some("Active")).unwrap().unwrap();
    assert_eq!(sheet.last_row_num(), Some(1));
    assert_eq!(sheet.cell(1, 0), Some(&Cell::text("A1")));
}

#[test]
fn test_create_sheet_empty_collection_is_noop() {
    let mut book = RecordBook::new();
    let empty: Vec<Order> = Vec::new();

    assert!(book.create_sheet(&empty, Some("Nothing")).unwrap().is_none());
    assert_eq!(book.sheet_count(), 0);
}

#[test]
fn test_default_sheet_names_follow_count() {
    let mut book = RecordBook::new();
    let orders = sample_orders();

    book.create_sheet(&orders, None).unwrap();
    book.create_template::<Item>(None).unwrap();
    book.create_sheet(&orders, Some("")).unwrap();

    assert_eq!(book.sheet_names(), vec!["Sheet1", "Sheet2", "Sheet3"]);
}

#[test]
fn test_default_sheet_name_skips_taken_names() {
    let mut book = RecordBook::new();
    book.create_template::<Item>(Some("Sheet2")).unwrap();
    book.create_template::<Item>(None).unwrap();

    assert_eq!(book.sheet_names(), vec!["Sheet2", "Sheet3"]);
}

#[test]
fn test_duplicate_sheet_name_is_error() {
    let mut book = RecordBook::new();
    book.create_template::<Order>(Some("Orders")).unwrap();

    let result = book.create_template::<Order>(Some("Orders"));
    assert!(matches!(result, Err(TabulaError::DuplicateSheet(name)) if name == "Orders"));
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_missing_sheet_is_empty() {
    let book = RecordBook::new();
    assert!(book.import_sheet::<Order>("Nowhere").is_empty());
    assert!(book.import_sheet::<Order>(3usize).is_empty());
    assert!(book.import_first::<Order>().is_empty());
}

#[test]
fn test_import_skips_blank_and_foreign_rows() {
    let mut book = RecordBook::new();
    let sheet = book.workbook_mut().create_sheet("Mixed").unwrap();
    sheet.set_cell(0, 0, Cell::text("id"));
    sheet.set_cell(0, 1, Cell::text("qty"));
    sheet.set_cell(0, 2, Cell::text("due"));
    sheet.set_cell(1, 0, Cell::text("A1"));
    sheet.set_cell(1, 1, Cell::Number(3.0));
    sheet.set_cell(1, 2, Cell::text("2024-01-05"));
    // Row 2 is missing entirely, row 3 holds only blanks
    sheet.set_cell(3, 0, Cell::Blank);
    sheet.set_cell(4, 0, Cell::text("B2"));
    sheet.set_cell(4, 2, Cell::text("not a date"));

    let items: Vec<Item> = book.import_sheet("Mixed");

    assert_eq!(
        items,
        vec![
            Item {
                id: Some("A1".to_string()),
                qty: Some(3),
                due: Some(date(2024, 1, 5)),
            },
            Item {
                id: Some("B2".to_string()),
                qty: None,
                due: None,
            },
        ]
    );
}

#[test]
fn test_import_sheet_without_headers_is_empty() {
    let mut book = RecordBook::new();
    let sheet = book.workbook_mut().create_sheet("Headless").unwrap();
    sheet.set_cell(1, 0, Cell::text("A1"));

    assert!(book.import_sheet::<Item>("Headless").is_empty());
}

#[test]
fn test_verify_columns_variants() {
    let mut book = RecordBook::new();
    book.create_sheet(&sample_orders(), Some("Orders")).unwrap();

    assert!(book.verify_columns("Orders", ["id", "Quantity"]));
    assert!(!book.verify_columns("Orders", ["id", "qty"]));
    assert!(!book.verify_columns("Missing", ["id"]));
    assert!(book.verify_columns_list("Orders", "id,price"));
    assert!(!book.verify_columns_list("Orders", ""));
    assert!(book.verify_columns_for::<Order>("Orders"));
    assert!(!book.verify_columns_for::<Order>("Missing"));
    assert!(book.sheet_exists("Orders"));
    assert!(!book.sheet_exists(1usize));
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT TARGETS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_round_trip_through_bytes() {
    let orders = sample_orders();
    let bytes = RecordBook::new()
        .export_bytes_with(&orders, Some("Orders"))
        .unwrap();

    let book = RecordBook::from_bytes(bytes).unwrap();
    assert_eq!(book.sheet_names(), vec!["Orders"]);
    assert_eq!(book.import_sheet::<Order>("Orders"), orders);
}

#[test]
fn test_round_trip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("orders.xlsx");
    let orders = sample_orders();

    RecordBook::new()
        .export_file_with(&path, &orders, None)
        .unwrap();

    let book = RecordBook::open(&path).unwrap();
    assert_eq!(book.import_first::<Order>(), orders);
}

#[test]
fn test_round_trip_through_stream() {
    let orders = sample_orders();
    let mut stream = RecordBook::new()
        .export_stream_with(&orders, Some("Orders"))
        .unwrap();

    assert_eq!(stream.position(), 0);
    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes).unwrap();

    let book = RecordBook::from_reader(bytes.as_slice()).unwrap();
    assert_eq!(book.import_sheet::<Order>("Orders"), orders);
}

#[test]
fn test_export_to_writer() {
    let mut book = RecordBook::new();
    book.create_sheet(&sample_orders(), Some("Orders")).unwrap();

    let mut cursor = std::io::Cursor::new(Vec::new());
    book.export_to_writer(&mut cursor).unwrap();

    let reloaded = RecordBook::from_bytes(cursor.into_inner()).unwrap();
    assert_eq!(reloaded.import_sheet::<Order>("Orders").len(), 2);
}

#[test]
fn test_empty_book_exports_single_blank_sheet() {
    let bytes = RecordBook::new().export_bytes().unwrap();

    let book = RecordBook::from_bytes(bytes).unwrap();
    assert_eq!(book.sheet_names(), vec!["Sheet1"]);
    assert!(book.import_first::<Order>().is_empty());
}

#[test]
fn test_export_file_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no/such/dir/orders.xlsx");

    let result = RecordBook::new().export_file_with(&path, &sample_orders(), None);
    assert!(result.is_err());
}

#[test]
fn test_import_from_legacy_xls() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/orders.xls");

    let book = RecordBook::open(path).unwrap();
    assert_eq!(book.import_sheet::<Order>("Orders"), sample_orders());
}

#[test]
fn test_open_non_workbook_is_unrecognized() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("orders.csv");
    std::fs::write(&path, "id,qty\nA1,3\n").unwrap();

    let result = RecordBook::open(&path);
    assert!(matches!(result, Err(TabulaError::UnrecognizedFormat(_))));
}
