//! Header row (row 0) reading and writing

use crate::schema::Schema;
use crate::types::HeaderRow;
use crate::workbook::{Cell, Sheet};

/// Read row 0 up to its last populated cell; a missing row yields no headers
pub fn read_headers(sheet: &Sheet) -> HeaderRow {
    let Some(row) = sheet.row(0) else {
        return HeaderRow::new();
    };
    (0..row.last_cell_num())
        .map(|col| row.get(col).map(Cell::to_text).unwrap_or_default())
        .collect()
}

/// Replace row 0 with one text cell per exported field, in schema order
pub fn write_headers(sheet: &mut Sheet, schema: &Schema) -> HeaderRow {
    let headers: HeaderRow = schema
        .export_fields()
        .map(|f| f.header().to_string())
        .collect();

    let row = sheet.create_row(0);
    for (col, header) in (0u16..).zip(&headers) {
        row.set(col, Cell::text(header.as_str()));
    }

    headers
}
