//! Record → row encoding

use crate::excel::dates::{format_datetime, parse_datetime};
use crate::schema::{Schema, Tabular};
use crate::types::{FieldKind, FieldSchema, FieldValue, HeaderRow};
use crate::workbook::{Cell, Row};

/// Encode one record into a row of typed cells.
///
/// Each exported field lands in the column whose header matches it; a field
/// with no readable value leaves its cell absent.
pub fn encode<R: Tabular>(record: &R, schema: &Schema, headers: &HeaderRow) -> Row {
    let mut row = Row::new();

    for (position, field) in schema.export_fields().enumerate() {
        let Some(col) = column_for(field, position, headers) else {
            continue;
        };
        let Some(value) = record.get(&field.field_name) else {
            continue;
        };
        if let Some(cell) = to_cell(&value, field) {
            row.set(col, cell);
        }
    }

    row
}

fn column_for(field: &FieldSchema, position: usize, headers: &HeaderRow) -> Option<u16> {
    let index = if headers.get(position).map(String::as_str) == Some(field.header()) {
        position
    } else {
        headers.iter().position(|h| h == field.header())?
    };
    u16::try_from(index).ok()
}

/// Convert one field value to the cell written for it.
///
/// Values go through their default text form before the cell is typed by the
/// field's declared kind; numbers that are already numeric skip the text hop.
/// Returns `None` when the text form is empty.
pub fn to_cell(value: &FieldValue, field: &FieldSchema) -> Option<Cell> {
    match (field.declared_type, value) {
        (FieldKind::Integer | FieldKind::Float, FieldValue::Integer(i)) => {
            return Some(Cell::Number(*i as f64));
        }
        (FieldKind::Integer | FieldKind::Float, FieldValue::Float(f)) if f.is_finite() => {
            return Some(Cell::Number(*f));
        }
        (FieldKind::Boolean, FieldValue::Boolean(b)) => return Some(Cell::Boolean(*b)),
        _ => {}
    }

    let text = value.to_string();
    if text.is_empty() {
        return None;
    }

    let cell = match field.declared_type {
        FieldKind::Integer | FieldKind::Float => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(text),
        },
        FieldKind::Boolean => match parse_bool(&text) {
            Some(b) => Cell::Boolean(b),
            None => Cell::Text(text),
        },
        FieldKind::Date | FieldKind::DateTime => Cell::Text(format_date_text(value, text, field)),
        FieldKind::Text => Cell::Text(text),
    };
    Some(cell)
}

fn format_date_text(value: &FieldValue, text: String, field: &FieldSchema) -> String {
    let Some(pattern) = field.date_format.as_deref() else {
        return text;
    };
    let moment = value.as_datetime().or_else(|| parse_datetime(&text, None));
    moment
        .and_then(|dt| format_datetime(dt, pattern))
        .unwrap_or(text)
}

/// Boolean literal parse: `true`/`false`, case-insensitive
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
