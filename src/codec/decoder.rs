//! Row → record decoding
//!
//! Every header column folds into `Ok(())` when it populated a field or an
//! [`Unmapped`] reason when it did not. A row where no column mapped is
//! dropped, which is how blank and foreign rows fall out of an import.

use super::encoder::parse_bool;
use crate::excel::dates::{parse_datetime, serial_to_datetime};
use crate::schema::{Schema, Tabular};
use crate::types::{FieldKind, FieldSchema, FieldValue, HeaderRow};
use crate::workbook::{Cell, Row};
use chrono::NaiveDateTime;

/// Why a header column contributed nothing to the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmapped {
    /// Header matches no field of the schema
    UnknownColumn,
    /// Cell absent, blank, error or empty text
    NoValue,
    /// Cell content does not convert to the declared kind
    Coercion,
    /// Record refused the value
    NotWritable,
}

/// Decode one row; `None` when no header column mapped onto the record
pub fn decode<R: Tabular>(row: &Row, headers: &HeaderRow, schema: &Schema) -> Option<R> {
    let mut record = R::default();
    let outcomes = decode_columns(&mut record, row, headers, schema);
    let unmapped = outcomes.iter().filter(|o| o.is_err()).count();
    (unmapped < headers.len()).then_some(record)
}

/// Decode every header column into `record`, one outcome per column
pub fn decode_columns<R: Tabular>(
    record: &mut R,
    row: &Row,
    headers: &HeaderRow,
    schema: &Schema,
) -> Vec<Result<(), Unmapped>> {
    (0u16..)
        .zip(headers)
        .map(|(col, header)| -> Result<(), Unmapped> {
            let field = schema.find_by_header(header).ok_or(Unmapped::UnknownColumn)?;
            let value = read_cell(row.get(col), field)?;
            if record.set(&field.field_name, value) {
                Ok(())
            } else {
                Err(Unmapped::NotWritable)
            }
        })
        .collect()
}

/// Interpret a cell by its native kind, coerced to the field's declared kind
pub fn read_cell(cell: Option<&Cell>, field: &FieldSchema) -> Result<FieldValue, Unmapped> {
    match cell.map(Cell::resolved) {
        Some(Cell::Text(s)) if !s.is_empty() => from_text(s, field),
        Some(Cell::Number(n)) => from_number(*n, field.declared_type),
        Some(Cell::Boolean(b)) => from_bool(*b, field.declared_type),
        _ => Err(Unmapped::NoValue),
    }
}

fn from_text(text: &str, field: &FieldSchema) -> Result<FieldValue, Unmapped> {
    let value = match field.declared_type {
        FieldKind::Text => Some(FieldValue::Text(text.to_string())),
        FieldKind::Boolean => parse_bool(text).map(FieldValue::Boolean),
        kind @ (FieldKind::Date | FieldKind::DateTime) => {
            parse_datetime(text, field.date_format.as_deref()).map(|dt| temporal(dt, kind))
        }
        FieldKind::Integer => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
                .map(FieldValue::Integer)
        }
        FieldKind::Float => text.trim().parse::<f64>().ok().map(FieldValue::Float),
    };
    value.ok_or(Unmapped::Coercion)
}

fn from_number(n: f64, kind: FieldKind) -> Result<FieldValue, Unmapped> {
    if kind.is_temporal() {
        return serial_to_datetime(n)
            .map(|dt| temporal(dt, kind))
            .ok_or(Unmapped::Coercion);
    }
    let value = match kind {
        FieldKind::Float => Some(FieldValue::Float(n)),
        FieldKind::Integer => integral(n).map(FieldValue::Integer),
        FieldKind::Text => Some(FieldValue::Text(FieldValue::Float(n).to_string())),
        _ => None,
    };
    value.ok_or(Unmapped::Coercion)
}

/// Date fields drop the time of day
fn temporal(dt: NaiveDateTime, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Date => FieldValue::Date(dt.date()),
        _ => FieldValue::DateTime(dt),
    }
}

fn from_bool(b: bool, kind: FieldKind) -> Result<FieldValue, Unmapped> {
    match kind {
        FieldKind::Boolean => Ok(FieldValue::Boolean(b)),
        FieldKind::Text => Ok(FieldValue::Text(b.to_string())),
        _ => Err(Unmapped::Coercion),
    }
}

/// Whole floats within i64 range
fn integral(n: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= LIMIT).then_some(n as i64)
}
