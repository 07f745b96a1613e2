//! Required-column checks against a sheet's header row

use super::header::read_headers;
use crate::schema::Schema;
use crate::workbook::Sheet;
use std::collections::HashSet;

/// True when every required name appears in the sheet's header row.
///
/// A sheet without headers never validates. Order and duplicates on either
/// side are irrelevant.
pub fn verify<I, S>(sheet: &Sheet, required: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let headers = read_headers(sheet);
    if headers.is_empty() {
        return false;
    }
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    required
        .into_iter()
        .all(|name| present.contains(name.as_ref()))
}

/// Check the `Required` columns of a schema
pub fn verify_schema(sheet: &Sheet, schema: &Schema) -> bool {
    verify(sheet, schema.required_columns())
}

/// Check a comma-separated key list; an empty list fails closed
pub fn verify_list(sheet: &Sheet, keys: &str) -> bool {
    if keys.is_empty() {
        return false;
    }
    verify(sheet, keys.split(','))
}
