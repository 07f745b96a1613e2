use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

//==============================================================================
// Field Kinds and Policies
//==============================================================================

/// Semantic scalar kind of a record field.
///
/// Drives both the cell type chosen on export and the coercion applied to a
/// cell on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Float,
    Boolean,
    Text,
    /// Calendar date without a time component
    Date,
    DateTime,
}

impl FieldKind {
    /// Numeric kinds are written as numeric cells
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Float)
    }

    /// Date kinds accept serial-number cells on import
    pub fn is_temporal(self) -> bool {
        matches!(self, FieldKind::Date | FieldKind::DateTime)
    }
}

/// Per-field rule governing export inclusion and column validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Exported, imported, and must be present for a sheet to validate
    Required,
    /// Never exported
    Ignorable,
    #[default]
    Normal,
}

//==============================================================================
// Field Values
//==============================================================================

/// A single scalar read from or written to a record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// The kind this value naturally belongs to
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::DateTime(_) => FieldKind::DateTime,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::Date(d) => d.and_hms_opt(0, 0, 0),
            _ => None,
        }
    }
}

/// Default text form of a value; every exported cell goes through this.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

//==============================================================================
// Field Schema
//==============================================================================

/// Export/import description of one record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub field_name: String,
    /// Header alias; `field_name` is used when absent
    pub column_name: Option<String>,
    pub declared_type: FieldKind,
    pub policy: Policy,
    /// Display pattern, only applied when writing date fields
    pub date_format: Option<String>,
}

impl FieldSchema {
    pub fn new(field_name: impl Into<String>, declared_type: FieldKind) -> Self {
        Self {
            field_name: field_name.into(),
            column_name: None,
            declared_type,
            policy: Policy::Normal,
            date_format: None,
        }
    }

    pub fn column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn required(self) -> Self {
        self.policy(Policy::Required)
    }

    pub fn ignorable(self) -> Self {
        self.policy(Policy::Ignorable)
    }

    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = Some(pattern.into());
        self
    }

    /// Header text written for this field
    pub fn header(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.field_name)
    }

    /// Import-side match: alias or raw field name
    pub fn matches_header(&self, header: &str) -> bool {
        self.column_name.as_deref() == Some(header) || self.field_name == header
    }

    pub fn is_exported(&self) -> bool {
        self.policy != Policy::Ignorable
    }

    pub fn is_required(&self) -> bool {
        self.policy == Policy::Required
    }
}

/// Header strings of a sheet's row 0, in physical column order.
pub type HeaderRow = Vec<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_falls_back_to_field_name() {
        let plain = FieldSchema::new("qty", FieldKind::Integer);
        assert_eq!(plain.header(), "qty");

        let aliased = FieldSchema::new("qty", FieldKind::Integer).column("Quantity");
        assert_eq!(aliased.header(), "Quantity");
        assert!(aliased.matches_header("Quantity"));
        assert!(aliased.matches_header("qty"));
        assert!(!aliased.matches_header("quantity"));
    }

    #[test]
    fn test_policy_defaults_to_normal() {
        let field = FieldSchema::new("id", FieldKind::Text);
        assert_eq!(field.policy, Policy::Normal);
        assert!(field.is_exported());
        assert!(!field.is_required());
        assert!(!field.clone().ignorable().is_exported());
        assert!(field.required().is_required());
    }

    #[test]
    fn test_display_default_text_forms() {
        assert_eq!(FieldValue::Integer(3).to_string(), "3");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Float(4.0).to_string(), "4");
        assert_eq!(FieldValue::Boolean(true).to_string(), "true");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "2024-01-05");
        let dt = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(FieldValue::DateTime(dt).to_string(), "2024-01-05 08:30:00");
        let dt = date.and_hms_milli_opt(8, 30, 0, 250).unwrap();
        assert_eq!(FieldValue::DateTime(dt).to_string(), "2024-01-05 08:30:00.250");
    }

    #[test]
    fn test_value_accessors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(FieldValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(FieldValue::Float(7.5).as_i64(), None);
        assert_eq!(FieldValue::Date(date).as_datetime(), date.and_hms_opt(0, 0, 0));
        assert_eq!(FieldValue::from("x").into_text(), Some("x".to_string()));
        assert_eq!(FieldValue::from(true).kind(), FieldKind::Boolean);
    }
}
