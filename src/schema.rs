//! Schema extraction for record types
//!
//! A record type describes its fields once through [`Tabular::schema`]; the
//! codec asks for a fresh [`Schema`] at the start of every import or export.

use crate::types::{FieldKind, FieldSchema, FieldValue, Policy};
use std::collections::HashSet;

/// A record type that can be mapped to and from sheet rows.
///
/// `Default` provides the blank instance each decoded row starts from.
pub trait Tabular: Default {
    /// Ordered field description, in declaration order
    fn schema() -> Schema;

    /// Read a field; `None` when the field is unknown or its value is null
    fn get(&self, field: &str) -> Option<FieldValue>;

    /// Write a field; `false` when the field is unknown or not writable
    fn set(&mut self, field: &str, value: FieldValue) -> bool;
}

/// Ordered list of field schemas for one record type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Derive the schema of a record type
    pub fn of<R: Tabular>() -> Self {
        R::schema()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields written on export, in declaration order
    pub fn export_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.is_exported())
    }

    /// Header names of every `Required` field
    pub fn required_columns(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.header())
            .collect()
    }

    /// First field whose alias or name equals `header`
    pub fn find_by_header(&self, header: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.matches_header(header))
    }
}

/// Registers field descriptions in declaration order.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSchema>,
    seen: HashSet<String>,
}

impl SchemaBuilder {
    /// Add a fully described field. A repeated field name is ignored.
    pub fn field(mut self, field: FieldSchema) -> Self {
        if self.seen.insert(field.field_name.clone()) {
            self.fields.push(field);
        } else {
            tracing::warn!(field = %field.field_name, "duplicate field name ignored");
        }
        self
    }

    /// Add a field with no column metadata (`Normal` policy, no alias)
    pub fn plain(self, field_name: &str, kind: FieldKind) -> Self {
        self.field(FieldSchema::new(field_name, kind))
    }

    /// Add a field with an explicit header alias and policy
    pub fn column(self, field_name: &str, kind: FieldKind, column: &str, policy: Policy) -> Self {
        self.field(FieldSchema::new(field_name, kind).column(column).policy(policy))
    }

    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::builder()
            .field(FieldSchema::new("id", FieldKind::Text).required())
            .plain("qty", FieldKind::Integer)
            .column("secret", FieldKind::Text, "Secret", Policy::Ignorable)
            .field(
                FieldSchema::new("due", FieldKind::Date)
                    .column("Due Date")
                    .required()
                    .date_format("yyyy-MM-dd"),
            )
            .build()
    }

    #[test]
    fn test_export_fields_skip_ignorable_in_order() {
        let schema = sample();
        let names: Vec<&str> = schema.export_fields().map(|f| f.header()).collect();
        assert_eq!(names, vec!["id", "qty", "Due Date"]);
    }

    #[test]
    fn test_required_columns_use_header_text() {
        assert_eq!(sample().required_columns(), vec!["id", "Due Date"]);
    }

    #[test]
    fn test_find_by_header_matches_alias_or_name() {
        let schema = sample();
        assert_eq!(schema.find_by_header("Due Date").unwrap().field_name, "due");
        assert_eq!(schema.find_by_header("due").unwrap().field_name, "due");
        assert!(schema.find_by_header("unknown").is_none());
    }

    #[test]
    fn test_duplicate_field_names_keep_first() {
        let schema = Schema::builder()
            .plain("id", FieldKind::Text)
            .plain("id", FieldKind::Integer)
            .build();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.fields()[0].declared_type, FieldKind::Text);
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::builder().build();
        assert!(schema.is_empty());
        assert_eq!(schema.export_fields().count(), 0);
        assert!(schema.required_columns().is_empty());
    }
}
