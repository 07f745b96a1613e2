//! Tabula - schema-driven record import/export for spreadsheet workbooks
//!
//! Records describe their columns through the [`Tabular`] trait. A
//! [`RecordBook`] writes collections of records as sheets (header row plus
//! one row per record) and reads sheets back into records by matching
//! header text against field schemas.
//!
//! # Features
//!
//! - Header aliases and per-field export policy
//! - Typed cells: numbers, booleans, text and pattern-formatted dates
//! - Lenient import: blank and foreign rows are skipped, bad cells ignored
//! - Modern (.xlsx) and legacy (.xls) input, .xlsx output
//!
//! # Example
//!
//! ```no_run
//! use royalbit_tabula::{FieldKind, FieldSchema, FieldValue, RecordBook, Schema, Tabular};
//!
//! #[derive(Default)]
//! struct Order {
//!     id: String,
//!     qty: i64,
//! }
//!
//! impl Tabular for Order {
//!     fn schema() -> Schema {
//!         Schema::builder()
//!             .field(FieldSchema::new("id", FieldKind::Text).required())
//!             .field(FieldSchema::new("qty", FieldKind::Integer).column("Quantity"))
//!             .build()
//!     }
//!
//!     fn get(&self, field: &str) -> Option<FieldValue> {
//!         match field {
//!             "id" => Some(self.id.as_str().into()),
//!             "qty" => Some(self.qty.into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set(&mut self, field: &str, value: FieldValue) -> bool {
//!         match (field, value) {
//!             ("id", FieldValue::Text(s)) => self.id = s,
//!             ("qty", FieldValue::Integer(n)) => self.qty = n,
//!             _ => return false,
//!         }
//!         true
//!     }
//! }
//!
//! let orders = vec![Order { id: "A1".into(), qty: 3 }];
//! let mut book = RecordBook::new();
//! book.export_file_with("orders.xlsx", &orders, Some("Orders"))?;
//!
//! let loaded = RecordBook::open("orders.xlsx")?;
//! let back: Vec<Order> = loaded.import_sheet("Orders");
//! println!("Imported {} orders", back.len());
//! # Ok::<(), royalbit_tabula::TabulaError>(())
//! ```

pub mod book;
pub mod cli;
pub mod codec;
pub mod error;
pub mod excel;
pub mod schema;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use book::{RecordBook, RecordSlot};
pub use error::{TabulaError, TabulaResult};
pub use schema::{Schema, SchemaBuilder, Tabular};
pub use types::{FieldKind, FieldSchema, FieldValue, HeaderRow, Policy};
pub use workbook::{Cell, Row, Sheet, SheetRef, Workbook};
