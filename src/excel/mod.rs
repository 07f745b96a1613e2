//! Excel container I/O
//!
//! - Import: .xlsx/.xls bytes → [`Workbook`](crate::workbook::Workbook) (calamine)
//! - Export: [`Workbook`](crate::workbook::Workbook) → .xlsx (rust_xlsxwriter)
//! - Serial date and date pattern helpers shared by the row codec

pub mod dates;
mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::{ExcelImporter, Probe, PROBE_ORDER};
