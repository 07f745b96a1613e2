//! Excel exporter implementation - Workbook → .xlsx

use crate::error::{TabulaError, TabulaResult};
use crate::workbook::{Cell, Sheet, Workbook};
use rust_xlsxwriter::{Formula, Worksheet};
use std::io::{Seek, Write};
use std::path::Path;
use tracing::info;

/// Serializes an in-memory workbook to the .xlsx container
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Export the workbook to a file, replacing any existing content
    pub fn export(&self, output_path: &Path) -> TabulaResult<()> {
        let mut xlsx = self.build()?;
        xlsx.save(output_path)?;
        info!(path = %output_path.display(), sheets = self.workbook.sheet_count(), "workbook saved");
        Ok(())
    }

    /// Export the workbook to an in-memory byte buffer
    pub fn to_bytes(&self) -> TabulaResult<Vec<u8>> {
        let mut xlsx = self.build()?;
        let buffer = xlsx.save_to_buffer()?;
        info!(bytes = buffer.len(), sheets = self.workbook.sheet_count(), "workbook serialized");
        Ok(buffer)
    }

    /// Export the workbook to a seekable writer
    pub fn write_to<W: Write + Seek + Send>(&self, writer: W) -> TabulaResult<()> {
        let mut xlsx = self.build()?;
        xlsx.save_to_writer(writer)?;
        Ok(())
    }

    fn build(&self) -> TabulaResult<rust_xlsxwriter::Workbook> {
        let mut xlsx = rust_xlsxwriter::Workbook::new();

        // The container needs one worksheet; the writer adds a blank one when
        // the workbook has none.
        for sheet in self.workbook.sheets() {
            let worksheet = xlsx.add_worksheet();
            worksheet.set_name(sheet.name()).map_err(|e| {
                TabulaError::Export(format!("Failed to set worksheet name '{}': {}", sheet.name(), e))
            })?;
            self.export_sheet(worksheet, sheet)?;
        }

        Ok(xlsx)
    }

    fn export_sheet(&self, worksheet: &mut Worksheet, sheet: &Sheet) -> TabulaResult<()> {
        for (row_idx, row) in sheet.rows() {
            for (col_idx, cell) in row.cells() {
                write_cell(worksheet, row_idx, col_idx, cell).map_err(|e| {
                    TabulaError::Export(format!(
                        "Failed to write cell ({}, {}) of '{}': {}",
                        row_idx,
                        col_idx,
                        sheet.name(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }
}

/// Write a single cell based on its stored type
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    match cell {
        Cell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Cell::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Cell::Formula { expr, cached } => {
            let mut formula = Formula::new(format!("={}", expr));
            if let Some(result) = cached_result(cached) {
                formula = formula.set_result(result);
            }
            worksheet.write_formula(row, col, formula)?;
        }
        // Error values cannot be written directly; keep the literal
        Cell::Error(e) => {
            worksheet.write_string(row, col, e)?;
        }
        Cell::Blank => {}
    }
    Ok(())
}

fn cached_result(cell: &Cell) -> Option<String> {
    match cell.resolved() {
        Cell::Boolean(true) => Some("TRUE".to_string()),
        Cell::Boolean(false) => Some("FALSE".to_string()),
        Cell::Blank => None,
        other => Some(other.to_text()),
    }
}
