//! Excel importer implementation - .xlsx/.xls bytes → Workbook

use crate::error::{TabulaError, TabulaResult};
use crate::workbook::{Cell, Sheet, Workbook, WorkbookFormat};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::fmt::Display;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};

/// Container formats tried on open, newest first
pub const PROBE_ORDER: [WorkbookFormat; 2] = [WorkbookFormat::Xlsx, WorkbookFormat::Xls];

/// Result of offering the input to one container reader
#[derive(Debug)]
pub enum Probe {
    Recognized(Workbook),
    NotRecognized(String),
}

/// Excel importer for loading workbook bytes into memory
pub struct ExcelImporter {
    data: Vec<u8>,
}

impl ExcelImporter {
    /// Create an importer over in-memory workbook bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read the whole file; the handle is closed before returning
    pub fn from_path<P: AsRef<Path>>(path: P) -> TabulaResult<Self> {
        Ok(Self::new(std::fs::read(path)?))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> TabulaResult<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::new(data))
    }

    /// Import the workbook, trying each container format in [`PROBE_ORDER`]
    pub fn import(&self) -> TabulaResult<Workbook> {
        let mut rejections = Vec::new();
        for format in PROBE_ORDER {
            match self.probe(format) {
                Probe::Recognized(workbook) => {
                    info!(
                        format = format.name(),
                        sheets = workbook.sheet_count(),
                        bytes = self.data.len(),
                        "workbook loaded"
                    );
                    return Ok(workbook);
                }
                Probe::NotRecognized(reason) => {
                    debug!(format = format.name(), %reason, "format probe rejected input");
                    rejections.push(format!("{}: {}", format.name(), reason));
                }
            }
        }
        Err(TabulaError::UnrecognizedFormat(rejections.join("; ")))
    }

    /// Offer the input to a single container reader
    pub fn probe(&self, format: WorkbookFormat) -> Probe {
        let cursor = Cursor::new(self.data.as_slice());
        match format {
            WorkbookFormat::Xlsx => match Xlsx::new(cursor) {
                Ok(mut reader) => Probe::Recognized(read_sheets(&mut reader, format)),
                Err(e) => Probe::NotRecognized(e.to_string()),
            },
            WorkbookFormat::Xls => match Xls::new(cursor) {
                Ok(mut reader) => Probe::Recognized(read_sheets(&mut reader, format)),
                Err(e) => Probe::NotRecognized(e.to_string()),
            },
        }
    }
}

/// Copy every sheet of an opened container into a [`Workbook`]
fn read_sheets<RS, R>(reader: &mut R, format: WorkbookFormat) -> Workbook
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let mut workbook = Workbook::with_format(format);

    for sheet_name in reader.sheet_names() {
        let mut sheet = Sheet::new(sheet_name.as_str());

        match reader.worksheet_range(&sheet_name) {
            Ok(range) => fill_values(&mut sheet, &range),
            Err(e) => warn!(sheet = %sheet_name, error = %e, "unreadable sheet imported as empty"),
        }

        if let Ok(formulas) = reader.worksheet_formula(&sheet_name) {
            fill_formulas(&mut sheet, &formulas);
        }

        // Container sheet names are already unique
        if let Err(e) = workbook.push_sheet(sheet) {
            warn!(error = %e, "skipping repeated sheet");
        }
    }

    workbook
}

fn absolute<T>(range: &Range<T>, row: usize, col: usize) -> Option<(u32, u16)>
where
    T: calamine::CellType,
{
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let row = u32::try_from(row).ok()?.checked_add(start_row)?;
    let col = u16::try_from(col as u64 + start_col as u64).ok()?;
    Some((row, col))
}

fn fill_values(sheet: &mut Sheet, range: &Range<Data>) {
    for (row, col, data) in range.used_cells() {
        let Some((row, col)) = absolute(range, row, col) else {
            continue;
        };
        if let Some(cell) = convert_data(data) {
            sheet.set_cell(row, col, cell);
        }
    }
}

fn fill_formulas(sheet: &mut Sheet, range: &Range<String>) {
    for (row, col, expr) in range.used_cells() {
        if expr.is_empty() {
            continue;
        }
        let Some((row, col)) = absolute(range, row, col) else {
            continue;
        };
        let cached = sheet.cell(row, col).cloned().unwrap_or(Cell::Blank);
        sheet.set_cell(row, col, Cell::formula(expr.as_str(), cached));
    }
}

/// Convert calamine Data to a sheet cell; `None` for empty cells
fn convert_data(data: &Data) -> Option<Cell> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(Cell::Text(s.clone())),
        Data::Float(f) => Some(Cell::Number(*f)),
        Data::Int(i) => Some(Cell::Number(*i as f64)),
        Data::Bool(b) => Some(Cell::Boolean(*b)),
        // Date-formatted numbers keep their serial value
        Data::DateTime(dt) => Some(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Cell::Text(s.clone())),
        Data::Error(e) => Some(Cell::Error(e.to_string())),
    }
}
