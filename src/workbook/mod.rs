//! In-memory workbook model
//!
//! A [`Workbook`] is an ordered list of named [`Sheet`]s, each a sparse grid
//! of typed [`Cell`]s addressed by 0-based row and column. The excel module
//! fills it from .xlsx/.xls bytes and serializes it back to .xlsx.

use crate::error::{TabulaError, TabulaResult};
use crate::types::FieldValue;
use std::collections::BTreeMap;
use std::fmt;

//==============================================================================
// Cells
//==============================================================================

/// A typed cell as stored in a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Formula expression (without leading `=`) and its cached result
    Formula { expr: String, cached: Box<Cell> },
    /// Error literal such as `#DIV/0!`
    Error(String),
    /// A cell that exists but holds no value
    Blank,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn formula(expr: impl Into<String>, cached: Cell) -> Self {
        let expr = expr.into();
        let expr = expr.strip_prefix('=').map(str::to_string).unwrap_or(expr);
        Cell::Formula {
            expr,
            cached: Box::new(cached),
        }
    }

    /// The stored value with formulas resolved to their cached result
    pub fn resolved(&self) -> &Cell {
        match self {
            Cell::Formula { cached, .. } => cached.resolved(),
            other => other,
        }
    }

    /// Natural value of the cell, without any schema coercion
    pub fn value(&self) -> Option<FieldValue> {
        match self.resolved() {
            Cell::Text(s) => Some(FieldValue::Text(s.clone())),
            Cell::Number(n) => Some(FieldValue::Float(*n)),
            Cell::Boolean(b) => Some(FieldValue::Boolean(*b)),
            Cell::Error(e) => Some(FieldValue::Text(e.clone())),
            Cell::Blank | Cell::Formula { .. } => None,
        }
    }

    /// Text form used when the cell is read as a header
    pub fn to_text(&self) -> String {
        self.value().map(|v| v.to_string()).unwrap_or_default()
    }
}

//==============================================================================
// Rows and Sheets
//==============================================================================

/// Sparse row of cells keyed by column index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<u16, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, col: u16) -> Option<&Cell> {
        self.cells.get(&col)
    }

    pub fn set(&mut self, col: u16, cell: Cell) {
        self.cells.insert(col, cell);
    }

    /// One past the last populated column; 0 for an empty row
    pub fn last_cell_num(&self) -> u16 {
        self.cells
            .keys()
            .next_back()
            .map(|c| c.saturating_add(1))
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = (u16, &Cell)> {
        self.cells.iter().map(|(c, cell)| (*c, cell))
    }
}

impl FromIterator<(u16, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (u16, Cell)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// One named grid of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(&index)
    }

    /// Create (or replace) the row at `index` and return it empty
    pub fn create_row(&mut self, index: u32) -> &mut Row {
        self.rows.insert(index, Row::new());
        self.rows.entry(index).or_default()
    }

    pub fn set_row(&mut self, index: u32, row: Row) {
        self.rows.insert(index, row);
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(col))
    }

    pub fn set_cell(&mut self, row: u32, col: u16, cell: Cell) {
        self.rows.entry(row).or_default().set(col, cell);
    }

    /// Index of the last row present; `None` for an empty sheet
    pub fn last_row_num(&self) -> Option<u32> {
        self.rows.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows.iter().map(|(r, row)| (*r, row))
    }
}

//==============================================================================
// Workbook
//==============================================================================

/// Container format a workbook was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML zip (.xlsx)
    Xlsx,
    /// Legacy BIFF8 compound file (.xls)
    Xls,
}

impl WorkbookFormat {
    pub fn name(self) -> &'static str {
        match self {
            WorkbookFormat::Xlsx => "xlsx",
            WorkbookFormat::Xls => "xls",
        }
    }
}

/// Sheet address: 0-based position or name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetRef<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for SheetRef<'_> {
    fn from(index: usize) -> Self {
        SheetRef::Index(index)
    }
}

impl<'a> From<&'a str> for SheetRef<'a> {
    fn from(name: &'a str) -> Self {
        SheetRef::Name(name)
    }
}

impl<'a> From<&'a String> for SheetRef<'a> {
    fn from(name: &'a String) -> Self {
        SheetRef::Name(name)
    }
}

impl fmt::Display for SheetRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetRef::Index(i) => write!(f, "#{}", i),
            SheetRef::Name(n) => f.write_str(n),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    source_format: Option<WorkbookFormat>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_format(format: WorkbookFormat) -> Self {
        Self {
            sheets: Vec::new(),
            source_format: Some(format),
        }
    }

    /// Format the workbook was loaded from; `None` when built in memory
    pub fn source_format(&self) -> Option<WorkbookFormat> {
        self.source_format
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    fn position<'a>(&self, sheet: impl Into<SheetRef<'a>>) -> Option<usize> {
        match sheet.into() {
            SheetRef::Index(i) => (i < self.sheets.len()).then_some(i),
            SheetRef::Name(name) => self.sheets.iter().position(|s| s.name == name),
        }
    }

    pub fn sheet<'a>(&self, sheet: impl Into<SheetRef<'a>>) -> Option<&Sheet> {
        self.position(sheet).map(|i| &self.sheets[i])
    }

    pub fn sheet_mut<'a>(&mut self, sheet: impl Into<SheetRef<'a>>) -> Option<&mut Sheet> {
        self.position(sheet).map(move |i| &mut self.sheets[i])
    }

    /// Append a new empty sheet. Names must be unique within the workbook.
    pub fn create_sheet(&mut self, name: &str) -> TabulaResult<&mut Sheet> {
        self.push_sheet(Sheet::new(name))
    }

    pub(crate) fn push_sheet(&mut self, sheet: Sheet) -> TabulaResult<&mut Sheet> {
        if self.position(sheet.name()).is_some() {
            return Err(TabulaError::DuplicateSheet(sheet.name));
        }
        tracing::debug!(sheet = %sheet.name, index = self.sheets.len(), "sheet created");
        self.sheets.push(sheet);
        let last = self.sheets.len() - 1;
        Ok(&mut self.sheets[last])
    }
}
