//! Record book: the public import/export surface
//!
//! Wraps a [`Workbook`] and runs the row codec over whole record collections.
//! Schemas and header rows are rebuilt on every call.

use crate::codec::{self, decode, encode, read_headers, write_headers};
use crate::error::TabulaResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::schema::{Schema, Tabular};
use crate::types::HeaderRow;
use crate::workbook::{Row, Sheet, SheetRef, Workbook};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use tracing::{debug, info};

/// One entry of a record collection handed to [`RecordBook::create_sheet`].
///
/// Implemented for `&R`, `&Option<R>` and `Option<&R>`, so both plain and
/// sparse collections can be exported; an empty slot consumes no row.
pub trait RecordSlot<'r> {
    type Record: Tabular + 'r;

    fn record(self) -> Option<&'r Self::Record>;
}

impl<'r, R: Tabular> RecordSlot<'r> for &'r R {
    type Record = R;

    fn record(self) -> Option<&'r R> {
        Some(self)
    }
}

impl<'r, R: Tabular> RecordSlot<'r> for &'r Option<R> {
    type Record = R;

    fn record(self) -> Option<&'r R> {
        self.as_ref()
    }
}

impl<'r, R: Tabular> RecordSlot<'r> for Option<&'r R> {
    type Record = R;

    fn record(self) -> Option<&'r R> {
        self
    }
}

/// A workbook plus typed record import/export over its sheets
#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    workbook: Workbook,
}

impl RecordBook {
    /// Empty workbook, written as .xlsx on export
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_workbook(workbook: Workbook) -> Self {
        Self { workbook }
    }

    /// Open a .xlsx or .xls file
    pub fn open<P: AsRef<Path>>(path: P) -> TabulaResult<Self> {
        ExcelImporter::from_path(path)?.import().map(Self::from_workbook)
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> TabulaResult<Self> {
        ExcelImporter::new(data.into()).import().map(Self::from_workbook)
    }

    pub fn from_reader<R: Read>(reader: R) -> TabulaResult<Self> {
        ExcelImporter::from_reader(reader)?.import().map(Self::from_workbook)
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_count()
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.sheet_names()
    }

    //==========================================================================
    // Inspection
    //==========================================================================

    pub fn sheet_exists<'a>(&self, sheet: impl Into<SheetRef<'a>>) -> bool {
        self.workbook.sheet(sheet).is_some()
    }

    /// Header row of a sheet; empty when the sheet or row 0 is missing
    pub fn headers<'a>(&self, sheet: impl Into<SheetRef<'a>>) -> HeaderRow {
        self.workbook
            .sheet(sheet)
            .map(read_headers)
            .unwrap_or_default()
    }

    /// Check that every named column is present in the sheet's header row
    pub fn verify_columns<'a, I, S>(&self, sheet: impl Into<SheetRef<'a>>, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.workbook
            .sheet(sheet)
            .is_some_and(|s| codec::verify(s, required))
    }

    /// Check a comma-separated list of column names
    pub fn verify_columns_list<'a>(&self, sheet: impl Into<SheetRef<'a>>, keys: &str) -> bool {
        self.workbook
            .sheet(sheet)
            .is_some_and(|s| codec::verify_list(s, keys))
    }

    /// Check the `Required` columns of a record type
    pub fn verify_columns_for<'a, R: Tabular>(&self, sheet: impl Into<SheetRef<'a>>) -> bool {
        let schema = Schema::of::<R>();
        self.workbook
            .sheet(sheet)
            .is_some_and(|s| codec::verify_schema(s, &schema))
    }

    //==========================================================================
    // Export
    //==========================================================================

    /// Name for a sheet created without one: `Sheet{n+1}`, skipping taken names
    fn next_sheet_name(&self) -> String {
        (self.workbook.sheet_count() + 1..)
            .map(|n| format!("Sheet{}", n))
            .find(|name| self.workbook.sheet(name.as_str()).is_none())
            .unwrap_or_default()
    }

    fn create_headed_sheet(
        &mut self,
        schema: &Schema,
        sheet_name: Option<&str>,
    ) -> TabulaResult<(&mut Sheet, HeaderRow)> {
        let name = match sheet_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.next_sheet_name(),
        };
        let sheet = self.workbook.create_sheet(&name)?;
        let headers = write_headers(sheet, schema);
        Ok((sheet, headers))
    }

    /// Create a sheet holding only the header row of a record type
    pub fn create_template<R: Tabular>(
        &mut self,
        sheet_name: Option<&str>,
    ) -> TabulaResult<&Sheet> {
        let schema = Schema::of::<R>();
        let (sheet, headers) = self.create_headed_sheet(&schema, sheet_name)?;
        debug!(sheet = %sheet.name(), columns = headers.len(), "template sheet created");
        Ok(&*sheet)
    }

    /// Create a sheet with a header row and one data row per record.
    ///
    /// Accepts `&[R]` or `&[Option<R>]`; `None` entries consume no row. An
    /// empty collection creates nothing and returns `Ok(None)`.
    pub fn create_sheet<'r, I>(
        &mut self,
        records: I,
        sheet_name: Option<&str>,
    ) -> TabulaResult<Option<&Sheet>>
    where
        I: IntoIterator,
        I::Item: RecordSlot<'r>,
    {
        let records: Vec<Option<&'r <I::Item as RecordSlot<'r>>::Record>> =
            records.into_iter().map(RecordSlot::record).collect();
        if records.is_empty() {
            debug!("empty record collection; no sheet created");
            return Ok(None);
        }

        let schema = Schema::of::<<I::Item as RecordSlot<'r>>::Record>();
        let (sheet, headers) = self.create_headed_sheet(&schema, sheet_name)?;
        for (row_idx, record) in (1u32..).zip(records.into_iter().flatten()) {
            sheet.set_row(row_idx, encode(record, &schema, &headers));
        }
        info!(
            sheet = %sheet.name(),
            rows = sheet.last_row_num().unwrap_or(0),
            "sheet exported"
        );

        Ok(Some(&*sheet))
    }

    /// Serialize the workbook to a file
    pub fn export_file<P: AsRef<Path>>(&self, path: P) -> TabulaResult<()> {
        ExcelExporter::new(&self.workbook).export(path.as_ref())
    }

    /// Serialize the workbook to bytes
    pub fn export_bytes(&self) -> TabulaResult<Vec<u8>> {
        ExcelExporter::new(&self.workbook).to_bytes()
    }

    /// Serialize the workbook to an in-memory stream positioned at the start
    pub fn export_stream(&self) -> TabulaResult<Cursor<Vec<u8>>> {
        self.export_bytes().map(Cursor::new)
    }

    /// Serialize the workbook to a caller-supplied seekable writer
    pub fn export_to_writer<W: Write + Seek + Send>(&self, writer: W) -> TabulaResult<()> {
        ExcelExporter::new(&self.workbook).write_to(writer)
    }

    /// Create a sheet from `records`, then write the workbook to `path`
    pub fn export_file_with<'r, I, P>(
        &mut self,
        path: P,
        records: I,
        sheet_name: Option<&str>,
    ) -> TabulaResult<()>
    where
        I: IntoIterator,
        I::Item: RecordSlot<'r>,
        P: AsRef<Path>,
    {
        self.create_sheet(records, sheet_name)?;
        self.export_file(path)
    }

    /// Create a sheet from `records`, then serialize the workbook to bytes
    pub fn export_bytes_with<'r, I>(
        &mut self,
        records: I,
        sheet_name: Option<&str>,
    ) -> TabulaResult<Vec<u8>>
    where
        I: IntoIterator,
        I::Item: RecordSlot<'r>,
    {
        self.create_sheet(records, sheet_name)?;
        self.export_bytes()
    }

    /// Create a sheet from `records`, then serialize the workbook to a stream
    pub fn export_stream_with<'r, I>(
        &mut self,
        records: I,
        sheet_name: Option<&str>,
    ) -> TabulaResult<Cursor<Vec<u8>>>
    where
        I: IntoIterator,
        I::Item: RecordSlot<'r>,
    {
        self.create_sheet(records, sheet_name)?;
        self.export_stream()
    }

    //==========================================================================
    // Import
    //==========================================================================

    /// Decode every data row of a sheet into records.
    ///
    /// Rows that map no column are dropped; a missing sheet yields no records.
    pub fn import_sheet<'a, R: Tabular>(&self, sheet: impl Into<SheetRef<'a>>) -> Vec<R> {
        let sheet_ref = sheet.into();
        let Some(sheet) = self.workbook.sheet(sheet_ref) else {
            debug!(sheet = %sheet_ref, "sheet not found; nothing imported");
            return Vec::new();
        };

        let headers = read_headers(sheet);
        if headers.is_empty() {
            return Vec::new();
        }
        let Some(last_row) = sheet.last_row_num() else {
            return Vec::new();
        };

        let schema = Schema::of::<R>();
        let blank = Row::new();
        let records: Vec<R> = (1..=last_row)
            .filter_map(|i| decode(sheet.row(i).unwrap_or(&blank), &headers, &schema))
            .collect();

        let dropped = last_row as usize - records.len();
        if dropped > 0 {
            debug!(sheet = %sheet.name(), dropped, "rows without mapped columns dropped");
        }
        info!(sheet = %sheet.name(), records = records.len(), "sheet imported");

        records
    }

    /// Import the first sheet
    pub fn import_first<R: Tabular>(&self) -> Vec<R> {
        self.import_sheet(0usize)
    }
}
