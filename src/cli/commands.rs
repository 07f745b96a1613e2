use crate::book::RecordBook;
use crate::codec::read_headers;
use crate::error::{TabulaError, TabulaResult};
use crate::workbook::{Sheet, SheetRef};
use colored::Colorize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Resolve `--sheet`, defaulting to the first sheet
fn select_sheet<'a>(book: &'a RecordBook, sheet: Option<&'a str>) -> TabulaResult<&'a Sheet> {
    let sheet_ref = sheet.map_or(SheetRef::Index(0), SheetRef::Name);
    book.workbook()
        .sheet(sheet_ref)
        .ok_or_else(|| TabulaError::Validation(format!("Sheet not found: {}", sheet_ref)))
}

/// Execute the sheets command
pub fn sheets(file: PathBuf) -> TabulaResult<()> {
    println!("{}", "📒 Tabula - Sheets".bold().green());
    println!("   File: {}\n", file.display());

    let book = RecordBook::open(&file)?;

    if book.sheet_count() == 0 {
        println!("{}", "   (no sheets)".dimmed());
        return Ok(());
    }

    for (index, sheet) in book.workbook().sheets().iter().enumerate() {
        let rows = sheet.last_row_num().map_or(0, |last| last + 1);
        println!(
            "   {} {} {}",
            format!("[{}]", index).dimmed(),
            sheet.name().bright_blue().bold(),
            format!("({} rows)", rows).dimmed()
        );
    }
    println!();

    Ok(())
}

/// Execute the headers command
pub fn headers(file: PathBuf, sheet: Option<String>) -> TabulaResult<()> {
    let book = RecordBook::open(&file)?;
    let sheet = select_sheet(&book, sheet.as_deref())?;

    println!("{}", "📒 Tabula - Headers".bold().green());
    println!("   File:  {}", file.display());
    println!("   Sheet: {}\n", sheet.name().bright_blue());

    let headers = read_headers(sheet);
    if headers.is_empty() {
        println!("{}", "   (no header row)".dimmed());
        return Ok(());
    }

    for (col, header) in headers.iter().enumerate() {
        println!("   {:>3}  {}", col, header);
    }
    println!();

    Ok(())
}

/// Execute the verify command
pub fn verify(file: PathBuf, columns: Vec<String>, sheet: Option<String>) -> TabulaResult<()> {
    println!("{}", "🔍 Tabula - Verifying columns".bold().green());
    println!("   File:    {}", file.display());
    println!("   Columns: {}\n", columns.join(", "));

    let book = RecordBook::open(&file)?;
    let sheet = select_sheet(&book, sheet.as_deref())?;

    if book.verify_columns(sheet.name(), &columns) {
        println!(
            "{}",
            format!("✅ All {} columns present in '{}'", columns.len(), sheet.name())
                .bold()
                .green()
        );
        return Ok(());
    }

    let headers = read_headers(sheet);
    let missing: Vec<&str> = columns
        .iter()
        .map(String::as_str)
        .filter(|c| !headers.iter().any(|h| h == c))
        .collect();

    if headers.is_empty() {
        println!("{}", "❌ Sheet has no header row".bold().red());
    } else {
        println!("{}", "❌ Missing columns:".bold().red());
        for column in &missing {
            println!("   - {}", column.red());
        }
    }
    println!();

    Err(TabulaError::Validation(format!(
        "Sheet '{}' is missing required columns",
        sheet.name()
    )))
}

/// Execute the dump command: data rows as a JSON array keyed by header
pub fn dump(file: PathBuf, sheet: Option<String>) -> TabulaResult<()> {
    let book = RecordBook::open(&file)?;
    let sheet = select_sheet(&book, sheet.as_deref())?;
    let headers = read_headers(sheet);

    let rows: Vec<Value> = sheet
        .rows()
        .filter(|(index, _)| *index > 0)
        .map(|(_, row)| -> Result<Value, serde_json::Error> {
            let mut object = Map::new();
            for (col, header) in (0u16..).zip(&headers) {
                if header.is_empty() {
                    continue;
                }
                let value = row
                    .get(col)
                    .and_then(|cell| cell.value())
                    .map_or(Ok(Value::Null), serde_json::to_value)?;
                object.insert(header.clone(), value);
            }
            Ok(Value::Object(object))
        })
        .collect::<Result<_, serde_json::Error>>()
        .map_err(|e| TabulaError::Export(format!("Failed to encode rows as JSON: {}", e)))?;

    let json = serde_json::to_string_pretty(&rows)
        .map_err(|e| TabulaError::Export(format!("Failed to encode rows as JSON: {}", e)))?;
    println!("{}", json);

    Ok(())
}

/// Execute the convert command: re-serialize any readable workbook as .xlsx
pub fn convert(input: PathBuf, output: PathBuf, verbose: bool) -> TabulaResult<()> {
    println!("{}", "📒 Tabula - Convert".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let book = RecordBook::open(&input)?;

    if verbose {
        if let Some(format) = book.workbook().source_format() {
            println!("   Format: {}", format.name());
        }
        for name in book.sheet_names() {
            println!("   📄 Sheet: {}", name.bright_blue());
        }
        println!();
        println!("{}", "💾 Writing .xlsx...".cyan());
    }

    book.export_file(&output)?;

    println!("{}", "✅ Convert Complete!".bold().green());
    println!("   {} sheets written to {}\n", book.sheet_count(), output.display());

    Ok(())
}
