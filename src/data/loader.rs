use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::{Duration, NaiveDateTime, Timelike};
use thiserror::Error;

use super::model::Table;

// ---------------------------------------------------------------------------
// Errors shown to the user verbatim
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Please select a file.")]
    NoFileSelected,
    #[error("Unsupported file format. Please select a .csv, .xlsx, or .xls file.")]
    UnsupportedFormat,
    #[error("The selected file contains no data.")]
    EmptySource,
    #[error("The workbook contains no worksheets.")]
    NoWorksheet,
}

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" => Ok(SourceFormat::Xlsx),
            "xls" => Ok(SourceFormat::Xls),
            _ => Err(ImportError::UnsupportedFormat),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma-separated text, first line is the header
/// * `.xlsx` / `.xls` – first worksheet, converted to CSV and parsed the same way
pub fn load_file(path: &Path) -> Result<Table> {
    match SourceFormat::from_path(path)? {
        SourceFormat::Csv => load_csv(path),
        SourceFormat::Xlsx | SourceFormat::Xls => load_workbook(path),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path).context("reading CSV file")?;
    let text = String::from_utf8_lossy(&bytes);
    parse_csv_text(&text)
}

/// Parse CSV text into a [`Table`].
///
/// The first record is the header. Records may be shorter or longer than the
/// header; blank records are skipped.
pub fn parse_csv_text(text: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records().filter(|r| match r {
        Ok(record) => !is_blank(record),
        Err(_) => true,
    });

    let headers: Vec<String> = match records.next() {
        Some(first) => first
            .context("reading CSV header")?
            .iter()
            .map(|h| h.to_string())
            .collect(),
        None => return Err(ImportError::EmptySource.into()),
    };

    let mut rows = Vec::new();
    for (row_no, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(Table::new(headers, rows))
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Spreadsheets
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::NoWorksheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("reading worksheet `{sheet_name}`"))?;

    log::debug!(
        "Converting worksheet `{sheet_name}` ({} x {}) to CSV",
        range.height(),
        range.width()
    );
    let text = sheet_to_csv(&range)?;
    parse_csv_text(&text)
}

/// Render a worksheet range as CSV text, one line per sheet row.
pub fn sheet_to_csv(range: &Range<Data>) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in range.rows() {
        writer
            .write_record(row.iter().map(cell_text))
            .context("writing CSV record")?;
    }

    let bytes = writer.into_inner().context("flushing CSV buffer")?;
    String::from_utf8(bytes).context("worksheet CSV is not UTF-8")
}

fn cell_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::String(v) => v.clone(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(v) => excel_datetime_text(v),
        Data::DateTimeIso(v) => v.clone(),
        Data::DurationIso(v) => v.clone(),
    }
}

/// Render a spreadsheet date/time cell.
///
/// Dates become `m/d/yyyy`, with ` h:mm` appended when there is a time of
/// day; durations become `h:mm` with unbounded hours. Both are rounded to the
/// nearest minute. The workbook's 1900/1904 date system is honored.
fn excel_datetime_text(value: &ExcelDateTime) -> String {
    let rendered = if value.is_duration() {
        value.as_duration().map(duration_text)
    } else {
        value.as_datetime().map(datetime_text)
    };
    rendered.unwrap_or_else(|| value.as_f64().to_string())
}

fn datetime_text(dt: NaiveDateTime) -> String {
    let rounded = dt + Duration::seconds(30);
    let date = rounded.format("%-m/%-d/%Y");
    if rounded.hour() == 0 && rounded.minute() == 0 {
        date.to_string()
    } else {
        format!("{date} {}", rounded.format("%-H:%M"))
    }
}

fn duration_text(d: Duration) -> String {
    let seconds = d.num_seconds();
    let minutes = (seconds.abs() + 30) / 60;
    let sign = if seconds < 0 { "-" } else { "" };
    format!("{sign}{}:{:02}", minutes / 60, minutes % 60)
}
