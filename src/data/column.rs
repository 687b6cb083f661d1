use std::sync::OnceLock;

use regex::Regex;

use super::model::Table;

// ---------------------------------------------------------------------------
// Cell classification
// ---------------------------------------------------------------------------

fn number_prefix_re() -> &'static Regex {
    static NUMBER_PREFIX_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_PREFIX_RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("number prefix regex should compile")
    })
}

fn date_re() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{1,2}[-/][0-9]{1,2}[-/][0-9]{4}$").expect("date regex should compile")
    })
}

/// Parse the leading number of a cell.
///
/// Leading whitespace is skipped and trailing text after the number is
/// ignored, so `"12kg"` is `12.0` and `"01/02/2024"` is `1.0`. Only ASCII
/// digits count. Returns `None` for blank or non-numeric cells and for
/// non-finite results, including `NaN` and `Infinity` spellings.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let m = number_prefix_re().find(cell.trim_start())?;
    let value: f64 = m.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Whether a cell looks like a `d/m/yyyy` or `m-d-yyyy` style date.
pub fn is_date_like(cell: &str) -> bool {
    date_re().is_match(cell.trim())
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Knobs for [`extract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Also drop date-like cells, matching what [`is_selectable`] ignores.
    /// Off by default: extraction keeps the leading number of a date cell.
    pub exclude_dates: bool,
}

/// Numeric values of one column, in row order.
///
/// Cells that do not parse are dropped silently; an unknown column yields an
/// empty vector.
pub fn extract(table: &Table, column: &str, options: ExtractOptions) -> Vec<f64> {
    table
        .column_cells(column)
        .flatten()
        .filter(|cell| !(options.exclude_dates && is_date_like(cell)))
        .filter_map(parse_numeric)
        .collect()
}

/// Like [`extract`], but keeps only rows where both columns hold a number.
/// Used for plotting; the statistics use the independent extractions.
pub fn extract_pairs(
    table: &Table,
    x_column: &str,
    y_column: &str,
    options: ExtractOptions,
) -> Vec<[f64; 2]> {
    let accept = |cell: Option<&str>| {
        let cell = cell?;
        if options.exclude_dates && is_date_like(cell) {
            return None;
        }
        parse_numeric(cell)
    };
    table
        .column_cells(x_column)
        .zip(table.column_cells(y_column))
        .filter_map(|(x, y)| Some([accept(x)?, accept(y)?]))
        .collect()
}

// ---------------------------------------------------------------------------
// Selectability
// ---------------------------------------------------------------------------

/// A column is selectable when at least one of its cells is a non-empty,
/// numeric, non-date value.
pub fn is_selectable(table: &Table, column: &str) -> bool {
    table.column_cells(column).flatten().any(|cell| {
        !cell.is_empty() && parse_numeric(cell).is_some() && !is_date_like(cell)
    })
}

/// Headers offered for analysis, in header order.
pub fn selectable_columns(table: &Table) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for header in &table.headers {
        if out.contains(header) {
            continue;
        }
        if is_selectable(table, header) {
            out.push(header.clone());
        }
    }
    out
}
