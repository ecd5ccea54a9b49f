//! In-memory tables as loaded from CSV files or workbook sheets.
//!
//! Both analyzers work on a `Grid` so that the fixed positional layouts can be
//! adapted without caring where the cells came from. Conversions to numbers
//! and timestamps happen on demand and report a plain `String` error; callers
//! add row/column context.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Build a cell from a raw text field; blank text becomes `Empty`.
    pub fn from_text(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    /// Missing in the numeric-table sense: blank, or a `NaN` number.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(v) => v.is_nan(),
            Cell::Text(_) | Cell::DateTime(_) => false,
        }
    }

    pub fn to_f64(&self) -> Result<f64, String> {
        match self {
            Cell::Number(v) => Ok(*v),
            Cell::Text(s) => s
                .parse::<f64>()
                .map_err(|_| format!("Invalid number '{s}'.")),
            Cell::DateTime(dt) => Err(format!("Expected a number, found timestamp '{dt}'.")),
            Cell::Empty => Err("Missing value.".to_string()),
        }
    }

    pub fn to_timestamp(&self) -> Result<NaiveDateTime, String> {
        match self {
            Cell::DateTime(dt) => Ok(*dt),
            Cell::Text(s) => parse_timestamp(s),
            Cell::Number(serial) => from_serial_date(*serial)
                .ok_or_else(|| format!("Invalid spreadsheet date serial {serial}.")),
            Cell::Empty => Err("Missing timestamp.".to_string()),
        }
    }
}

/// Rows of cells. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row length.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Parse a timestamp in one of the layouts lab exports commonly use.
///
/// Date-only values are taken as midnight.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    const DATETIME_FMTS: [&str; 14] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        // 12-hour clock, as spreadsheet exports often write it.
        "%Y-%m-%d %I:%M:%S %p",
        "%Y-%m-%d %I:%M %p",
        "%Y/%m/%d %I:%M:%S %p",
        "%Y/%m/%d %I:%M %p",
        "%m/%d/%Y %I:%M:%S %p",
        "%m/%d/%Y %I:%M %p",
    ];
    const DATE_FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

    let s = s.trim();
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FMTS {
        if let Some(dt) = NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt);
        }
    }
    Err(format!(
        "Invalid timestamp '{s}'. Expected e.g. YYYY-MM-DD HH:MM[:SS] or MM/DD/YYYY HH:MM[:SS] [AM|PM]."
    ))
}

/// Convert a spreadsheet serial date (days since 1899-12-30) to a timestamp.
pub fn from_serial_date(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let micros = (serial * 86_400_000_000.0).round();
    if micros.abs() > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(Duration::microseconds(micros as i64))
}
