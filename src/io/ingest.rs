//! CSV ingest.
//!
//! Turns a header-less CSV file into a [`Grid`] of text cells:
//! - lines starting with `#` are skipped
//! - rows may have different lengths
//! - fields are trimmed; blank fields become `Cell::Empty`
//!
//! No layout interpretation happens here; the analyzers own that.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::{Cell, Grid};
use crate::error::AppError;

/// Load a CSV file into a grid.
pub fn read_csv_grid(path: &Path) -> Result<Grid, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    read_csv_grid_from(file).map_err(|e| {
        AppError::new(e.kind(), format!("'{}': {}", path.display(), e.message()))
    })
}

/// Load CSV text from any reader into a grid.
pub fn read_csv_grid_from<R: Read>(reader: R) -> Result<Grid, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            if e.is_io_error() {
                AppError::io(format!("Failed to read CSV: {e}"))
            } else {
                AppError::invalid_data(format!("CSV parse error: {e}"))
            }
        })?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(Grid::new(rows))
}
