//! Workbook ingest via `calamine`.
//!
//! Any format calamine auto-detects is accepted (xlsx, xlsm, xls, ods). The
//! file is read fully into memory, then sheets are decoded one at a time as
//! the multi-run analyzer asks for them. The first row of every sheet is a
//! header and is not part of the returned grid.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto_from_rs};
use log::debug;

use crate::analysis::SheetSource;
use crate::domain::{Cell, Grid, from_serial_date};
use crate::error::AppError;

/// A workbook opened from disk.
pub struct CalamineWorkbook {
    path: PathBuf,
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl CalamineWorkbook {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppError::io(format!("Failed to open workbook '{}': {e}", path.display()))
        })?;
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
            AppError::invalid_data(format!("Failed to read workbook '{}': {e}", path.display()))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }
}

impl SheetSource for CalamineWorkbook {
    fn sheet_count(&self) -> usize {
        self.sheets.sheet_names().len()
    }

    fn sheet(&mut self, index: usize) -> Result<Option<Grid>, AppError> {
        let Some(range) = self.sheets.worksheet_range_at(index) else {
            return Ok(None);
        };
        let range = range.map_err(|e| {
            AppError::invalid_data(format!(
                "Failed to read sheet {index} of '{}': {e}",
                self.path.display()
            ))
        })?;

        let grid = grid_from_range(&range);
        let name = self.sheet_names().get(index).cloned().unwrap_or_default();
        debug!(
            "sheet {index} '{name}': {} data row(s), {} column(s)",
            grid.len(),
            grid.width()
        );
        Ok(Some(grid))
    }
}

/// Convert a sheet range to a grid, dropping the header row.
///
/// Cell positions are absolute, so column 0 is always the sheet's column A.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let (Some((start_row, _)), Some((end_row, end_col))) = (range.start(), range.end()) else {
        return Grid::default();
    };

    let rows = (start_row + 1..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| range.get_value((row, col)).map(cell_from_data).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();

    Grid::new(rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(s) => Cell::from_text(s),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .or_else(|| from_serial_date(dt.as_f64()))
            .map(Cell::DateTime)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}
