//! Write result tables to disk.
//!
//! - CSV: header-less, comma-delimited, every column of the table
//! - workbook: one worksheet per experiment block, with a title row and no
//!   row-index column

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::domain::{BLOCK_WIDTH, ResultTable};
use crate::error::AppError;

/// Column titles used on every workbook sheet.
pub const WORKBOOK_HEADERS: [&str; BLOCK_WIDTH] =
    ["aging_time_hrs", "aging_time_sec", "dried_cake_g_per_g_oil"];

/// Write the table as header-less CSV. Absent cells are left empty.
pub fn write_result_csv(path: &Path, table: &ResultTable) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create CSV '{}': {e}", path.display())))?;

    for row in 0..table.row_count() {
        let fields = table
            .row(row)
            .into_iter()
            .map(|v| v.map(|v| v.to_string()).unwrap_or_default());
        writer
            .write_record(fields)
            .map_err(|e| AppError::io(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write CSV '{}': {e}", path.display())))?;
    Ok(())
}

/// Write block `i` of the table to worksheet `Sheet{i+1}`.
///
/// Rows with a missing (`NaN`) value are dropped from their sheet. Infinite
/// values are written as the text `inf` / `-inf`.
pub fn write_result_workbook(path: &Path, table: &ResultTable) -> Result<(), AppError> {
    build_workbook(table)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|e| AppError::io(format!("Failed to write workbook '{}': {e}", path.display())))
}

fn build_workbook(table: &ResultTable) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    for index in 0..table.block_count() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(format!("Sheet{}", index + 1))?;

        for (col, title) in WORKBOOK_HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title)?;
        }

        for (r, run) in table.complete_runs(index).iter().enumerate() {
            let row = r as u32 + 1;
            for (col, value) in run.values().into_iter().enumerate() {
                let col = col as u16;
                if value.is_finite() {
                    worksheet.write_number(row, col, value)?;
                } else if value > 0.0 {
                    worksheet.write_string(row, col, "inf")?;
                } else {
                    worksheet.write_string(row, col, "-inf")?;
                }
            }
        }
    }

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DerivedRun;

    fn run(h: f64, ratio: f64) -> DerivedRun {
        DerivedRun {
            aging_time_hours: h,
            aging_time_seconds: h * 3600.0,
            dried_cake_ratio: ratio,
        }
    }

    #[test]
    fn csv_has_no_header_and_blank_absent_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = ResultTable::single(vec![run(2.5, 0.5), run(6.0, f64::INFINITY)]);
        table.push_block(vec![run(1.0, f64::NAN)]);
        write_result_csv(&path, &table).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["2.5,9000,0.5,1,3600,NaN", "6,21600,inf,,,"]);
    }

    #[test]
    fn unwritable_csv_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let err = write_result_csv(&path, &ResultTable::new()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
        assert!(err.message().contains("out.csv"));
    }
}
