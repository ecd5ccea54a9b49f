//! Multi-run analyzer: one experiment per workbook sheet.
//!
//! Sheet layout (header row already stripped by the source):
//! - row 0, columns 0-3: solution setup
//! - every row, columns 4-7: run rows; rows with a blank cell there are dropped
//!
//! Sheets are visited in index order until the source reports that no sheet
//! exists at the next index.

use std::ops::Range;

use log::{debug, info};

use super::Analysis;
use super::engine::derive_experiment;
use super::layout::{parse_run_row, parse_solution_row};
use crate::domain::{Cell, Grid, RawExperimentRecord};
use crate::error::AppError;

/// Columns holding run rows within a sheet.
pub const RUN_COLUMNS: Range<usize> = 4..8;

/// Indexed access to the sheets of a workbook.
pub trait SheetSource {
    /// Number of sheets in the workbook.
    fn sheet_count(&self) -> usize;

    /// Load sheet `index`, or `Ok(None)` when the workbook has no such sheet.
    fn sheet(&mut self, index: usize) -> Result<Option<Grid>, AppError>;
}

/// Analyze every sheet of `source`, one result block per sheet.
pub fn analyze_workbook<S: SheetSource + ?Sized>(source: &mut S) -> Result<Analysis, AppError> {
    let mut experiments = Vec::with_capacity(source.sheet_count());

    let mut index = 0;
    while let Some(grid) = source.sheet(index)? {
        let record = record_from_sheet(&grid)
            .map_err(|e| AppError::invalid_data(format!("Sheet {index}: {e}")))?;
        let derived = derive_experiment(&record);
        info!(
            "sheet {index}: solvent concentration {:.4}, {} run(s)",
            derived.solvent_concentration,
            derived.runs.len()
        );
        experiments.push(derived);
        index += 1;
    }
    debug!("workbook exhausted after {index} sheet(s)");
    debug_assert_eq!(index, source.sheet_count(), "sheet source ended early");

    Ok(Analysis::from_experiments(experiments))
}

/// Adapt one sheet into an experiment record.
pub fn record_from_sheet(grid: &Grid) -> Result<RawExperimentRecord, String> {
    let width = grid.width();
    if width < RUN_COLUMNS.end {
        return Err(format!(
            "expected at least {} columns (setup in 0-3, runs in 4-7), found {width}.",
            RUN_COLUMNS.end
        ));
    }

    let setup_row = grid
        .row(0)
        .ok_or_else(|| "sheet has no solution row (row 0).".to_string())?;
    let solution = parse_solution_row(setup_row).map_err(|e| format!("solution row: {e}"))?;

    let mut runs = Vec::new();
    let mut dropped = 0usize;
    for (idx, row) in grid.rows().iter().enumerate() {
        match row.get(RUN_COLUMNS) {
            Some(cells) if !cells.iter().any(Cell::is_missing) => {
                runs.push(parse_run_row(cells).map_err(|e| format!("run row {idx}: {e}"))?);
            }
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!("dropped {dropped} row(s) with missing run values");
    }

    Ok(RawExperimentRecord { solution, runs })
}
