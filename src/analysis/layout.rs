//! Positional row layouts shared by both analyzers.
//!
//! A solution row is `(start_time, v_ref, v_lo, v_hi)`; a run row is
//! `(timestamp, empty_tube_mass, tube_with_liquid_mass, tube_with_dried_cake_mass)`.
//! A blank numeric cell is a missing value and reads as `NaN`; a blank
//! timestamp is an error.

use crate::domain::{Cell, RunRow, SolutionSetup};

/// Fields in either row layout.
pub const ROW_FIELDS: usize = 4;

pub fn parse_solution_row(cells: &[Cell]) -> Result<SolutionSetup, String> {
    let cells = take_fields(cells)?;
    Ok(SolutionSetup {
        start_time: cells[0]
            .to_timestamp()
            .map_err(|e| format!("start time: {e}"))?,
        v_ref: number(&cells[1], "v_ref")?,
        v_lo: number(&cells[2], "v_lo")?,
        v_hi: number(&cells[3], "v_hi")?,
    })
}

pub fn parse_run_row(cells: &[Cell]) -> Result<RunRow, String> {
    let cells = take_fields(cells)?;
    Ok(RunRow {
        timestamp: cells[0]
            .to_timestamp()
            .map_err(|e| format!("timestamp: {e}"))?,
        empty_tube_mass: number(&cells[1], "empty tube mass")?,
        tube_with_liquid_mass: number(&cells[2], "tube with liquid mass")?,
        tube_with_dried_cake_mass: number(&cells[3], "tube with dried cake mass")?,
    })
}

fn take_fields(cells: &[Cell]) -> Result<&[Cell], String> {
    cells.get(..ROW_FIELDS).ok_or_else(|| {
        format!(
            "expected at least {ROW_FIELDS} columns, found {}.",
            cells.len()
        )
    })
}

fn number(cell: &Cell, name: &str) -> Result<f64, String> {
    if cell.is_missing() {
        return Ok(f64::NAN);
    }
    cell.to_f64().map_err(|e| format!("{name}: {e}"))
}
