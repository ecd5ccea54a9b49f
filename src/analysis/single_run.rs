//! Single-run analyzer: one experiment in one flat CSV table.
//!
//! Layout (no header, `#` comment lines skipped):
//! - row 0, columns 0-3: solution setup
//! - rows 1..N, columns 0-3: run rows

use std::path::Path;

use log::info;

use super::Analysis;
use super::engine::derive_experiment;
use super::layout::{parse_run_row, parse_solution_row};
use crate::domain::{Grid, RawExperimentRecord};
use crate::error::AppError;
use crate::io::ingest::read_csv_grid;

/// Read and analyze a single-experiment CSV file.
pub fn analyze_csv(path: &Path) -> Result<Analysis, AppError> {
    let grid = read_csv_grid(path)?;
    analyze_grid(&grid)
}

/// Analyze an already-loaded flat table.
pub fn analyze_grid(grid: &Grid) -> Result<Analysis, AppError> {
    let record = record_from_grid(grid)?;
    let derived = derive_experiment(&record);
    info!(
        "single run: solvent concentration {:.4}, {} run(s)",
        derived.solvent_concentration,
        derived.runs.len()
    );
    Ok(Analysis::from_experiments(vec![derived]))
}

/// Adapt the flat layout into an experiment record.
pub fn record_from_grid(grid: &Grid) -> Result<RawExperimentRecord, AppError> {
    let setup_row = grid
        .row(0)
        .ok_or_else(|| AppError::invalid_data("Input has no solution row (row 0)."))?;
    let solution = parse_solution_row(setup_row)
        .map_err(|e| AppError::invalid_data(format!("Solution row: {e}")))?;

    let mut runs = Vec::with_capacity(grid.len().saturating_sub(1));
    for (idx, row) in grid.rows().iter().enumerate().skip(1) {
        let run = parse_run_row(row)
            .map_err(|e| AppError::invalid_data(format!("Run row {idx}: {e}")))?;
        runs.push(run);
    }

    Ok(RawExperimentRecord { solution, runs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cell;
    use crate::error::ErrorKind;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|r| r.iter().map(|v| Cell::from_text(v)).collect())
                .collect(),
        )
    }

    fn sample() -> Grid {
        grid(&[
            &["2017-10-01 08:00:00", "10", "12", "20"],
            &["2017-10-01 10:30:00", "10", "15", "10.5"],
            &["2017-10-01 14:00:00", "10", "20", "10.8"],
        ])
    }

    #[test]
    fn hand_computed_fixture() {
        let analysis = analyze_grid(&sample()).unwrap();
        let table = &analysis.table;

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);

        assert_eq!(table.cell(0, 0), Some(2.5));
        assert_eq!(table.cell(0, 1), Some(9000.0));
        // cake 0.5 g / (0.2 * 5 g oil)
        assert!((table.cell(0, 2).unwrap() - 0.5).abs() < 1e-12);

        assert_eq!(table.cell(1, 0), Some(6.0));
        // cake 0.8 g / (0.2 * 10 g oil)
        assert!((table.cell(1, 2).unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn twelve_hour_timestamps_match_24_hour_results() {
        let analysis = analyze_grid(&grid(&[
            &["10/1/2017 8:00 AM", "10", "12", "20"],
            &["10/1/2017 10:30 AM", "10", "15", "10.5"],
            &["10/1/2017 2:00 PM", "10", "20", "10.8"],
        ]))
        .unwrap();

        assert_eq!(analysis.table, analyze_grid(&sample()).unwrap().table);
        assert_eq!(analysis.table.cell(0, 1), Some(9000.0));
        assert_eq!(analysis.table.cell(1, 0), Some(6.0));
    }

    #[test]
    fn repeated_analysis_is_bit_identical() {
        let a = analyze_grid(&sample()).unwrap();
        let b = analyze_grid(&sample()).unwrap();
        let bits = |t: &crate::domain::ResultTable| -> Vec<Option<u64>> {
            (0..t.row_count())
                .flat_map(|r| t.row(r))
                .map(|v| v.map(f64::to_bits))
                .collect()
        };
        assert_eq!(bits(&a.table), bits(&b.table));
    }

    #[test]
    fn short_solution_row_is_malformed() {
        let err = analyze_grid(&grid(&[
            &["2017-10-01 08:00:00", "10", "12"],
            &["2017-10-01 10:30:00", "10", "15", "10.5"],
        ]))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = analyze_grid(&Grid::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.message().contains("row 0"));
    }

    #[test]
    fn setup_only_yields_empty_table() {
        let analysis = analyze_grid(&grid(&[&["2017-10-01 08:00:00", "10", "12", "20"]])).unwrap();
        assert_eq!(analysis.table.column_count(), 3);
        assert_eq!(analysis.table.row_count(), 0);
    }
}
