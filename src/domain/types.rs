//! Shared domain types.
//!
//! Records are plain values: built fresh for every analysis call and never
//! shared between experiments.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Columns per experiment block in a [`ResultTable`].
pub const BLOCK_WIDTH: usize = 3;

/// Which input to analyze, and therefore which analyzer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// One experiment in a flat CSV table.
    Csv(PathBuf),
    /// One experiment per workbook sheet.
    Workbook(PathBuf),
}

impl Source {
    pub fn path(&self) -> &Path {
        match self {
            Source::Csv(path) | Source::Workbook(path) => path,
        }
    }

    /// Short tag used in output file names.
    pub fn tag(&self) -> &'static str {
        match self {
            Source::Csv(_) => "csv",
            Source::Workbook(_) => "excel",
        }
    }
}

/// Solution preparation readings (first row of an experiment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionSetup {
    pub start_time: NaiveDateTime,
    pub v_ref: f64,
    pub v_lo: f64,
    pub v_hi: f64,
}

/// One centrifugation measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunRow {
    pub timestamp: NaiveDateTime,
    pub empty_tube_mass: f64,
    pub tube_with_liquid_mass: f64,
    pub tube_with_dried_cake_mass: f64,
}

/// One experiment as read from a table: setup plus its runs in recorded order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawExperimentRecord {
    pub solution: SolutionSetup,
    pub runs: Vec<RunRow>,
}

/// Derived quantities for one run row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRun {
    pub aging_time_hours: f64,
    pub aging_time_seconds: f64,
    /// Grams of dried cake per gram of oil.
    pub dried_cake_ratio: f64,
}

impl DerivedRun {
    /// Values in result-table column order.
    pub fn values(&self) -> [f64; BLOCK_WIDTH] {
        [
            self.aging_time_hours,
            self.aging_time_seconds,
            self.dried_cake_ratio,
        ]
    }

    /// No `NaN` in any column.
    pub fn is_complete(&self) -> bool {
        self.values().iter().all(|v| !v.is_nan())
    }
}

/// Engine output for one experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedExperiment {
    pub solvent_concentration: f64,
    pub runs: Vec<DerivedRun>,
}

/// Derived runs laid out as 3-column blocks, one block per experiment.
///
/// Blocks sit side by side; a block shorter than the longest one leaves its
/// trailing cells absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    blocks: Vec<Vec<DerivedRun>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding a single experiment.
    pub fn single(runs: Vec<DerivedRun>) -> Self {
        Self { blocks: vec![runs] }
    }

    pub fn push_block(&mut self, runs: Vec<DerivedRun>) {
        self.blocks.push(runs);
    }

    pub fn blocks(&self) -> &[Vec<DerivedRun>] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn column_count(&self) -> usize {
        self.blocks.len() * BLOCK_WIDTH
    }

    pub fn row_count(&self) -> usize {
        self.blocks.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Value at `(row, col)`, or `None` when the cell is absent.
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        let run = self.blocks.get(col / BLOCK_WIDTH)?.get(row)?;
        Some(run.values()[col % BLOCK_WIDTH])
    }

    pub fn row(&self, row: usize) -> Vec<Option<f64>> {
        (0..self.column_count()).map(|col| self.cell(row, col)).collect()
    }

    /// Runs of block `index` with no missing values.
    pub fn complete_runs(&self, index: usize) -> Vec<DerivedRun> {
        self.blocks
            .get(index)
            .map(|runs| runs.iter().copied().filter(DerivedRun::is_complete).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(h: f64, ratio: f64) -> DerivedRun {
        DerivedRun {
            aging_time_hours: h,
            aging_time_seconds: h * 3600.0,
            dried_cake_ratio: ratio,
        }
    }

    #[test]
    fn ragged_blocks_leave_trailing_cells_absent() {
        let mut table = ResultTable::single(vec![run(1.0, 0.1), run(2.0, 0.2)]);
        table.push_block(vec![run(0.5, 0.3)]);

        assert_eq!(table.column_count(), 6);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 3), Some(0.5));
        assert_eq!(table.cell(1, 1), Some(7200.0));
        assert_eq!(table.cell(1, 3), None);
        assert_eq!(table.cell(0, 6), None);
        assert_eq!(
            table.row(1),
            vec![Some(2.0), Some(7200.0), Some(0.2), None, None, None]
        );
    }

    #[test]
    fn complete_runs_skip_nan_rows() {
        let table = ResultTable::single(vec![run(1.0, f64::NAN), run(2.0, f64::INFINITY)]);
        let kept = table.complete_runs(0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].aging_time_hours, 2.0);
        assert!(table.complete_runs(1).is_empty());
    }
}
