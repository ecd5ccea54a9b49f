//! Experiment analysis.
//!
//! - `engine`: the derivation arithmetic (pure)
//! - `layout`: positional row parsing shared by both input shapes
//! - `single_run`: one experiment from a flat CSV table
//! - `multi_run`: one experiment per workbook sheet

pub mod engine;
pub mod layout;
pub mod multi_run;
pub mod single_run;

pub use engine::*;
pub use multi_run::{SheetSource, analyze_workbook};
pub use single_run::{analyze_csv, analyze_grid};

use crate::domain::{DerivedExperiment, ResultTable};

/// Output of either analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Per-experiment results, in input order.
    pub experiments: Vec<DerivedExperiment>,
    /// The same runs laid out as side-by-side 3-column blocks.
    pub table: ResultTable,
}

impl Analysis {
    pub fn from_experiments(experiments: Vec<DerivedExperiment>) -> Self {
        let mut table = ResultTable::new();
        for experiment in &experiments {
            table.push_block(experiment.runs.clone());
        }
        Self { experiments, table }
    }
}
