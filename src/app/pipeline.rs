//! The analysis workflow, shared by the binary and the integration tests:
//! source -> analyzer -> result table -> table file -> plot image.
//!
//! Printing is left to `app`; everything here returns values or errors.

use std::path::{Path, PathBuf};

use crate::analysis::{Analysis, analyze_csv, analyze_workbook};
use crate::domain::{ResultTable, Source};
use crate::error::AppError;
use crate::io::{CalamineWorkbook, write_result_csv, write_result_workbook};
use crate::plot::{PlotConfig, plot_multi_run, plot_single_run};

/// A full run's configuration, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub source: Source,
    pub out_dir: PathBuf,
    /// `None` skips the plot.
    pub plot: Option<PlotConfig>,
}

/// Where a run writes its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub table: PathBuf,
    pub plot: PathBuf,
}

impl OutputPaths {
    /// `<stem>_analysis.{csv,xlsx}` and `<stem>_analysis_{csv,excel}.png` inside `out_dir`.
    pub fn new(source: &Source, out_dir: &Path) -> Self {
        let base = format!("{}_analysis", input_stem(source.path()));
        let extension = match source {
            Source::Csv(_) => "csv",
            Source::Workbook(_) => "xlsx",
        };

        Self {
            table: out_dir.join(format!("{base}.{extension}")),
            plot: out_dir.join(format!("{base}_{}.png", source.tag())),
        }
    }
}

fn input_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string())
}

/// Run the analyzer matching the source.
pub fn analyze_source(source: &Source) -> Result<Analysis, AppError> {
    match source {
        Source::Csv(path) => analyze_csv(path),
        Source::Workbook(path) => {
            let mut workbook = CalamineWorkbook::open(path)?;
            analyze_workbook(&mut workbook)
        }
    }
}

/// Persist the result table in the format matching the source.
pub fn write_table(source: &Source, path: &Path, table: &ResultTable) -> Result<(), AppError> {
    match source {
        Source::Csv(_) => write_result_csv(path, table),
        Source::Workbook(_) => write_result_workbook(path, table),
    }
}

/// Render the scatter plot matching the source.
pub fn write_plot(
    source: &Source,
    path: &Path,
    table: &ResultTable,
    config: &PlotConfig,
) -> Result<(), AppError> {
    match source {
        Source::Csv(_) => plot_single_run(path, table, config),
        Source::Workbook(_) => plot_multi_run(path, table, config),
    }
}
