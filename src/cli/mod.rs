//! Command-line parsing for the centrifugation analyzer.
//!
//! Parsing stays separate from the analysis code; `Cli` is turned into an
//! `AnalysisConfig` by `app::config_from_args`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::Source;

/// Workbook analyzed when no input file is given.
pub const DEFAULT_WORKBOOK: &str = "data.xlsx";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "data-proc",
    version,
    about = "Calculate and plot analyzed data from centrifugation experiments"
)]
pub struct Cli {
    /// CSV file with data from a single experiment to be analyzed.
    #[arg(short = 'c', long = "csv-data-file", value_name = "CSV")]
    pub csv_data_file: Option<PathBuf>,

    /// Workbook with data from multiple experiments (one per sheet) to be analyzed.
    ///
    /// Used when no CSV file is given; defaults to `data.xlsx`.
    #[arg(short = 'e', long = "excel-data-file", value_name = "WORKBOOK")]
    pub excel_data_file: Option<PathBuf>,

    /// Directory for the result table and plot.
    #[arg(short = 'o', long, env = "CENTRIFUGE_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Plot width (pixels).
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Plot height (pixels).
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Skip rendering the scatter plot.
    #[arg(long)]
    pub no_plot: bool,
}

impl Cli {
    /// Resolve which analyzer runs: a CSV path selects the single-run analyzer.
    pub fn source(&self) -> Source {
        match (&self.csv_data_file, &self.excel_data_file) {
            (Some(csv), _) => Source::Csv(csv.clone()),
            (None, Some(workbook)) => Source::Workbook(workbook.clone()),
            (None, None) => Source::Workbook(PathBuf::from(DEFAULT_WORKBOOK)),
        }
    }
}
