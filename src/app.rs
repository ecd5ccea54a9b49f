//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - runs the single-run or multi-run analyzer
//! - prints the summary
//! - writes the result table and the scatter plot

use clap::{CommandFactory, Parser};
use log::warn;

use crate::cli::Cli;
use crate::error::AppError;
use crate::plot::PlotConfig;

pub mod pipeline;

use pipeline::{AnalysisConfig, OutputPaths};

/// Entry point for the `data-proc` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = config_from_args(&cli);
    run_with_config(&config)
}

pub fn config_from_args(cli: &Cli) -> AnalysisConfig {
    if cli.csv_data_file.is_some() && cli.excel_data_file.is_some() {
        warn!("both a CSV and a workbook were given; analyzing the CSV only");
    }

    AnalysisConfig {
        source: cli.source(),
        out_dir: cli.out_dir.clone(),
        plot: (!cli.no_plot).then_some(PlotConfig {
            width: cli.width,
            height: cli.height,
        }),
    }
}

pub fn run_with_config(config: &AnalysisConfig) -> Result<(), AppError> {
    let analysis = pipeline::analyze_source(&config.source)?;
    print!("{}", crate::report::format_summary(&analysis));

    let paths = OutputPaths::new(&config.source, &config.out_dir);

    pipeline::write_table(&config.source, &paths.table, &analysis.table)?;
    println!("Wrote file: {}", paths.table.display());

    if let Some(plot) = &config.plot {
        pipeline::write_plot(&config.source, &paths.plot, &analysis.table, plot)?;
        println!("Wrote file: {}", paths.plot.display());
    }

    Ok(())
}

/// Usage text printed after a failure.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}
