//! PNG scatter plots of aging time vs dried cake concentration.
//!
//! Data prep (`*_series`, `axis_upper_bounds`) is kept apart from rendering so
//! it can be tested without a font stack.

use std::path::Path;

use log::debug;
use plotters::prelude::*;

use crate::domain::ResultTable;
use crate::error::AppError;

pub const TITLE: &str = "Centrifugation Analysis";
pub const X_LABEL: &str = "Aging Time (hrs)";
pub const Y_LABEL: &str = "Dried Cake Concentration (g/g oil)";

const MARKER_SIZE: i32 = 4;

/// Image settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// One scatter series: `(aging hours, dried cake ratio)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
}

/// Column 0 against column 2 of the first block.
pub fn single_run_series(table: &ResultTable) -> Vec<Series> {
    let points = table
        .blocks()
        .first()
        .map(|runs| {
            runs.iter()
                .map(|r| (r.aging_time_hours, r.dried_cake_ratio))
                .collect()
        })
        .unwrap_or_default();

    vec![Series {
        label: None,
        points,
    }]
}

/// One labelled series per block, skipping rows with missing values.
pub fn multi_run_series(table: &ResultTable) -> Vec<Series> {
    (0..table.block_count())
        .map(|i| Series {
            label: Some(format!("Data{}", i + 1)),
            points: table
                .complete_runs(i)
                .iter()
                .map(|r| (r.aging_time_hours, r.dried_cake_ratio))
                .collect(),
        })
        .collect()
}

/// Upper x/y bounds: the largest finite coordinates plus 5%, or 1.0 if none.
///
/// Lower bounds are always 0.
pub fn axis_upper_bounds(series: &[Series]) -> (f64, f64) {
    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in series.iter().flat_map(|s| &s.points) {
        if x.is_finite() && y.is_finite() {
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }
    (pad_upper(x_max), pad_upper(y_max))
}

fn pad_upper(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v * 1.05 } else { 1.0 }
}

/// Scatter plot of a single-run table.
pub fn plot_single_run(path: &Path, table: &ResultTable, config: &PlotConfig) -> Result<(), AppError> {
    render_scatter(path, &single_run_series(table), false, config)
}

/// Scatter plot with one series per experiment and a legend.
pub fn plot_multi_run(path: &Path, table: &ResultTable, config: &PlotConfig) -> Result<(), AppError> {
    render_scatter(path, &multi_run_series(table), true, config)
}

fn render_scatter(
    path: &Path,
    series: &[Series],
    legend: bool,
    config: &PlotConfig,
) -> Result<(), AppError> {
    let fail = |e: &dyn std::fmt::Display| {
        AppError::io(format!("Failed to render plot '{}': {e}", path.display()))
    };

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let (x_max, y_max) = axis_upper_bounds(series);

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .draw()
        .map_err(|e| fail(&e))?;

    for (i, s) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        // Points left of / below the origin fall outside the clamped axes.
        let visible = s
            .points
            .iter()
            .copied()
            .filter(|&(x, y)| x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0);

        let drawn = chart
            .draw_series(visible.map(|p| Circle::new(p, MARKER_SIZE, color.filled())))
            .map_err(|e| fail(&e))?;

        if let Some(label) = &s.label {
            drawn
                .label(label.as_str())
                .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled()));
        }
    }

    if legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| fail(&e))?;
    }

    root.present().map_err(|e| fail(&e))?;
    debug!("rendered {} series to {}", series.len(), path.display());
    Ok(())
}
