//! Terminal summary of an analysis run.

use crate::analysis::Analysis;
use crate::domain::DerivedExperiment;

/// One line per experiment: solvent concentration, run count and aging span.
pub fn format_summary(analysis: &Analysis) -> String {
    let mut out = String::new();
    out.push_str("=== Centrifugation Analysis ===\n");
    out.push_str(&format!(
        "Experiments: {} | result columns: {} | rows: {}\n",
        analysis.experiments.len(),
        analysis.table.column_count(),
        analysis.table.row_count()
    ));

    for (i, experiment) in analysis.experiments.iter().enumerate() {
        out.push_str(&format!(
            "Data{}: solvent conc {:.4} | runs {} | aging {}\n",
            i + 1,
            experiment.solvent_concentration,
            experiment.runs.len(),
            format_aging_span(experiment)
        ));
    }

    out
}

fn format_aging_span(experiment: &DerivedExperiment) -> String {
    let (min, max) = experiment
        .runs
        .iter()
        .map(|r| r.aging_time_hours)
        .filter(|h| h.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), h| {
            (lo.min(h), hi.max(h))
        });

    if min.is_finite() && max.is_finite() {
        format!("[{min:.2}, {max:.2}] h")
    } else {
        "n/a".to_string()
    }
}
