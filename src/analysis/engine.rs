//! Derivation engine: the arithmetic shared by both analyzers.
//!
//! Everything here is plain `f64` arithmetic. Degenerate inputs (equal
//! calibration readings, a tube that weighs less than when empty, ...) produce
//! `inf`, `NaN` or negative values and are passed through untouched.

use chrono::NaiveDateTime;

use crate::domain::{DerivedExperiment, DerivedRun, RawExperimentRecord, RunRow, SolutionSetup};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Fraction of the liquid phase that is added solvent.
pub fn solvent_concentration(setup: &SolutionSetup) -> f64 {
    (setup.v_hi - setup.v_lo) / (setup.v_hi - setup.v_ref)
}

/// Elapsed seconds from `start` to `at` (microsecond resolution).
pub fn elapsed_seconds(start: NaiveDateTime, at: NaiveDateTime) -> f64 {
    let delta = at - start;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1e6,
        // Only reachable for spans of ~290k years.
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// Derive one run given the experiment's start time and solvent concentration.
pub fn derive_run(start_time: NaiveDateTime, solvent_conc: f64, row: &RunRow) -> DerivedRun {
    let mass_liquid = row.tube_with_liquid_mass - row.empty_tube_mass;
    let mass_dried_cake = row.tube_with_dried_cake_mass - row.empty_tube_mass;
    let mass_oil = (1.0 - solvent_conc) * mass_liquid;

    let aging_time_seconds = elapsed_seconds(start_time, row.timestamp);

    DerivedRun {
        aging_time_hours: aging_time_seconds / SECONDS_PER_HOUR,
        aging_time_seconds,
        dried_cake_ratio: mass_dried_cake / mass_oil,
    }
}

/// Derive every run of an experiment, preserving run order.
pub fn derive_experiment(record: &RawExperimentRecord) -> DerivedExperiment {
    let solvent_conc = solvent_concentration(&record.solution);
    let start_time = record.solution.start_time;

    DerivedExperiment {
        solvent_concentration: solvent_conc,
        runs: record
            .runs
            .iter()
            .map(|row| derive_run(start_time, solvent_conc, row))
            .collect(),
    }
}
