//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - loaded tabular input (`Grid`, `Cell`) and timestamp parsing
//! - experiment records as read from a table (`RawExperimentRecord`)
//! - derived outputs (`DerivedRun`, `DerivedExperiment`, `ResultTable`)

pub mod grid;
pub mod types;

pub use grid::*;
pub use types::*;
