//! `centrifugation-expt` library crate.
//!
//! The binary (`data-proc`) is a thin wrapper around this library so that:
//!
//! - the analyzers are testable without spawning processes
//! - the derivation engine is reusable on tables from other sources

pub mod analysis;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
