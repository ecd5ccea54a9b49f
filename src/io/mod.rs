//! Input/output helpers.
//!
//! - CSV ingest into a `Grid` (`ingest`)
//! - workbook sheets via calamine (`workbook`)
//! - result exports to CSV/xlsx (`export`)

pub mod export;
pub mod ingest;
pub mod workbook;

pub use export::*;
pub use ingest::*;
pub use workbook::*;
