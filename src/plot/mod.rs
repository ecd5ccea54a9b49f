//! Plot rendering.
//!
//! Only PNG scatter plots are produced; see `scatter`.

pub mod scatter;

pub use scatter::*;
