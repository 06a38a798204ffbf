//! Execution substrate for data-parallel phases.
//!
//! Work is expressed as independent items indexed `0..n`; [`Lanes`] decides where
//! they run and guarantees index-ordered results either way.

pub mod lanes;

pub use lanes::Lanes;
