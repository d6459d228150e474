//! Core data models for the coverage lookup.

pub mod coverage;
pub mod region;

pub use coverage::{CoverageColumn, CoverageReport, CoverageRow, CoverageTable};
pub use region::{AdminRegion, NormalizedRegion};
