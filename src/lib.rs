//! Coverage - service-coverage lookup for Korean addresses.
//!
//! Geocodes a free-form address with the Kakao Local API, normalizes the
//! province name and matches the region against a coverage table kept in
//! Google Sheets (or a CSV export of it).

pub mod config;
pub mod error;
pub mod geocoder;
pub mod http;
pub mod lookup;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod table;

#[cfg(test)]
mod testing;

pub use error::{LookupError, Result};
pub use lookup::{CoverageLookup, LookupOutcome};
pub use models::{AdminRegion, CoverageReport, CoverageRow, CoverageTable, NormalizedRegion};
