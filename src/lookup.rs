//! Search orchestration: geocode, normalize, match.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::geocoder::Geocoder;
use crate::matcher::CoverageMatcher;
use crate::models::{CoverageReport, NormalizedRegion};
use crate::table::TableSource;

/// Result of one search. Failures are reported as errors instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The address was blank; nothing was queried.
    EmptyQuery,
    /// The geocoder could not resolve the address.
    AddressNotFound,
    /// The address resolved, but no coverage row matches its region.
    NoCoverage { region: NormalizedRegion },
    Found(CoverageReport),
}

impl LookupOutcome {
    pub fn report(&self) -> Option<&CoverageReport> {
        match self {
            LookupOutcome::Found(report) => Some(report),
            _ => None,
        }
    }
}

/// Answers coverage searches for free-form addresses.
///
/// Holds no per-search state: every call geocodes and fetches the table again.
pub struct CoverageLookup<G, T> {
    geocoder: G,
    table: T,
    matcher: CoverageMatcher,
}

impl<G: Geocoder, T: TableSource> CoverageLookup<G, T> {
    pub fn new(geocoder: G, table: T, matcher: CoverageMatcher) -> Self {
        Self {
            geocoder,
            table,
            matcher,
        }
    }

    pub async fn search(&self, address: &str) -> Result<LookupOutcome> {
        let query = address.trim();
        if query.is_empty() {
            return Ok(LookupOutcome::EmptyQuery);
        }

        let Some(admin) = self.geocoder.geocode(query).await? else {
            info!("Address not found: {:?}", query);
            return Ok(LookupOutcome::AddressNotFound);
        };

        let region = NormalizedRegion::from_admin(&admin);
        debug!("Geocoded {:?} to {:?}", query, region);

        match self.matcher.lookup(&self.table, &region).await? {
            Some(coverage) => Ok(LookupOutcome::Found(CoverageReport {
                search_address: address.to_string(),
                region,
                coverage,
            })),
            None => {
                info!("No coverage row for {} {:?}", region.province, region.district);
                Ok(LookupOutcome::NoCoverage { region })
            }
        }
    }
}
