//! Coverage row matching.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{LookupError, Result};
use crate::models::{CoverageColumn, CoverageRow, CoverageTable, NormalizedRegion};
use crate::table::TableSource;

/// What to do when more than one row matches a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Take the first matching row in table order.
    #[default]
    First,
    /// Treat multiple matching rows as an error.
    Strict,
}

/// Finds the coverage row for a normalized region.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageMatcher {
    policy: MatchPolicy,
}

impl CoverageMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Indices of rows whose province equals the region's province and, when
    /// the region has a district, whose district column contains the
    /// district's last token.
    pub fn candidates(
        &self,
        table: &CoverageTable,
        region: &NormalizedRegion,
    ) -> Result<Vec<usize>> {
        let province_col = table.require_column(CoverageColumn::Province)?;
        let district_col = table.require_column(CoverageColumn::District)?;
        let token = region.district_token();

        let rows = (0..table.len())
            .filter(|&i| table.cell(i, Some(province_col)) == region.province)
            .filter(|&i| token.map_or(true, |t| table.cell(i, Some(district_col)).contains(t)))
            .collect::<Vec<_>>();

        debug!(
            "{} of {} rows match province={:?} district_token={:?}",
            rows.len(),
            table.len(),
            region.province,
            token
        );

        Ok(rows)
    }

    /// The matching row, resolved by the configured policy.
    pub fn find(
        &self,
        table: &CoverageTable,
        region: &NormalizedRegion,
    ) -> Result<Option<CoverageRow>> {
        let candidates = self.candidates(table, region)?;

        if candidates.len() > 1 {
            match self.policy {
                MatchPolicy::Strict => {
                    return Err(LookupError::AmbiguousMatch {
                        province: region.province.clone(),
                        district: region.district.clone().unwrap_or_default(),
                        count: candidates.len(),
                    });
                }
                MatchPolicy::First => warn!(
                    "{} rows match {} {:?}; using the first",
                    candidates.len(),
                    region.province,
                    region.district
                ),
            }
        }

        Ok(candidates.first().map(|&i| table.row(i)))
    }

    /// Fetch the table from `source` and find the region's row.
    pub async fn lookup<T: TableSource>(
        &self,
        source: &T,
        region: &NormalizedRegion,
    ) -> Result<Option<CoverageRow>> {
        let table = source.fetch_table().await?;
        self.find(&table, region)
    }
}
