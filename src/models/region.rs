//! Administrative region types produced by the geocoder.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_province;

/// Raw administrative breakdown of a geocoded address.
///
/// Any level may be empty when the geocoder does not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRegion {
    /// Province / metropolitan city (시/도), e.g. "경기"
    pub province: String,
    /// District (시/군/구), e.g. "성남시 분당구"
    pub district: String,
    /// Neighborhood (동/읍/면), e.g. "정자동"
    pub neighborhood: String,
}

impl AdminRegion {
    pub fn new(
        province: impl Into<String>,
        district: impl Into<String>,
        neighborhood: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            district: district.into(),
            neighborhood: neighborhood.into(),
        }
    }
}

/// Region used to query the coverage table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRegion {
    /// Official province name
    pub province: String,
    /// Raw district, absent when the geocoder reported none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    pub neighborhood: String,
}

impl NormalizedRegion {
    pub fn from_admin(admin: &AdminRegion) -> Self {
        let district = admin.district.trim();

        Self {
            province: normalize_province(&admin.province),
            district: (!district.is_empty()).then(|| district.to_string()),
            neighborhood: admin.neighborhood.clone(),
        }
    }

    /// Last whitespace-delimited token of the district ("성남시 분당구" → "분당구").
    pub fn district_token(&self) -> Option<&str> {
        self.district
            .as_deref()
            .and_then(|d| d.split_whitespace().next_back())
    }
}
