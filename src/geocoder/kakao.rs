//! Kakao Local API geocoder (address search with keyword-search fallback).

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::Geocoder;
use crate::config::KakaoConfig;
use crate::error::{LookupError, Result};
use crate::http::read_json;
use crate::models::AdminRegion;

const SERVICE: &str = "Kakao Local";
const ADDRESS_SEARCH_PATH: &str = "/v2/local/search/address.json";
const KEYWORD_SEARCH_PATH: &str = "/v2/local/search/keyword.json";

/// Response body shared by the address and keyword search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub address_name: Option<String>,
    /// Lot-number address (address search only)
    #[serde(default)]
    pub address: Option<AddressInfo>,
    /// Road-name address (address search only)
    #[serde(default)]
    pub road_address: Option<AddressInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressInfo {
    #[serde(default)]
    pub region_1depth_name: String,
    #[serde(default)]
    pub region_2depth_name: String,
    #[serde(default)]
    pub region_3depth_name: String,
}

impl From<&AddressInfo> for AdminRegion {
    fn from(info: &AddressInfo) -> Self {
        AdminRegion::new(
            info.region_1depth_name.clone(),
            info.region_2depth_name.clone(),
            info.region_3depth_name.clone(),
        )
    }
}

impl Document {
    /// Administrative breakdown of this document: the lot-number address,
    /// else the road-name address. Documents with neither (keyword results
    /// carry only free text) resolve to nothing.
    pub fn admin_region(&self) -> Option<AdminRegion> {
        self.address
            .as_ref()
            .or(self.road_address.as_ref())
            .map(AdminRegion::from)
    }
}

impl SearchResponse {
    /// Region of the first document, if any.
    pub fn first_region(&self) -> Option<AdminRegion> {
        self.documents.first().and_then(Document::admin_region)
    }
}

/// Geocoder backed by the Kakao Local REST API.
pub struct KakaoGeocoder {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl KakaoGeocoder {
    pub fn new(config: &KakaoConfig, client: Client) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            LookupError::Config(format!("invalid Kakao base URL '{}': {}", config.base_url, e))
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Run one search against the given endpoint path.
    pub async fn search(&self, path: &str, query: &str) -> Result<SearchResponse> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| LookupError::Config(format!("invalid Kakao endpoint {}: {}", path, e)))?;

        debug!("Kakao search {} query={:?}", url, query);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .query(&[("query", query)])
            .send()
            .await?;

        let body: SearchResponse = read_json(SERVICE, response).await?;
        debug!("Kakao search {} returned {} documents", path, body.documents.len());
        Ok(body)
    }
}

impl Geocoder for KakaoGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<AdminRegion>> {
        let mut result = self.search(ADDRESS_SEARCH_PATH, query).await?;

        if result.documents.is_empty() {
            info!("No address match for {:?}, trying keyword search", query);
            result = self.search(KEYWORD_SEARCH_PATH, query).await?;
        }

        Ok(result.first_region())
    }
}
