//! Address geocoding.

mod kakao;

pub use kakao::{AddressInfo, Document, KakaoGeocoder, SearchResponse};

use crate::error::Result;
use crate::models::AdminRegion;

/// Resolves a free-form address into its administrative breakdown.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    /// `Ok(None)` means the address could not be resolved.
    async fn geocode(&self, query: &str) -> Result<Option<AdminRegion>>;
}
