//! Shared HTTP client construction and response decoding.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LookupError, Result};

const USER_AGENT: &str = concat!("coverage/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used by every outbound call.
///
/// Without a timeout the library default applies.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Read a response body and decode it as JSON, turning non-success statuses
/// into [`LookupError::Status`].
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        debug!("{} request failed with status {}", service, status);
        return Err(LookupError::Status {
            service,
            status,
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| LookupError::Decode { service, source })
}
