//! Error types shared by the geocoder, table sources and the lookup pipeline.

use thiserror::Error;

/// Errors raised while answering a single coverage search.
///
/// "Address not found" and "no coverage row" are not errors; they are
/// reported through [`crate::LookupOutcome`].
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid service account credentials: {0}")]
    Credentials(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("coverage table error: {0}")]
    Table(String),

    #[error("{count} coverage rows match {province} {district}")]
    AmbiguousMatch {
        province: String,
        district: String,
        count: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
