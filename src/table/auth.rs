//! Google service account authentication (OAuth2 JWT bearer grant).

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LookupError, Result};
use crate::http::read_json;

const SERVICE: &str = "Google OAuth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Read-only access to spreadsheets.
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Assertion lifetime; Google rejects anything over one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service account key file we need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LookupError::Credentials(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LookupError::Credentials(e.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Exchanges a signed service account assertion for an access token.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    client: Client,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, scope: &str, client: Client) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| LookupError::Credentials(format!("invalid private key: {}", e)))?;

        Ok(Self {
            key,
            encoding_key,
            scope: scope.to_string(),
            client,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Signed RS256 assertion issued at `now`.
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| LookupError::Auth(format!("failed to sign assertion: {}", e)))
    }

    /// Fetch a fresh access token. Tokens are not reused across calls.
    pub async fn access_token(&self) -> Result<String> {
        let assertion = self.assertion(Utc::now())?;

        debug!(
            "Requesting access token for {} from {}",
            self.key.client_email, self.key.token_uri
        );

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let token: TokenResponse = read_json(SERVICE, response).await?;
        if token.access_token.is_empty() {
            return Err(LookupError::Auth("token endpoint returned an empty token".into()));
        }

        debug!("Access token issued, expires in {:?}s", token.expires_in);
        Ok(token.access_token)
    }
}
