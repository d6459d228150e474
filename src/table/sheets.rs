//! Google Sheets v4 coverage table source.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::auth::{ServiceAccountAuth, ServiceAccountKey, SHEETS_READONLY_SCOPE};
use super::TableSource;
use crate::config::SheetsConfig;
use crate::error::{LookupError, Result};
use crate::http::read_json;
use crate::models::CoverageTable;

const SERVICE: &str = "Google Sheets";

/// `spreadsheets.values.get` response body.
#[derive(Debug, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// URL of the values endpoint for a spreadsheet range.
///
/// Each path segment is percent-encoded, so sheet names with spaces or
/// Hangul are safe.
pub fn values_url(api_base: &Url, spreadsheet_id: &str, range: &str) -> Result<Url> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .map_err(|_| LookupError::Config(format!("invalid Sheets API base URL '{}'", api_base)))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
    Ok(url)
}

/// Reads the coverage table from a fixed spreadsheet range.
pub struct SheetsClient {
    client: Client,
    auth: ServiceAccountAuth,
    values_url: Url,
}

impl SheetsClient {
    pub fn new(config: &SheetsConfig, client: Client) -> Result<Self> {
        let spreadsheet_id = config
            .spreadsheet_id
            .as_deref()
            .ok_or_else(|| LookupError::Config("sheets.spreadsheet_id is not set".into()))?;
        let credentials_file = config
            .credentials_file
            .as_ref()
            .ok_or_else(|| LookupError::Config("sheets.credentials_file is not set".into()))?;

        let api_base = Url::parse(&config.api_base_url).map_err(|e| {
            LookupError::Config(format!(
                "invalid Sheets API base URL '{}': {}",
                config.api_base_url, e
            ))
        })?;

        let key = ServiceAccountKey::from_file(credentials_file)?;
        let auth = ServiceAccountAuth::new(key, SHEETS_READONLY_SCOPE, client.clone())?;
        info!("Using service account {}", auth.client_email());

        Ok(Self {
            values_url: values_url(&api_base, spreadsheet_id, &config.range)?,
            client,
            auth,
        })
    }
}

impl TableSource for SheetsClient {
    async fn fetch_table(&self) -> Result<CoverageTable> {
        let token = self.auth.access_token().await?;

        debug!("Fetching coverage table from {}", self.values_url);

        let response = self
            .client
            .get(self.values_url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        let body: ValueRange = read_json(SERVICE, response).await?;
        debug!(
            "Fetched {} rows from range {:?}",
            body.values.len(),
            body.range
        );

        CoverageTable::from_values(body.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stub_client, StubRoute, StubServer};
    use std::io::Write;

    const PRIVATE_KEY: &str = include_str!("testdata/service_key.pem");
    const VALUES_PATH: &str = "/v4/spreadsheets/sheet-id/values/Coverage!A:Q";

    #[test]
    fn test_values_url_encodes_range() {
        let base = Url::parse("https://sheets.googleapis.com").unwrap();
        let url = values_url(&base, "sheet-id", "커버리지 가져오기!A:Q").unwrap();

        assert!(url
            .as_str()
            .starts_with("https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/"));
        assert!(url.as_str().contains("%20"));
        assert!(url.as_str().ends_with("!A:Q"));
        assert_eq!(
            url.path_segments().unwrap().last(),
            Some("%EC%BB%A4%EB%B2%84%EB%A6%AC%EC%A7%80%20%EA%B0%80%EC%A0%B8%EC%98%A4%EA%B8%B0!A:Q")
        );
    }

    #[test]
    fn test_values_url_keeps_base_path() {
        let base = Url::parse("http://localhost:8080/sheets/").unwrap();
        let url = values_url(&base, "id", "A:Q").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/sheets/v4/spreadsheets/id/values/A:Q");
    }

    #[test]
    fn test_value_range_ragged_rows() {
        let body: ValueRange = serde_json::from_str(
            r#"{
                "range": "'커버리지 가져오기'!A1:Q3",
                "majorDimension": "ROWS",
                "values": [
                    ["지역", "시군구명", "주간보호(P1)"],
                    ["서울특별시", "강남구"]
                ]
            }"#,
        )
        .unwrap();

        let table = CoverageTable::from_values(body.values).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0).district, "강남구");
        assert_eq!(table.row(0).day_care_p1, "");
    }

    #[test]
    fn test_value_range_without_values() {
        let body: ValueRange = serde_json::from_str(r#"{"range": "A:Q"}"#).unwrap();
        assert!(matches!(
            CoverageTable::from_values(body.values),
            Err(LookupError::Table(_))
        ));
    }

    #[test]
    fn test_missing_spreadsheet_id() {
        let config = SheetsConfig::default();
        assert!(matches!(
            SheetsClient::new(&config, Client::new()),
            Err(LookupError::Config(_))
        ));
    }

    /// Client whose token and values endpoints both point at `server`.
    fn sheets_client(server: &StubServer) -> SheetsClient {
        let key = serde_json::json!({
            "type": "service_account",
            "client_email": "coverage@example.iam.gserviceaccount.com",
            "private_key": PRIVATE_KEY,
            "private_key_id": "key-1",
            "token_uri": server.url("/token"),
        })
        .to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(key.as_bytes()).unwrap();

        let config = SheetsConfig {
            spreadsheet_id: Some("sheet-id".into()),
            range: "Coverage!A:Q".into(),
            credentials_file: Some(file.path().to_path_buf()),
            api_base_url: server.base_url(),
        };
        SheetsClient::new(&config, stub_client()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_table_with_bearer_token() {
        let server = StubServer::start(vec![
            StubRoute::ok("/token", r#"{"access_token": "ya29.test", "expires_in": 3600}"#),
            StubRoute::ok(
                VALUES_PATH,
                r#"{"range": "Coverage!A1:Q3", "values": [
                    ["지역", "시군구명", "주간보호(P1)"],
                    ["경기도", "성남시 분당구", "가능"]
                ]}"#,
            ),
        ])
        .await;

        let table = sheets_client(&server).fetch_table().await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0).district, "성남시 분당구");
        assert_eq!(table.row(0).day_care_p1, "가능");

        let requests = server.requests();
        assert_eq!(requests.len(), 2);

        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path(), "/token");
        assert_eq!(
            requests[0].form("grant_type").as_deref(),
            Some("urn:ietf:params:oauth:grant-type:jwt-bearer")
        );
        assert!(requests[0].form("assertion").is_some_and(|a| a.split('.').count() == 3));

        assert_eq!(requests[1].method, "GET");
        assert_eq!(requests[1].path(), VALUES_PATH);
        assert_eq!(requests[1].header("authorization"), Some("Bearer ya29.test"));
    }

    #[tokio::test]
    async fn test_token_failure_skips_values_fetch() {
        let server = StubServer::start(vec![
            StubRoute::new("/token", 400, r#"{"error": "invalid_grant"}"#),
            StubRoute::ok(VALUES_PATH, r#"{"values": []}"#),
        ])
        .await;

        match sheets_client(&server).fetch_table().await {
            Err(LookupError::Status { service, status, body }) => {
                assert_eq!(service, "Google OAuth");
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), "/token");
    }

    #[tokio::test]
    async fn test_values_error_status() {
        let server = StubServer::start(vec![
            StubRoute::ok("/token", r#"{"access_token": "ya29.test"}"#),
            StubRoute::new(VALUES_PATH, 403, r#"{"error": {"status": "PERMISSION_DENIED"}}"#),
        ])
        .await;

        assert!(matches!(
            sheets_client(&server).fetch_table().await,
            Err(LookupError::Status { service: SERVICE, .. })
        ));
    }
}
