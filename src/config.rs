//! Runtime configuration: a TOML file plus environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{LookupError, Result};
use crate::matcher::MatchPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "coverage.toml";
pub const DEFAULT_KAKAO_BASE_URL: &str = "https://dapi.kakao.com";
pub const DEFAULT_SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SHEET_RANGE: &str = "커버리지 가져오기!A:Q";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub kakao: KakaoConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KakaoConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_kakao_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    #[serde(default = "default_sheet_range")]
    pub range: String,
    /// Service account key file
    pub credentials_file: Option<PathBuf>,
    #[serde(default = "default_sheets_api_base_url")]
    pub api_base_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TableConfig {
    /// Read the table from this CSV export instead of the spreadsheet
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

fn default_kakao_base_url() -> String {
    DEFAULT_KAKAO_BASE_URL.to_string()
}

fn default_sheet_range() -> String {
    DEFAULT_SHEET_RANGE.to_string()
}

fn default_sheets_api_base_url() -> String {
    DEFAULT_SHEETS_API_BASE_URL.to_string()
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_kakao_base_url(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: default_sheet_range(),
            credentials_file: None,
            api_base_url: default_sheets_api_base_url(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LookupError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            LookupError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load `.env`, the config file and environment overrides.
    ///
    /// With no explicit path a missing `coverage.toml` is fine; an explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Error loading .env file: {}", e);
            }
        }

        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_PATH)?
            }
            None => {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                Self::default()
            }
        };

        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Override settings from environment-style variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("KAKAO_API_KEY") {
            self.kakao.api_key = key;
        }
        if let Some(id) = var("COVERAGE_SPREADSHEET_ID") {
            self.sheets.spreadsheet_id = Some(id);
        }
        if let Some(range) = var("COVERAGE_SHEET_RANGE") {
            self.sheets.range = range;
        }
        if let Some(path) = var("GOOGLE_APPLICATION_CREDENTIALS") {
            self.sheets.credentials_file = Some(PathBuf::from(path));
        }
        if let Some(path) = var("COVERAGE_TABLE_CSV") {
            self.table.csv_path = Some(PathBuf::from(path));
        }
    }

    /// Check that every value the lookup needs is present.
    pub fn validate(&self) -> Result<()> {
        if self.kakao.api_key.trim().is_empty() {
            return Err(LookupError::Config(
                "Kakao API key is not set (kakao.api_key or KAKAO_API_KEY)".into(),
            ));
        }

        if self.table.csv_path.is_none() {
            if self.sheets.spreadsheet_id.is_none() {
                return Err(LookupError::Config(
                    "spreadsheet id is not set (sheets.spreadsheet_id or COVERAGE_SPREADSHEET_ID)"
                        .into(),
                ));
            }
            if self.sheets.credentials_file.is_none() {
                return Err(LookupError::Config(
                    "service account key is not set (sheets.credentials_file or GOOGLE_APPLICATION_CREDENTIALS)"
                        .into(),
                ));
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.http.timeout_secs.map(Duration::from_secs)
    }
}
