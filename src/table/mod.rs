//! Coverage table sources.

mod auth;
mod csv_file;
mod sheets;

pub use auth::{ServiceAccountAuth, ServiceAccountKey, SHEETS_READONLY_SCOPE};
pub use csv_file::CsvTable;
pub use sheets::{values_url, SheetsClient, ValueRange};

use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::CoverageTable;

/// Supplies the full coverage table. Every call reads the source again.
#[allow(async_fn_in_trait)]
pub trait TableSource {
    async fn fetch_table(&self) -> Result<CoverageTable>;
}

/// Table source selected by configuration.
pub enum TableBackend {
    Sheets(SheetsClient),
    Csv(CsvTable),
}

impl TableBackend {
    /// A configured CSV path wins over the spreadsheet.
    pub fn from_config(config: &Config, client: Client) -> Result<Self> {
        if let Some(path) = &config.table.csv_path {
            info!("Coverage table source: CSV {}", path.display());
            return Ok(TableBackend::Csv(CsvTable::new(path.clone())));
        }

        info!("Coverage table source: Google Sheets range {:?}", config.sheets.range);
        Ok(TableBackend::Sheets(SheetsClient::new(&config.sheets, client)?))
    }
}

impl TableSource for TableBackend {
    async fn fetch_table(&self) -> Result<CoverageTable> {
        match self {
            TableBackend::Sheets(sheets) => sheets.fetch_table().await,
            TableBackend::Csv(csv) => csv.fetch_table().await,
        }
    }
}
