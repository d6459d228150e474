//! Coverage table read from a local CSV export of the sheet.

use std::path::PathBuf;

use csv::ReaderBuilder;
use tracing::debug;

use super::TableSource;
use crate::error::Result;
use crate::models::CoverageTable;

/// CSV file with the same layout as the sheet: header row, then data rows.
pub struct CsvTable {
    path: PathBuf,
}

impl CsvTable {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Parse CSV bytes into a table. Rows may differ in length.
    pub fn parse(bytes: &[u8]) -> Result<CoverageTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut values = Vec::new();
        for record in reader.records() {
            let record = record?;
            values.push(record.iter().map(str::to_string).collect());
        }

        CoverageTable::from_values(values)
    }
}

impl TableSource for CsvTable {
    async fn fetch_table(&self) -> Result<CoverageTable> {
        debug!("Reading coverage table from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        Self::parse(&bytes)
    }
}
