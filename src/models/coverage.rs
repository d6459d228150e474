//! Coverage table types.

use serde::{Deserialize, Serialize};

use super::NormalizedRegion;
use crate::error::{LookupError, Result};

/// Named columns of the coverage spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverageColumn {
    /// Province key (지역)
    Province,
    /// District key (시군구명)
    District,
    /// Combined region label shown as the matched address
    MatchedRegion,
    DayCareP1,
    DayCareP2,
    /// Home care for grades 1-4, including home bathing
    HomeCareGrade1To4,
    HomeCareGrade5,
    BathingVehicle,
    HomeNursing,
    WelfareEquipment,
    CenterManager,
    CenterContact,
    HqManager,
    PreContractCheckup,
}

impl CoverageColumn {
    /// Header text as written in the sheet. Multi-line headers are stored
    /// with a single space where the sheet has a line break.
    pub fn header(&self) -> &'static str {
        match self {
            CoverageColumn::Province => "지역",
            CoverageColumn::District => "시군구명",
            CoverageColumn::MatchedRegion => "지역 합치기",
            CoverageColumn::DayCareP1 => "주간보호(P1)",
            CoverageColumn::DayCareP2 => "주간보호(P2)",
            CoverageColumn::HomeCareGrade1To4 => "방문요양(1~4등급) /방문목욕",
            CoverageColumn::HomeCareGrade5 => "방문요양(5등급)",
            CoverageColumn::BathingVehicle => "차량목욕",
            CoverageColumn::HomeNursing => "방문간호",
            CoverageColumn::WelfareEquipment => "복지용구",
            CoverageColumn::CenterManager => "센터 담당자",
            CoverageColumn::CenterContact => "센터 담당자 연락처",
            CoverageColumn::HqManager => "본부 담당자",
            CoverageColumn::PreContractCheckup => "계약전 건강검진 필수 여부",
        }
    }

    /// Key columns must be present for matching to work at all.
    pub fn is_key(&self) -> bool {
        matches!(self, CoverageColumn::Province | CoverageColumn::District)
    }

    pub fn all() -> &'static [CoverageColumn] {
        &[
            CoverageColumn::Province,
            CoverageColumn::District,
            CoverageColumn::MatchedRegion,
            CoverageColumn::DayCareP1,
            CoverageColumn::DayCareP2,
            CoverageColumn::HomeCareGrade1To4,
            CoverageColumn::HomeCareGrade5,
            CoverageColumn::BathingVehicle,
            CoverageColumn::HomeNursing,
            CoverageColumn::WelfareEquipment,
            CoverageColumn::CenterManager,
            CoverageColumn::CenterContact,
            CoverageColumn::HqManager,
            CoverageColumn::PreContractCheckup,
        ]
    }
}

/// Header comparison ignores all whitespace, so "센터 담당자\n연락처"
/// and "센터 담당자 연락처" are the same column.
fn header_key(header: &str) -> String {
    header.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Coverage table as fetched from its source: a header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CoverageTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Build a table from a 2D array whose first row is the header.
    pub fn from_values(values: Vec<Vec<String>>) -> Result<Self> {
        let mut values = values.into_iter();
        let header = values
            .next()
            .ok_or_else(|| LookupError::Table("coverage table has no header row".into()))?;

        Ok(Self {
            header,
            rows: values.collect(),
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header, if present.
    pub fn column_index(&self, column: CoverageColumn) -> Option<usize> {
        let wanted = header_key(column.header());
        self.header.iter().position(|h| header_key(h) == wanted)
    }

    /// Position of a column that must exist.
    pub fn require_column(&self, column: CoverageColumn) -> Result<usize> {
        self.column_index(column).ok_or_else(|| {
            LookupError::Table(format!("column '{}' not found", column.header()))
        })
    }

    /// Cell value; short rows and missing columns read as empty.
    pub fn cell(&self, row: usize, column: Option<usize>) -> &str {
        column
            .and_then(|c| self.rows.get(row).and_then(|r| r.get(c)))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Materialize a data row into its named fields.
    pub fn row(&self, index: usize) -> CoverageRow {
        let value = |column: CoverageColumn| {
            self.cell(index, self.column_index(column)).to_string()
        };

        CoverageRow {
            province: value(CoverageColumn::Province),
            district: value(CoverageColumn::District),
            matched_region: value(CoverageColumn::MatchedRegion),
            day_care_p1: value(CoverageColumn::DayCareP1),
            day_care_p2: value(CoverageColumn::DayCareP2),
            home_care_grade_1_4: value(CoverageColumn::HomeCareGrade1To4),
            home_care_grade_5: value(CoverageColumn::HomeCareGrade5),
            bathing_vehicle: value(CoverageColumn::BathingVehicle),
            home_nursing: value(CoverageColumn::HomeNursing),
            welfare_equipment: value(CoverageColumn::WelfareEquipment),
            center_manager: value(CoverageColumn::CenterManager),
            center_contact: value(CoverageColumn::CenterContact),
            hq_manager: value(CoverageColumn::HqManager),
            pre_contract_checkup: value(CoverageColumn::PreContractCheckup),
        }
    }
}

/// A single coverage row with its service and contact fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRow {
    pub province: String,
    pub district: String,
    pub matched_region: String,
    pub day_care_p1: String,
    pub day_care_p2: String,
    pub home_care_grade_1_4: String,
    pub home_care_grade_5: String,
    pub bathing_vehicle: String,
    pub home_nursing: String,
    pub welfare_equipment: String,
    pub center_manager: String,
    pub center_contact: String,
    pub hq_manager: String,
    pub pre_contract_checkup: String,
}

/// Answer to a successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Address exactly as the user typed it
    pub search_address: String,
    pub region: NormalizedRegion,
    pub coverage: CoverageRow,
}
