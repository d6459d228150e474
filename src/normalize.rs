//! Province name normalization.

/// Short province / metropolitan city names and their official forms.
const PROVINCE_ABBREVIATIONS: [(&str, &str); 17] = [
    ("서울", "서울특별시"),
    ("부산", "부산광역시"),
    ("대구", "대구광역시"),
    ("인천", "인천광역시"),
    ("광주", "광주광역시"),
    ("대전", "대전광역시"),
    ("울산", "울산광역시"),
    ("세종", "세종특별자치시"),
    ("경기", "경기도"),
    ("강원", "강원특별자치도"),
    ("충북", "충청북도"),
    ("충남", "충청남도"),
    ("전북", "전라북도"),
    ("전남", "전라남도"),
    ("경북", "경상북도"),
    ("경남", "경상남도"),
    ("제주", "제주특별자치도"),
];

/// All abbreviation → official name pairs.
pub fn province_abbreviations() -> &'static [(&'static str, &'static str)] {
    &PROVINCE_ABBREVIATIONS
}

/// Normalize a raw province string to its official name.
///
/// Only the first whitespace-delimited token is considered. A known short
/// form maps to its official name and an official name maps to itself;
/// anything else is returned unchanged, including blank input.
pub fn normalize_province(raw: &str) -> String {
    let Some(token) = raw.split_whitespace().next() else {
        return raw.to_string();
    };

    PROVINCE_ABBREVIATIONS
        .iter()
        .find(|(short, full)| *short == token || *full == token)
        .map(|(_, full)| (*full).to_string())
        .unwrap_or_else(|| raw.to_string())
}
