//! Terminal rendering of search results.

use coverage::CoverageReport;

pub const PROMPT: &str = "주소를 입력하세요 (예: 강남구 역삼동, 분당구 정자동)";
pub const EMPTY_QUERY: &str = "주소를 입력해주세요.";
pub const NOT_FOUND: &str = "해당 지역의 커버리지 정보를 찾을 수 없습니다.";
pub const FOUND: &str = "검색 완료!";
const NO_SERVICE: &str = "서비스 없음";

fn or_no_service(value: &str) -> &str {
    if value.trim().is_empty() {
        NO_SERVICE
    } else {
        value
    }
}

pub fn error_message(error: &dyn std::fmt::Display) -> String {
    format!("오류 발생: {}", error)
}

/// Render a found report as plain-text panels.
pub fn render_report(report: &CoverageReport) -> String {
    let c = &report.coverage;

    let lines = [
        "📍 지역 정보".to_string(),
        format!("  검색주소: {}", report.search_address),
        format!("  매칭된 주소: {}", c.matched_region),
        String::new(),
        "🏥 주간보호".to_string(),
        format!("  P1: {}", or_no_service(&c.day_care_p1)),
        format!("  P2: {}", or_no_service(&c.day_care_p2)),
        "🏠 방문요양".to_string(),
        format!("  1~4등급: {}", c.home_care_grade_1_4),
        format!("  5등급: {}", c.home_care_grade_5),
        "🚗 차량목욕".to_string(),
        format!("  {}", or_no_service(&c.bathing_vehicle)),
        "👨‍⚕️ 방문간호".to_string(),
        format!("  {}", or_no_service(&c.home_nursing)),
        "🛠️ 복지용구".to_string(),
        format!("  {}", or_no_service(&c.welfare_equipment)),
        String::new(),
        "👥 담당자 정보".to_string(),
        format!("  센터 담당자: {}", c.center_manager),
        format!("  연락처: {}", c.center_contact),
        format!("  본부 담당자: {}", c.hq_manager),
        String::new(),
        "ℹ️ 추가 정보".to_string(),
        format!("  계약전 건강검진 필수 여부: {}", c.pre_contract_checkup),
    ];

    lines.join("\n")
}
