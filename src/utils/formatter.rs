// Formatters - 날짜 컬럼 표시

use chrono::{DateTime, Local};
use std::time::SystemTime;

/// 수정 시간을 목록 표시 형식으로 포맷팅
///
/// 항상 "YYYY-MM-DD HH:MM" 형식 (16자 고정)
pub fn format_date(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// 날짜가 없는 항목은 빈 문자열
pub fn format_optional_date(time: Option<SystemTime>) -> String {
    time.map(format_date).unwrap_or_default()
}
