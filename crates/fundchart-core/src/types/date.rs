//! 차트 캘린더 날짜 보조 함수.
//!
//! X축 틱 생성에 쓰이는 분기/연도 경계 계산과 차트 날짜 문자열
//! 파싱을 제공합니다. 모든 경계는 자정 UTC 기준입니다.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{ChartError, ChartResult};

/// 해당 날짜의 분기(1..=4)를 반환합니다.
pub fn quarter_of(date: DateTime<Utc>) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// 해당 분기의 시작일(1월/4월/7월/10월 1일 00:00 UTC)로 내림합니다.
pub fn floor_to_quarter(date: DateTime<Utc>) -> DateTime<Utc> {
    let month = (quarter_of(date) - 1) * 3 + 1;
    // 같은 연도 안의 달 시작이므로 항상 표현 가능
    month_start(date.year(), month).unwrap_or(date)
}

/// 해당 연도의 시작일(1월 1일 00:00 UTC)로 내림합니다.
pub fn floor_to_year(date: DateTime<Utc>) -> DateTime<Utc> {
    month_start(date.year(), 1).unwrap_or(date)
}

/// 다음 분기의 시작일을 반환합니다.
///
/// # 반환값
///
/// 달력 상한 연도의 4분기에서는 다음 경계가 표현 범위를 벗어나므로
/// `None`
pub fn next_quarter_start(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let quarter = quarter_of(date);
    if quarter == 4 {
        month_start(date.year() + 1, 1)
    } else {
        month_start(date.year(), quarter * 3 + 1)
    }
}

/// 다음 연도의 시작일을 반환합니다. 달력 상한을 넘으면 `None`입니다.
pub fn next_year_start(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    month_start(date.year() + 1, 1)
}

/// 분기 시작일로 올림합니다. 이미 경계면 그대로 반환하고,
/// 다음 경계가 달력 상한을 넘으면 `None`입니다.
pub fn ceil_to_quarter(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let floored = floor_to_quarter(date);
    if floored == date {
        Some(date)
    } else {
        next_quarter_start(date)
    }
}

/// 연도 시작일로 올림합니다. 이미 경계면 그대로 반환하고,
/// 다음 경계가 달력 상한을 넘으면 `None`입니다.
pub fn ceil_to_year(date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let floored = floor_to_year(date);
    if floored == date {
        Some(date)
    } else {
        next_year_start(date)
    }
}

/// 연간 틱 레이블("2020")을 반환합니다.
pub fn year_label(date: DateTime<Utc>) -> String {
    date.format("%Y").to_string()
}

/// 분기 틱 레이블("Q2 '20")을 반환합니다.
pub fn quarter_label(date: DateTime<Utc>) -> String {
    format!("Q{} '{:02}", quarter_of(date), date.year() % 100)
}

/// 차트 날짜 문자열을 파싱합니다.
///
/// ISO 날짜("2020-01-01"), RFC3339, 공백 구분 날짜시간
/// ("2020-01-01 09:30:00")을 지원합니다. 날짜만 있으면 자정 UTC로
/// 해석합니다.
///
/// # 반환값
///
/// 어떤 형식에도 맞지 않으면 `ChartError::InvalidDate`
pub fn parse_chart_date(s: &str) -> ChartResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(DateTime::from_naive_utc_and_offset(
            date.and_hms_opt(0, 0, 0).unwrap(),
            Utc,
        ));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    Err(ChartError::InvalidDate(s.to_string()))
}

/// 에포크 밀리초 값을 UTC 시각으로 변환합니다.
pub fn from_epoch_millis(ms: i64) -> ChartResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| ChartError::InvalidDate(format!("epoch millis out of range: {}", ms)))
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    let day = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(DateTime::from_naive_utc_and_offset(
        day.and_hms_opt(0, 0, 0)?,
        Utc,
    ))
}
