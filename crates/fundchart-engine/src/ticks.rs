//! X축 틱 단위 결정과 틱 생성.
//!
//! 틱은 항상 달력 경계(분기 또는 연도 시작) 위에 놓입니다. 틱 단위는
//! 현재 표시 중인 범위의 폭으로 결정하고, 틱 자체는 브러시와 무관하게
//! 전체 시리즈의 시간 범위에서 생성합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fundchart_core::{date, ChartError, ChartResult, SeriesPoint};

use crate::range::DomainRange;

/// 1년의 근사 밀리초.
pub const MS_PER_YEAR_APPROX: i64 = 31_540_000_000;

/// 연간 틱으로 전환하는 표시 범위 연수.
pub const YEAR_TICKS_THRESHOLD: i64 = 3;

/// X축 틱 간격 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickGranularity {
    /// 연 단위 틱
    Year,
    /// 분기 단위 틱
    Quarter,
}

impl TickGranularity {
    /// 차트 라이브러리에 넘기는 축 날짜 형식 문자열을 반환합니다.
    pub fn axis_format(&self) -> &'static str {
        match self {
            Self::Year => "yyyy",
            Self::Quarter => "QQ 'YY",
        }
    }

    /// 시각을 틱 경계로 내림합니다.
    pub fn floor(&self, date: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Year => date::floor_to_year(date),
            Self::Quarter => date::floor_to_quarter(date),
        }
    }

    /// 시각을 틱 경계로 올림합니다. 경계 위의 값은 그대로 두고,
    /// 다음 경계가 달력 상한을 넘으면 `None`입니다.
    pub fn ceil(&self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Year => date::ceil_to_year(date),
            Self::Quarter => date::ceil_to_quarter(date),
        }
    }

    /// 다음 틱 경계를 반환합니다. 달력 상한을 넘으면 `None`입니다.
    pub fn next_boundary(&self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Year => date::next_year_start(date),
            Self::Quarter => date::next_quarter_start(date),
        }
    }

    /// 틱 레이블을 만듭니다 ("2020" 또는 "Q2 '20").
    pub fn label(&self, tick: DateTime<Utc>) -> String {
        match self {
            Self::Year => date::year_label(tick),
            Self::Quarter => date::quarter_label(tick),
        }
    }
}

/// 표시 범위에서 틱 단위를 결정합니다.
///
/// 브러시가 적용된 뒤의 도메인이 기준입니다. 표시 폭이
/// [`YEAR_TICKS_THRESHOLD`]년 이상이면 연간, 미만이면 분기 틱입니다.
pub fn resolve_granularity(domain: &DomainRange) -> TickGranularity {
    let elapsed_years = domain.span().num_milliseconds() / MS_PER_YEAR_APPROX;
    if elapsed_years >= YEAR_TICKS_THRESHOLD {
        TickGranularity::Year
    } else {
        TickGranularity::Quarter
    }
}

/// 시리즈의 시간 범위를 덮는 틱 목록을 생성합니다.
///
/// # 매개변수
/// * `points` - 전체 시리즈 포인트 (브러시 적용 전 원본)
/// * `granularity` - 틱 간격 단위
/// * `inclusive` - `true`면 첫 포인트를 덮도록 내림한 경계에서 시작,
///   `false`면 첫 포인트 이상의 올림 경계에서 시작
///
/// # 반환값
/// 빈 시리즈면 `ChartError::EmptySeries`. 시리즈 범위 안에 경계가
/// 없으면 빈 목록을 반환합니다. 달력 상한을 넘는 경계에서는 더
/// 진행하지 않고 그때까지의 틱만 반환합니다.
pub fn generate_ticks(
    points: &[SeriesPoint],
    granularity: TickGranularity,
    inclusive: bool,
) -> ChartResult<Vec<DateTime<Utc>>> {
    let first = points.first().ok_or(ChartError::EmptySeries)?;
    let last = points.last().ok_or(ChartError::EmptySeries)?;

    let start = if inclusive {
        Some(granularity.floor(first.x))
    } else {
        granularity.ceil(first.x)
    };
    let end = granularity.floor(last.x);

    let mut ticks = Vec::new();
    let mut cursor = start;
    while let Some(tick) = cursor {
        if tick > end {
            break;
        }
        ticks.push(tick);
        cursor = granularity.next_boundary(tick);
    }

    tracing::trace!(count = ticks.len(), granularity = ?granularity, "X축 틱 생성");

    Ok(ticks)
}
