//! X축 도메인 범위 계산.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use fundchart_core::{ChartError, ChartResult, SeriesPoint};

use crate::selection::SelectionWindow;

/// 차트가 현재 표시하는 X축 범위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainRange {
    /// 범위 시작 (첫 표시 포인트의 X값)
    pub from: DateTime<Utc>,
    /// 범위 끝 (마지막 표시 포인트의 X값)
    pub to: DateTime<Utc>,
    /// 범위에 포함된 포인트 수
    pub length: usize,
}

impl DomainRange {
    /// 범위가 덮는 달력 시간 폭을 반환합니다.
    pub fn span(&self) -> Duration {
        self.to - self.from
    }
}

/// 포인트 배열과 선택 윈도우에서 표시 도메인을 계산합니다.
///
/// 윈도우가 없으면 전체 배열이 도메인입니다. 윈도우 인덱스가 배열
/// 길이를 벗어나면 마지막 인덱스로 보정합니다.
///
/// # 반환값
/// 빈 배열이면 `ChartError::EmptySeries`
pub fn compute_domain(
    points: &[SeriesPoint],
    window: Option<SelectionWindow>,
) -> ChartResult<DomainRange> {
    if points.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    let max = points.len() - 1;
    let (start, end) = match window {
        Some(window) => (window.start_index().min(max), window.end_index().min(max)),
        None => (0, max),
    };

    Ok(DomainRange {
        from: points[start].x,
        to: points[end].x,
        length: end - start + 1,
    })
}
