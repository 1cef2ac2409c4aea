//! 차트 범위 선택(브러시) 윈도우.
//!
//! 브러시 드래그로 만들어지는 인덱스 구간을 표현하고, 표시용
//! 슬라이스를 잘라내는 규약을 정의합니다.

use serde::{Deserialize, Serialize};

use fundchart_core::{ChartError, ChartResult, SeriesPoint};

/// 윈도우를 슬라이스로 바꿀 때 끝 인덱스를 다루는 규약.
///
/// 내보내기 부분집합처럼 끝 포인트가 빠져도 되는 소비자와, 표시용
/// 슬라이스처럼 반드시 포함해야 하는 소비자가 다르므로 호출자가
/// 명시적으로 선택합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceConvention {
    /// 끝 인덱스를 제외하는 반열림 구간
    #[default]
    EndExclusive,
    /// 끝 인덱스를 포함하는 닫힌 구간
    EndInclusive,
}

/// 브러시로 선택된 인덱스 구간.
///
/// 항상 `start_index <= end_index`를 만족하며, 두 인덱스 모두 구성
/// 시점의 시계열 길이 안에 있습니다. 직렬화 형태는 브러시 컴포넌트의
/// 상태(`startIndex`/`endIndex`)를 그대로 따릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionWindow {
    start_index: usize,
    end_index: usize,
}

impl SelectionWindow {
    /// 검증된 선택 윈도우를 생성합니다.
    ///
    /// # 매개변수
    /// * `start_index` - 시작 인덱스 (포함)
    /// * `end_index` - 끝 인덱스 (포함)
    /// * `len` - 대상 시계열 길이
    ///
    /// # 반환값
    /// 구간이 길이를 벗어나거나 뒤집힌 경우 에러
    pub fn new(start_index: usize, end_index: usize, len: usize) -> ChartResult<Self> {
        if len == 0 {
            return Err(ChartError::EmptySeries);
        }
        if start_index > end_index || end_index >= len {
            return Err(ChartError::InvalidSelectionWindow {
                start: start_index,
                end: end_index,
                len,
            });
        }
        Ok(Self {
            start_index,
            end_index,
        })
    }

    /// 경계를 보정해서 선택 윈도우를 생성합니다.
    ///
    /// 길이를 벗어난 인덱스는 마지막 인덱스로 내리고, 뒤집힌 구간은
    /// 정방향으로 교환합니다. 빈 시계열만 에러입니다.
    pub fn clamped(start_index: usize, end_index: usize, len: usize) -> ChartResult<Self> {
        if len == 0 {
            return Err(ChartError::EmptySeries);
        }
        let max = len - 1;
        let start = start_index.min(max);
        let end = end_index.min(max);
        let (start_index, end_index) = if start <= end { (start, end) } else { (end, start) };
        Ok(Self {
            start_index,
            end_index,
        })
    }

    /// 시계열 전체를 덮는 윈도우를 생성합니다.
    pub fn full(len: usize) -> ChartResult<Self> {
        Self::new(0, len.saturating_sub(1), len)
    }

    /// 시작 인덱스를 반환합니다.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// 끝 인덱스를 반환합니다.
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// 윈도우가 덮는 포인트 수를 반환합니다 (양 끝 포함).
    pub fn point_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// 주어진 길이의 시계열 전체를 덮는지 확인합니다.
    pub fn is_full(&self, len: usize) -> bool {
        len > 0 && self.start_index == 0 && self.end_index == len - 1
    }

    /// 인덱스가 윈도우 안에 있는지 확인합니다.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.end_index
    }

    /// 윈도우에 해당하는 포인트 슬라이스를 반환합니다.
    ///
    /// 윈도우 구성 이후 시계열이 짧아졌더라도 범위를 벗어나지 않도록
    /// 경계를 시계열 길이에 맞춥니다.
    pub fn slice<'a>(
        &self,
        points: &'a [SeriesPoint],
        convention: SliceConvention,
    ) -> &'a [SeriesPoint] {
        let len = points.len();
        if self.start_index >= len {
            return &[];
        }
        let end = match convention {
            SliceConvention::EndExclusive => self.end_index.min(len),
            SliceConvention::EndInclusive => (self.end_index + 1).min(len),
        };
        if end <= self.start_index {
            return &[];
        }
        &points[self.start_index..end]
    }
}
