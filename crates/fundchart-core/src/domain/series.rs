//! 검증된 시계열 컨테이너.

use serde::{Deserialize, Serialize};

use crate::domain::point::SeriesPoint;
use crate::error::{ChartError, ChartResult};

/// 시각 오름차순으로 검증된 시계열.
///
/// 생성 시점에 모든 포인트의 x가 엄격하게 증가하는지 확인하므로,
/// 이 타입을 받는 코드는 정렬과 중복 걱정 없이 첫/마지막 포인트로
/// 범위를 계산할 수 있습니다.
///
/// JSON 배열로 직렬화되며, 역직렬화 시에도 같은 검증을 거칩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SeriesPoint>", into = "Vec<SeriesPoint>")]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// 포인트 목록에서 시계열을 생성합니다.
    ///
    /// # 매개변수
    ///
    /// * `points` - 시각 오름차순 데이터 포인트
    ///
    /// # 반환값
    ///
    /// x가 엄격하게 증가하지 않으면 `ChartError::UnorderedSeries`
    pub fn new(points: Vec<SeriesPoint>) -> ChartResult<Self> {
        for pair in points.windows(2) {
            if pair[1].x <= pair[0].x {
                return Err(ChartError::UnorderedSeries {
                    prev: pair[0].x,
                    next: pair[1].x,
                });
            }
        }
        Ok(Self { points })
    }

    /// 빈 시계열을 생성합니다.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// JSON 배열 문자열에서 시계열을 파싱합니다.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let points: Vec<SeriesPoint> = serde_json::from_str(json)?;
        Self::new(points)
    }

    /// 모든 데이터 포인트.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// 포인트 수.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 첫 포인트.
    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    /// 마지막 포인트.
    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// 인덱스로 포인트를 조회합니다.
    pub fn get(&self, index: usize) -> Option<&SeriesPoint> {
        self.points.get(index)
    }

    /// 포인트 목록으로 변환합니다.
    pub fn into_points(self) -> Vec<SeriesPoint> {
        self.points
    }
}

impl TryFrom<Vec<SeriesPoint>> for TimeSeries {
    type Error = ChartError;

    fn try_from(points: Vec<SeriesPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<TimeSeries> for Vec<SeriesPoint> {
    fn from(series: TimeSeries) -> Self {
        series.points
    }
}
