//! 보고 시리즈와 예측 시리즈의 병합.
//!
//! 보고(실측) 시계열 뒤에 예측 시계열을 이어 붙여 차트가 그리는
//! 단일 배열을 만듭니다. 예측 포인트의 보고 필드 키는 예측 필드
//! 키로 바뀌므로, 같은 메트릭이라도 별도의 선으로 그려집니다.

use chrono::{DateTime, Utc};

use fundchart_core::{FieldKey, SeriesPoint, TimeSeries};

/// 보고와 예측을 이어 붙인 표시용 시리즈.
///
/// 예측의 첫 포인트는 마지막 보고 포인트와 같은 X값을 가질 수
/// 있습니다 (예측 선이 보고 선의 끝점에서 출발하는 경우). 따라서
/// 병합 결과는 X값이 엄격 증가가 아니라 비감소인 포인트 배열이며,
/// [`TimeSeries`]가 아닌 원시 배열로 보관합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSeries {
    points: Vec<SeriesPoint>,
    forecast_start: Option<DateTime<Utc>>,
    has_forecast: bool,
}

impl MergedSeries {
    /// 병합된 포인트 배열을 반환합니다.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// 예측 구간이 시작되는 X값을 반환합니다.
    ///
    /// 마지막 보고 포인트의 X값이며, 차트가 예측 경계 기준선을 그릴
    /// 때 사용합니다. 보고 포인트가 없으면 `None`입니다.
    pub fn forecast_start(&self) -> Option<DateTime<Utc>> {
        self.forecast_start
    }

    /// 예측 포인트가 포함되어 있는지 확인합니다.
    pub fn has_forecast(&self) -> bool {
        self.has_forecast
    }

    /// 병합된 포인트 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 포인트가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 보고 시리즈와 예측 시리즈를 병합합니다.
///
/// # 매개변수
/// * `reported` - 보고(실측) 시계열
/// * `forecast` - 예측 시계열 (없거나 비어 있으면 보고만 사용)
///
/// # 반환값
/// 보고 포인트 뒤에 예측 필드 키로 변환된 예측 포인트가 이어진 시리즈
pub fn merge(reported: &TimeSeries, forecast: Option<&TimeSeries>) -> MergedSeries {
    let mut points: Vec<SeriesPoint> = reported.points().to_vec();

    let forecast = forecast.filter(|series| !series.is_empty());
    let has_forecast = forecast.is_some();
    let forecast_start = if has_forecast {
        reported.last().map(|point| point.x)
    } else {
        None
    };

    if let Some(series) = forecast {
        points.extend(series.points().iter().map(to_forecast_point));
    }

    tracing::debug!(
        reported_points = reported.len(),
        total_points = points.len(),
        has_forecast,
        "시리즈 병합 완료"
    );

    MergedSeries {
        points,
        forecast_start,
        has_forecast,
    }
}

/// 포인트의 보고 필드 키를 예측 필드 키로 바꿉니다.
fn to_forecast_point(point: &SeriesPoint) -> SeriesPoint {
    let mut converted = SeriesPoint::new(point.x);
    if let Some(label) = &point.label {
        converted = converted.with_label(label.clone());
    }
    for (key, value) in &point.fields {
        let key = match key {
            FieldKey::Reported(metric) => FieldKey::Forecast(*metric),
            other => *other,
        };
        converted = converted.with_field(key, *value);
    }
    converted
}
