//! 호버 툴팁 항목 구성.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use fundchart_core::{FieldKey, SeriesPoint};

/// 툴팁에 표시되는 항목 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverEntry {
    /// 항목의 필드 키
    pub key: FieldKey,
    /// 해당 시점의 값
    pub value: Decimal,
    /// 표시용 레이블 (벤치마크 항목에 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// 호버된 X값의 툴팁 항목을 수집합니다.
///
/// 보고/예측 경계에서는 같은 X값을 가진 포인트가 둘이므로 배열
/// 전체에서 일치하는 포인트를 모두 모읍니다. 경계 위에서 보고 값과
/// 예측 값이 같이 잡히면 보고 값만 남깁니다 (예측 선의 출발점은
/// 마지막 보고 값의 복제이므로 중복 표시를 피합니다).
///
/// # 매개변수
/// * `points` - 표시 중인 포인트 배열
/// * `x` - 호버된 X값
/// * `benchmark_label` - 포인트에 레이블이 없을 때 벤치마크 항목에
///   붙일 기본 레이블
pub fn hover_entries(
    points: &[SeriesPoint],
    x: DateTime<Utc>,
    benchmark_label: Option<&str>,
) -> Vec<HoverEntry> {
    let mut entries = Vec::new();

    for point in points.iter().filter(|point| point.x == x) {
        for (key, value) in &point.fields {
            let label = if key.is_benchmark() {
                point
                    .label
                    .clone()
                    .or_else(|| benchmark_label.map(String::from))
            } else {
                None
            };
            entries.push(HoverEntry {
                key: *key,
                value: *value,
                label,
            });
        }
    }

    let has_reported = entries.iter().any(|entry| entry.key.is_reported());
    let has_forecast = entries.iter().any(|entry| entry.key.is_forecast());
    if has_reported && has_forecast {
        entries.retain(|entry| !entry.key.is_forecast());
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fundchart_core::MetricKey;
    use rust_decimal_macros::dec;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_entries_for_plain_point() {
        let points = vec![
            SeriesPoint::new(utc(2020, 3, 31))
                .with_field(FieldKey::Reported(MetricKey::Nav), dec!(1000))
                .with_field(FieldKey::Reported(MetricKey::Contributions), dec!(-900)),
            SeriesPoint::new(utc(2020, 6, 30))
                .with_field(FieldKey::Reported(MetricKey::Nav), dec!(1150)),
        ];

        let entries = hover_entries(&points, utc(2020, 3, 31), None);
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .any(|e| e.key == FieldKey::Reported(MetricKey::Nav) && e.value == dec!(1000)));
    }

    #[test]
    fn test_junction_keeps_reported_only() {
        // 경계 포인트: 보고 포인트와 예측 출발 포인트가 같은 X값
        let x = utc(2020, 6, 30);
        let points = vec![
            SeriesPoint::new(x).with_field(FieldKey::Reported(MetricKey::Nav), dec!(1150)),
            SeriesPoint::new(x).with_field(FieldKey::Forecast(MetricKey::Nav), dec!(1150)),
        ];

        let entries = hover_entries(&points, x, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, FieldKey::Reported(MetricKey::Nav));
    }

    #[test]
    fn test_forecast_only_point_keeps_forecast() {
        let x = utc(2020, 9, 30);
        let points = vec![
            SeriesPoint::new(x).with_field(FieldKey::Forecast(MetricKey::Nav), dec!(1300))
        ];

        let entries = hover_entries(&points, x, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, FieldKey::Forecast(MetricKey::Nav));
    }

    #[test]
    fn test_benchmark_label_fallback() {
        let x = utc(2020, 3, 31);
        let labelled = SeriesPoint::new(x)
            .with_field(FieldKey::Benchmark(MetricKey::Nav), dec!(210))
            .with_label("S&P 500");
        let bare =
            SeriesPoint::new(x).with_field(FieldKey::Benchmark(MetricKey::Nav), dec!(210));

        let entries = hover_entries(std::slice::from_ref(&labelled), x, Some("MSCI World"));
        assert_eq!(entries[0].label.as_deref(), Some("S&P 500"));

        let entries = hover_entries(std::slice::from_ref(&bare), x, Some("MSCI World"));
        assert_eq!(entries[0].label.as_deref(), Some("MSCI World"));
    }

    #[test]
    fn test_no_match_is_empty() {
        let points = vec![
            SeriesPoint::new(utc(2020, 3, 31)).with_field(FieldKey::Reported(MetricKey::Nav), dec!(1000))
        ];
        assert!(hover_entries(&points, utc(2020, 4, 1), None).is_empty());
    }
}
