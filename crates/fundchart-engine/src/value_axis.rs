//! Y축 눈금 계산.
//!
//! 표시 중인 포인트에서 좌우 Y축의 범위와 눈금을 계산합니다. 왼쪽
//! 축은 활성 메트릭(보고/예측/벤치마크 선), 오른쪽 축은 출자/분배
//! 막대가 사용합니다. 눈금 간격은 1-2-2.5-5 사다리에서 고릅니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use fundchart_core::{FieldKey, MetricKey, SeriesPoint};

/// 축 하나의 눈금 수.
pub const AXIS_TICK_COUNT: usize = 5;

/// 눈금 간격 후보 가수.
const NICE_MANTISSAS: [&str; 4] = ["1", "2", "2.5", "5"];

/// 계산된 Y축 스케일.
///
/// `min`과 `max`는 데이터 범위를 덮도록 눈금 간격의 배수로 확장된
/// 값입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisScale {
    /// 축 하한 (첫 눈금)
    pub min: Decimal,
    /// 축 상한 (마지막 눈금)
    pub max: Decimal,
    /// 눈금 간격
    pub step: Decimal,
    /// 눈금 값 목록 (오름차순, [`AXIS_TICK_COUNT`]개)
    pub ticks: Vec<Decimal>,
}

/// 차트의 좌우 Y축 스케일.
///
/// 해당 축에 그릴 값이 하나도 없으면 그 축은 `None`입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueAxes {
    /// 왼쪽 축 (활성 메트릭 선)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<AxisScale>,
    /// 오른쪽 축 (출자/분배 막대)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<AxisScale>,
}

/// 표시 중인 포인트에서 좌우 Y축 스케일을 계산합니다.
///
/// # 매개변수
/// * `points` - 현재 표시 중인 포인트 (브러시 적용 후)
/// * `active_metric` - 왼쪽 축에 그리는 활성 메트릭
pub fn compute_value_axes(points: &[SeriesPoint], active_metric: MetricKey) -> ValueAxes {
    let left_keys = [
        FieldKey::Reported(active_metric),
        FieldKey::Forecast(active_metric),
        FieldKey::Benchmark(active_metric),
    ];
    let right_keys = [
        FieldKey::Reported(MetricKey::Contributions),
        FieldKey::Forecast(MetricKey::Contributions),
        FieldKey::Reported(MetricKey::Distributions),
        FieldKey::Forecast(MetricKey::Distributions),
    ];

    let left = value_bounds(points, &left_keys).map(|(min, max)| build_scale(min, max));

    // 막대 축은 항상 0 기준선을 포함
    let right = value_bounds(points, &right_keys)
        .map(|(min, max)| build_scale(min.min(Decimal::ZERO), max.max(Decimal::ZERO)));

    ValueAxes { left, right }
}

/// 주어진 필드 키들의 최소/최대값을 찾습니다.
fn value_bounds(points: &[SeriesPoint], keys: &[FieldKey]) -> Option<(Decimal, Decimal)> {
    let mut bounds: Option<(Decimal, Decimal)> = None;
    for point in points {
        for key in keys {
            if let Some(value) = point.field(*key) {
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(value), max.max(value)),
                    None => (value, value),
                });
            }
        }
    }
    bounds
}

/// 데이터 범위를 덮는 눈금 스케일을 만듭니다.
///
/// 간격 후보(1, 2, 2.5, 5의 10의 거듭제곱 배) 중 원시 간격 이상인 가장
/// 작은 값에서 시작해서, 하한을 간격 배수로 내린 뒤 고정 눈금 수로
/// 상한까지 덮지 못하면 다음 후보로 올립니다.
fn build_scale(min: Decimal, max: Decimal) -> AxisScale {
    let intervals = Decimal::from(AXIS_TICK_COUNT as i64 - 1);
    let range = max - min;
    let raw = if range.is_zero() {
        let flat = max.abs() / intervals;
        if flat.is_zero() {
            Decimal::ONE
        } else {
            flat
        }
    } else {
        range / intervals
    };

    let mut ladder = StepLadder::starting_at(raw);
    let mut step = ladder.current();
    let mut first = (min / step).floor() * step;
    let mut last = first + step * intervals;

    let mut guard = 0;
    while last < max && guard < 8 {
        ladder.ascend();
        step = ladder.current();
        first = (min / step).floor() * step;
        last = first + step * intervals;
        guard += 1;
    }

    let ticks = (0..AXIS_TICK_COUNT)
        .map(|i| first + step * Decimal::from(i as i64))
        .collect();

    AxisScale {
        min: first,
        max: last,
        step,
        ticks,
    }
}

/// 1-2-2.5-5 간격 사다리의 현재 위치.
struct StepLadder {
    index: usize,
    exponent: i32,
}

impl StepLadder {
    /// 원시 간격 이상인 가장 작은 후보에서 시작합니다.
    fn starting_at(raw: Decimal) -> Self {
        let raw = if raw <= Decimal::ZERO {
            Decimal::ONE
        } else {
            raw
        };
        // 지수 추정에만 f64를 사용하고 비교는 Decimal로 수행
        let exponent = raw.to_f64().unwrap_or(1.0).abs().log10().floor() as i32;
        let mut ladder = Self { index: 0, exponent };
        let mut guard = 0;
        while ladder.current() < raw && guard < 8 {
            ladder.ascend();
            guard += 1;
        }
        ladder
    }

    fn current(&self) -> Decimal {
        Decimal::from_scientific(&format!("{}e{}", NICE_MANTISSAS[self.index], self.exponent))
            .unwrap_or(Decimal::MAX)
    }

    fn ascend(&mut self) {
        self.index += 1;
        if self.index >= NICE_MANTISSAS.len() {
            self.index = 0;
            self.exponent += 1;
        }
    }
}
