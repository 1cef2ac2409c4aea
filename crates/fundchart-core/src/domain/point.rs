//! 시계열 데이터 포인트.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ChartError;
use crate::types::{date, FieldKey, MetricKey};

/// 차트 시계열의 단일 데이터 포인트.
///
/// 각 포인트는 X축 시각과 해당 시점에 존재하는 필드 값의 희소 집합을
/// 가집니다. 생성 후에는 변경하지 않는 불변 값으로 다룹니다.
///
/// 직렬화 형태는 평탄한 맵입니다:
/// `{"x": "2020-01-01T00:00:00Z", "NAV": "1000", "NC NAV": "1100"}`
///
/// 역직렬화 시 `null` 필드 값은 결측으로 버려지고, 알 수 없는 필드
/// 이름은 무시됩니다. X축 값은 날짜 문자열과 에포크 밀리초를 모두
/// 허용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeriesPoint")]
pub struct SeriesPoint {
    /// X축 시각 (UTC)
    pub x: DateTime<Utc>,
    /// 표시용 레이블 (선택적, 벤치마크 포인트에 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// 필드 값 (희소)
    #[serde(flatten)]
    pub fields: BTreeMap<FieldKey, Decimal>,
}

impl SeriesPoint {
    /// 필드가 없는 새 데이터 포인트를 생성합니다.
    pub fn new(x: DateTime<Utc>) -> Self {
        Self {
            x,
            label: None,
            fields: BTreeMap::new(),
        }
    }

    /// 필드 값을 추가한 포인트를 반환합니다.
    pub fn with_field(mut self, key: FieldKey, value: Decimal) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// 레이블을 설정한 포인트를 반환합니다.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 특정 필드 값을 반환합니다.
    pub fn field(&self, key: FieldKey) -> Option<Decimal> {
        self.fields.get(&key).copied()
    }

    /// 특정 메트릭의 보고 값을 반환합니다.
    pub fn reported(&self, metric: MetricKey) -> Option<Decimal> {
        self.field(FieldKey::Reported(metric))
    }

    /// 특정 메트릭의 전망 값을 반환합니다.
    pub fn forecast(&self, metric: MetricKey) -> Option<Decimal> {
        self.field(FieldKey::Forecast(metric))
    }

    /// 필드가 하나도 없는지 확인합니다.
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 역직렬화 브리지.
///
/// 데이터 피드가 보내는 느슨한 형태(문자열/밀리초 날짜, null 값)를
/// 받아들이고 검증된 [`SeriesPoint`]로 변환합니다.
#[derive(Debug, Deserialize)]
struct RawSeriesPoint {
    x: RawDateValue,
    #[serde(default)]
    label: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, Option<Decimal>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDateValue {
    Millis(i64),
    Text(String),
}

impl TryFrom<RawSeriesPoint> for SeriesPoint {
    type Error = ChartError;

    fn try_from(raw: RawSeriesPoint) -> Result<Self, Self::Error> {
        let x = match raw.x {
            RawDateValue::Millis(ms) => date::from_epoch_millis(ms)?,
            RawDateValue::Text(s) => date::parse_chart_date(&s)?,
        };

        let mut fields = BTreeMap::new();
        for (name, value) in raw.fields {
            let Some(value) = value else {
                continue;
            };
            if let Some(key) = FieldKey::parse(&name) {
                fields.insert(key, value);
            }
        }

        Ok(Self {
            x,
            label: raw.label,
            fields,
        })
    }
}
