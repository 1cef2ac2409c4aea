//! 차트 메트릭 및 필드 키 정의.
//!
//! 이 모듈은 차트가 다루는 메트릭의 폐쇄된 집합과, 시계열 포인트의
//! 필드 이름 체계(보고/전망/벤치마크)를 타입으로 정의합니다.
//! 문자열 접두사 조합 대신 타입 변환으로 필드 이름을 만들기 때문에
//! 잘못된 키 조합이 컴파일 타임에 걸러집니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 메트릭 값 타입.
pub type MetricValue = Decimal;

/// 전망(니어캐스팅) 필드 이름 접두사.
pub const FORECAST_PREFIX: &str = "NC ";

/// 벤치마크 필드 이름 접두사.
pub const BENCHMARK_PREFIX: &str = "benchmarking_";

/// 차트 메트릭.
///
/// 이 차트가 표시하는 메트릭의 폐쇄된 집합입니다. NAV와 J-커브는
/// 라인으로, 출자/분배는 막대로 그려집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    /// 순자산가치
    #[serde(rename = "NAV")]
    Nav,
    /// J-커브 (누적 순현금흐름)
    #[serde(rename = "jCurve")]
    JCurve,
    /// 출자 (캐피탈 콜)
    Contributions,
    /// 분배
    Distributions,
}

impl MetricKey {
    /// 모든 메트릭.
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Nav,
        MetricKey::JCurve,
        MetricKey::Contributions,
        MetricKey::Distributions,
    ];

    /// 와이어 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Nav => "NAV",
            MetricKey::JCurve => "jCurve",
            MetricKey::Contributions => "Contributions",
            MetricKey::Distributions => "Distributions",
        }
    }

    /// 와이어 이름에서 파싱합니다.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "NAV" => Some(MetricKey::Nav),
            "jCurve" => Some(MetricKey::JCurve),
            "Contributions" => Some(MetricKey::Contributions),
            "Distributions" => Some(MetricKey::Distributions),
            _ => None,
        }
    }

    /// 막대로 그려지는 현금 흐름 메트릭인지 확인합니다.
    pub fn is_flow(&self) -> bool {
        matches!(self, MetricKey::Contributions | MetricKey::Distributions)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Invalid metric key: {}", s))
    }
}

/// 시계열 포인트의 필드 키.
///
/// 같은 메트릭이라도 출처에 따라 다른 필드 이름을 가집니다:
/// - 보고 값: 메트릭 이름 그대로 (`"NAV"`)
/// - 전망 값: `"NC "` 접두사 (`"NC NAV"`)
/// - 벤치마크 값: `"benchmarking_"` 접두사 + 소문자 (`"benchmarking_nav"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// 보고된 실적 값
    Reported(MetricKey),
    /// 전망(니어캐스팅) 값
    Forecast(MetricKey),
    /// 벤치마크 값
    Benchmark(MetricKey),
}

impl FieldKey {
    /// 이 필드가 속한 메트릭.
    pub fn metric(&self) -> MetricKey {
        match self {
            FieldKey::Reported(m) | FieldKey::Forecast(m) | FieldKey::Benchmark(m) => *m,
        }
    }

    /// 와이어 필드 이름을 만듭니다.
    pub fn wire_name(&self) -> String {
        match self {
            FieldKey::Reported(m) => m.as_str().to_string(),
            FieldKey::Forecast(m) => format!("{}{}", FORECAST_PREFIX, m.as_str()),
            FieldKey::Benchmark(m) => {
                format!("{}{}", BENCHMARK_PREFIX, m.as_str().to_lowercase())
            }
        }
    }

    /// 와이어 필드 이름에서 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(rest) = s.strip_prefix(FORECAST_PREFIX) {
            return MetricKey::from_name(rest).map(FieldKey::Forecast);
        }
        if let Some(rest) = s.strip_prefix(BENCHMARK_PREFIX) {
            return MetricKey::ALL
                .iter()
                .find(|m| m.as_str().to_lowercase() == rest)
                .copied()
                .map(FieldKey::Benchmark);
        }
        MetricKey::from_name(s).map(FieldKey::Reported)
    }

    /// 보고 필드인지 확인합니다.
    pub fn is_reported(&self) -> bool {
        matches!(self, FieldKey::Reported(_))
    }

    /// 전망 필드인지 확인합니다.
    pub fn is_forecast(&self) -> bool {
        matches!(self, FieldKey::Forecast(_))
    }

    /// 벤치마크 필드인지 확인합니다.
    pub fn is_benchmark(&self) -> bool {
        matches!(self, FieldKey::Benchmark(_))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid field key: {}", s))
    }
}

// 맵 키로 쓰이므로 문자열로 직렬화합니다.
impl Serialize for FieldKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.wire_name())
    }
}

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FieldKey::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown chart field key: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_wire_names() {
        assert_eq!(MetricKey::Nav.as_str(), "NAV");
        assert_eq!(MetricKey::JCurve.as_str(), "jCurve");
        assert_eq!(MetricKey::from_name("NAV"), Some(MetricKey::Nav));
        assert_eq!(MetricKey::from_name("nav"), None);
    }

    #[test]
    fn test_field_key_wire_names() {
        assert_eq!(FieldKey::Reported(MetricKey::Nav).wire_name(), "NAV");
        assert_eq!(FieldKey::Forecast(MetricKey::Nav).wire_name(), "NC NAV");
        assert_eq!(FieldKey::Forecast(MetricKey::JCurve).wire_name(), "NC jCurve");
        assert_eq!(
            FieldKey::Benchmark(MetricKey::Nav).wire_name(),
            "benchmarking_nav"
        );
        assert_eq!(
            FieldKey::Benchmark(MetricKey::JCurve).wire_name(),
            "benchmarking_jcurve"
        );
    }

    #[test]
    fn test_field_key_parse_roundtrip() {
        for metric in MetricKey::ALL {
            for key in [
                FieldKey::Reported(metric),
                FieldKey::Forecast(metric),
                FieldKey::Benchmark(metric),
            ] {
                assert_eq!(FieldKey::parse(&key.wire_name()), Some(key));
            }
        }
    }

    #[test]
    fn test_field_key_parse_unknown() {
        assert_eq!(FieldKey::parse("Gross IRR"), None);
        assert_eq!(FieldKey::parse("NC "), None);
        assert_eq!(FieldKey::parse("benchmarking_irr"), None);
    }

    #[test]
    fn test_metric_serde_as_wire_name() {
        let json = serde_json::to_string(&MetricKey::JCurve).unwrap();
        assert_eq!(json, "\"jCurve\"");

        let parsed: MetricKey = serde_json::from_str("\"NAV\"").unwrap();
        assert_eq!(parsed, MetricKey::Nav);
    }

    #[test]
    fn test_flow_metrics() {
        assert!(MetricKey::Contributions.is_flow());
        assert!(MetricKey::Distributions.is_flow());
        assert!(!MetricKey::Nav.is_flow());
        assert!(!MetricKey::JCurve.is_flow());
    }
}
