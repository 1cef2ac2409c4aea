//! 차트 표시 설정.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;

/// 차트 표시 설정.
///
/// 파이프라인이 계산에 쓰지 않고 파생 뷰로 그대로 통과시키는
/// 프레젠테이션 값입니다. 포맷 문자열의 해석은 렌더러 몫입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// 값 포맷 문자열
    pub value_format: String,
    /// Y축 포맷 문자열
    pub y_axis_format: String,
    /// 툴팁 포맷 문자열
    pub tooltip_format: String,
    /// 통화 코드
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// 데이터 확정(사인오프) 기준일
    ///
    /// 이후 구간은 아직 확정되지 않은 데이터로 표시됩니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_off_date: Option<DateTime<Utc>>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl DisplaySettings {
    /// 차트 설정의 기본값으로 표시 설정을 만듭니다.
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            value_format: config.default_value_format.clone(),
            y_axis_format: config.default_y_axis_format.clone(),
            tooltip_format: config.default_tooltip_format.clone(),
            currency: config.default_currency.clone(),
            sign_off_date: None,
        }
    }

    /// 사인오프 기준일을 설정합니다.
    pub fn with_sign_off_date(mut self, date: DateTime<Utc>) -> Self {
        self.sign_off_date = Some(date);
        self
    }

    /// 통화 코드를 설정합니다.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_settings() {
        let settings = DisplaySettings::default();
        assert!(!settings.value_format.is_empty());
        assert!(settings.sign_off_date.is_none());
    }

    #[test]
    fn test_builder_style() {
        let sign_off = Utc.with_ymd_and_hms(2023, 6, 30, 0, 0, 0).unwrap();
        let settings = DisplaySettings::default()
            .with_currency("EUR")
            .with_sign_off_date(sign_off);

        assert_eq!(settings.currency.as_deref(), Some("EUR"));
        assert_eq!(settings.sign_off_date, Some(sign_off));
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let settings = DisplaySettings {
            currency: None,
            ..DisplaySettings::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert!(value.get("currency").is_none());
        assert!(value.get("sign_off_date").is_none());
    }
}
