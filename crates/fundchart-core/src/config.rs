//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다. 설정 파일이
//! 없어도 기본값으로 동작하며, `FUNDCHART__` 접두사 환경 변수로
//! 개별 값을 오버라이드할 수 있습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 차트 기본 설정
    #[serde(default)]
    pub chart: ChartConfig,
    /// 내보내기 설정
    #[serde(default)]
    pub export: ExportConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 차트 기본 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    /// 기본 값 포맷
    pub default_value_format: String,
    /// 기본 Y축 포맷
    pub default_y_axis_format: String,
    /// 기본 툴팁 포맷
    pub default_tooltip_format: String,
    /// 기본 통화 코드
    #[serde(default)]
    pub default_currency: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_value_format: "0,0.00".to_string(),
            default_y_axis_format: "0.0a".to_string(),
            default_tooltip_format: "0,0.00".to_string(),
            default_currency: None,
        }
    }
}

/// 내보내기 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// 불투명 배경 이미지의 배경색
    pub background_color: String,
    /// 캡처할 차트 요소 id
    pub chart_element_id: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background_color: "#202020".to_string(),
            chart_element_id: "performance-chart".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값에 환경 변수만 적용됩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("FUNDCHART")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}
