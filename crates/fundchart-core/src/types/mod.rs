//! 공유 타입 정의.
//!
//! 메트릭/필드 키 체계와 캘린더 날짜 보조 함수를 제공합니다.

pub mod date;
pub mod metric;

pub use metric::{FieldKey, MetricKey, MetricValue, BENCHMARK_PREFIX, FORECAST_PREFIX};
