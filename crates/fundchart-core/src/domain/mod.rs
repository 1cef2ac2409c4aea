//! 도메인 모델.
//!
//! 시계열 포인트/컨테이너, 벤치마크 선택 모델, 표시 설정을 제공합니다.

pub mod benchmark;
pub mod display;
pub mod point;
pub mod series;

pub use benchmark::{BenchmarkOption, BenchmarkProvider, BenchmarkSelection, KpiGroup};
pub use display::DisplaySettings;
pub use point::SeriesPoint;
pub use series::TimeSeries;
