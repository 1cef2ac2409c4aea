//! # Fundchart Engine
//!
//! 펀드 성과 NAV 차트의 계산 엔진입니다.
//!
//! 보고/예측 시계열 병합, X축 도메인과 틱 계산, 브러시 범위 선택,
//! 벤치마크 오버레이 전환, 내보내기 페이로드 구성을 제공합니다.
//! 렌더링 자체는 하지 않으며, 렌더러가 그대로 그릴 수 있는 값을
//! 계산합니다.
//!
//! ## 사용 예
//!
//! ```
//! use fundchart_core::{DisplaySettings, TimeSeries};
//! use fundchart_engine::NavChartController;
//!
//! # fn main() -> fundchart_core::ChartResult<()> {
//! let reported = TimeSeries::from_json(
//!     r#"[
//!         {"x": "2020-03-31", "NAV": 1000, "Contributions": -900},
//!         {"x": "2020-06-30", "NAV": 1150}
//!     ]"#,
//! )?;
//!
//! let controller = NavChartController::new(
//!     "Alpha Fund",
//!     &reported,
//!     None,
//!     DisplaySettings::default(),
//! );
//! let view = controller.view()?;
//! assert_eq!(view.domain.length, 2);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod export;
pub mod hover;
pub mod merge;
pub mod overlay;
pub mod range;
pub mod selection;
pub mod ticks;
pub mod value_axis;

pub use controller::{ChartMode, ChartView, NavChartController};
pub use export::{
    export_file_stem, BundledExportPayload, ColumnAlign, ColumnSpec, ImageExportOption,
    ImageFormat, ImagesExportPayload, TableExportPayload, TableSettings,
};
pub use hover::{hover_entries, HoverEntry};
pub use merge::{merge, MergedSeries};
pub use overlay::{FetchToken, OverlayState, OverlaySwitch};
pub use range::{compute_domain, DomainRange};
pub use selection::{SelectionWindow, SliceConvention};
pub use ticks::{generate_ticks, resolve_granularity, TickGranularity};
pub use value_axis::{compute_value_axes, AxisScale, ValueAxes};
