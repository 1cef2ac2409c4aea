//! 차트 상태 컨트롤러.
//!
//! 시리즈 병합, 브러시, 벤치마크 오버레이, 내보내기를 하나의 상태로
//! 묶고, 렌더러가 사용하는 뷰를 원자적으로 계산합니다. 도메인과 틱
//! 단위, Y축은 모두 같은 뷰 계산 안에서 나오므로 서로 어긋나지
//! 않습니다.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fundchart_core::{
    BenchmarkSelection, ChartResult, DisplaySettings, ExportConfig, KpiGroup, MetricKey,
    SeriesPoint, TimeSeries,
};

use crate::export::{
    export_file_stem, BundledExportPayload, ImagesExportPayload, TableExportPayload, TableSettings,
};
use crate::hover::{hover_entries, HoverEntry};
use crate::merge::{merge, MergedSeries};
use crate::overlay::{FetchToken, OverlaySwitch};
use crate::range::{compute_domain, DomainRange};
use crate::selection::{SelectionWindow, SliceConvention};
use crate::ticks::{generate_ticks, resolve_granularity, TickGranularity};
use crate::value_axis::{compute_value_axes, ValueAxes};

/// 차트가 현재 그리는 시리즈 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// 펀드 자체 시리즈
    Primary,
    /// 벤치마크 시리즈
    Benchmark,
}

/// 렌더러에 전달되는 계산 완료 차트 뷰.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    /// 표시 중인 시리즈 종류
    pub mode: ChartMode,
    /// 벤치마크 응답 대기 여부
    pub benchmark_pending: bool,
    /// X축 도메인 (브러시 적용 후)
    pub domain: DomainRange,
    /// X축 틱 단위
    pub granularity: TickGranularity,
    /// 축 날짜 형식 문자열
    pub axis_format: &'static str,
    /// X축 틱 (전체 시리즈 기준)
    pub ticks: Vec<DateTime<Utc>>,
    /// 틱 레이블
    pub tick_labels: Vec<String>,
    /// 브러시 윈도우
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<SelectionWindow>,
    /// 예측 구간 시작 경계
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_start: Option<DateTime<Utc>>,
    /// 활성 메트릭
    pub active_metric: MetricKey,
    /// 좌우 Y축
    pub value_axes: ValueAxes,
    /// 표시 중인 벤치마크 선택
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkSelection>,
    /// 표시 형식 설정
    pub display: DisplaySettings,
}

/// 펀드 성과 차트 컨트롤러.
///
/// 입력 시리즈는 생성 시 한 번 병합되고 이후 상태 변화(브러시, 메트릭
/// 전환, 벤치마크)는 병합 결과를 다시 만들지 않습니다.
#[derive(Debug, Clone)]
pub struct NavChartController {
    entity_name: String,
    merged: MergedSeries,
    primary_window: Option<SelectionWindow>,
    overlay: OverlaySwitch,
    active_metric: MetricKey,
    group: KpiGroup,
    display: DisplaySettings,
    slice_convention: SliceConvention,
    export_subset: Option<Vec<SeriesPoint>>,
}

impl NavChartController {
    /// 보고/예측 시리즈로 컨트롤러를 생성합니다.
    ///
    /// # 매개변수
    /// * `entity_name` - 펀드 이름 (내보내기 파일 이름에 사용)
    /// * `reported` - 보고 시계열
    /// * `forecast` - 예측 시계열 (선택적)
    /// * `display` - 표시 형식 설정
    pub fn new(
        entity_name: impl Into<String>,
        reported: &TimeSeries,
        forecast: Option<&TimeSeries>,
        display: DisplaySettings,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            merged: merge(reported, forecast),
            primary_window: None,
            overlay: OverlaySwitch::new(),
            active_metric: MetricKey::Nav,
            group: KpiGroup::Nav,
            display,
            slice_convention: SliceConvention::default(),
            export_subset: None,
        }
    }

    /// 브러시 슬라이스 규약을 바꿉니다.
    pub fn with_slice_convention(mut self, convention: SliceConvention) -> Self {
        self.slice_convention = convention;
        self
    }

    /// 펀드 이름을 반환합니다.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// 병합된 기본 시리즈를 반환합니다.
    pub fn merged(&self) -> &MergedSeries {
        &self.merged
    }

    /// 활성 메트릭을 반환합니다.
    pub fn active_metric(&self) -> MetricKey {
        self.active_metric
    }

    /// 벤치마크 조회에 사용하는 KPI 그룹을 반환합니다.
    pub fn group(&self) -> KpiGroup {
        self.group
    }

    /// 현재 벤치마크 선택을 반환합니다 (대기 중 포함).
    pub fn benchmark_selection(&self) -> Option<&BenchmarkSelection> {
        self.overlay.selection()
    }

    /// 벤치마크 모드인지 확인합니다.
    pub fn is_benchmark_mode(&self) -> bool {
        self.overlay.is_benchmark_mode()
    }

    /// 벤치마크 응답 대기 중인지 확인합니다.
    pub fn is_benchmark_pending(&self) -> bool {
        self.overlay.is_pending()
    }

    /// 활성 메트릭(NAV 또는 jCurve)을 바꿉니다.
    pub fn set_active_metric(&mut self, metric: MetricKey) {
        if self.active_metric != metric {
            tracing::debug!(metric = %metric, "활성 메트릭 변경");
        }
        self.active_metric = metric;
    }

    /// 현재 활성 시리즈의 포인트를 반환합니다.
    ///
    /// 벤치마크 모드에서는 벤치마크 시리즈, 그 외(응답 대기 중 포함)
    /// 에는 병합된 기본 시리즈입니다.
    pub fn active_points(&self) -> &[SeriesPoint] {
        match self.overlay.benchmark_series() {
            Some(series) => series.points(),
            None => self.merged.points(),
        }
    }

    fn active_window(&self) -> Option<SelectionWindow> {
        if self.overlay.is_benchmark_mode() {
            self.overlay.benchmark_window()
        } else {
            self.primary_window
        }
    }

    /// 브러시 구간을 적용합니다.
    ///
    /// 인덱스는 현재 활성 시리즈 기준이며 범위를 벗어나면 보정됩니다.
    /// 벤치마크 모드의 브러시는 벤치마크 윈도우에만 반영되고 기본
    /// 시리즈의 윈도우는 보존됩니다. 내보내기 부분집합은 항상 기본
    /// 병합 시리즈의 같은 구간에서 만들어집니다.
    pub fn apply_brush(&mut self, start_index: usize, end_index: usize) -> ChartResult<()> {
        let active_len = self.active_points().len();
        let window = SelectionWindow::clamped(start_index, end_index, active_len)?;

        tracing::debug!(
            start = window.start_index(),
            end = window.end_index(),
            benchmark = self.overlay.is_benchmark_mode(),
            "브러시 적용"
        );

        if self.overlay.benchmark_series().is_some() {
            self.overlay.set_window(window);
        } else {
            self.primary_window = Some(window);
        }

        self.export_subset = if self.merged.is_empty() {
            None
        } else {
            let export_window =
                SelectionWindow::clamped(start_index, end_index, self.merged.len())?;
            Some(
                export_window
                    .slice(self.merged.points(), self.slice_convention)
                    .to_vec(),
            )
        };

        Ok(())
    }

    /// 브러시를 해제하고 전체 범위로 돌아갑니다.
    pub fn reset_brush(&mut self) {
        let benchmark_len = self.overlay.benchmark_series().map(|series| series.len());
        match benchmark_len {
            Some(len) => {
                if let Ok(full) = SelectionWindow::full(len) {
                    self.overlay.set_window(full);
                }
            }
            None => self.primary_window = None,
        }
        self.export_subset = None;
    }

    /// 벤치마크 조회를 시작하고 토큰을 발급합니다.
    pub fn request_benchmark(&mut self, selection: BenchmarkSelection) -> FetchToken {
        self.overlay.request_benchmark(selection)
    }

    /// 벤치마크 조회 응답을 적용합니다.
    ///
    /// # 반환값
    /// * `Ok(true)` - 벤치마크 모드로 전환됨
    /// * `Ok(false)` - 낡은 토큰이라 무시됨
    /// * `Err(MissingBenchmarkData)` - 응답이 비어 있음
    pub fn apply_benchmark_data(
        &mut self,
        token: FetchToken,
        series: TimeSeries,
    ) -> ChartResult<bool> {
        self.overlay.apply_benchmark_data(token, series)
    }

    /// 벤치마크를 해제하고 기본 시리즈로 돌아갑니다.
    pub fn clear_benchmark(&mut self) {
        self.overlay.clear_benchmark();
    }

    /// 호버된 X값의 툴팁 항목을 반환합니다.
    pub fn hover(&self, x: DateTime<Utc>) -> Vec<HoverEntry> {
        let benchmark_label = self
            .overlay
            .selection()
            .map(|selection| selection.source.label.as_str());
        hover_entries(self.active_points(), x, benchmark_label)
    }

    /// 현재 상태의 차트 뷰를 계산합니다.
    ///
    /// # 반환값
    /// 활성 시리즈가 비어 있으면 `ChartError::EmptySeries`
    pub fn view(&self) -> ChartResult<ChartView> {
        let points = self.active_points();
        let window = self.active_window();

        let domain = compute_domain(points, window)?;
        let granularity = resolve_granularity(&domain);
        let ticks = generate_ticks(points, granularity, true)?;
        let tick_labels = ticks.iter().map(|tick| granularity.label(*tick)).collect();

        // Y축 범위는 화면에 보이는 포인트만 반영 (끝 포인트 포함)
        let visible = match window {
            Some(window) => window.slice(points, SliceConvention::EndInclusive),
            None => points,
        };
        let value_axes = compute_value_axes(visible, self.active_metric);

        let benchmark_mode = self.overlay.is_benchmark_mode();

        Ok(ChartView {
            mode: if benchmark_mode {
                ChartMode::Benchmark
            } else {
                ChartMode::Primary
            },
            benchmark_pending: self.overlay.is_pending(),
            domain,
            granularity,
            axis_format: granularity.axis_format(),
            ticks,
            tick_labels,
            window,
            forecast_start: if benchmark_mode {
                None
            } else {
                self.merged.forecast_start()
            },
            active_metric: self.active_metric,
            value_axes,
            benchmark: self.overlay.selection().cloned(),
            display: self.display.clone(),
        })
    }

    /// 내보내기 묶음을 구성합니다.
    ///
    /// 표 행은 브러시로 선택해 둔 부분집합이 있으면 그것을, 없으면
    /// 병합 시리즈 전체를 사용합니다. 벤치마크 모드에서도 내보내기는
    /// 기본 시리즈 기준입니다.
    pub fn export_bundle(&self, export: &ExportConfig) -> BundledExportPayload {
        let stem = export_file_stem(&self.entity_name, self.active_metric);
        let rows = match &self.export_subset {
            Some(subset) => subset.clone(),
            None => self.merged.points().to_vec(),
        };

        tracing::info!(
            entity = %self.entity_name,
            metric = %self.active_metric,
            rows = rows.len(),
            "내보내기 묶음 구성"
        );

        BundledExportPayload {
            zip_file_name: stem.clone(),
            tables: TableExportPayload {
                settings: TableSettings::for_metric(self.active_metric, &stem),
                rows,
            },
            images: ImagesExportPayload::standard(
                &stem,
                &export.chart_element_id,
                &export.background_color,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fundchart_core::{BenchmarkOption, ChartError, FieldKey};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn quarterly_reported(count: usize) -> TimeSeries {
        let mut date = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let points = (0..count)
            .map(|i| {
                let point = SeriesPoint::new(date)
                    .with_field(
                        FieldKey::Reported(MetricKey::Nav),
                        Decimal::from(1000 + i as i64 * 50),
                    )
                    .with_field(FieldKey::Reported(MetricKey::Contributions), dec!(-100));
                date = fundchart_core::date::next_quarter_start(date).unwrap();
                point
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    fn forecast_after(reported: &TimeSeries, count: usize) -> TimeSeries {
        let mut date = reported.last().map(|point| point.x).unwrap();
        let points = (0..count)
            .map(|i| {
                let point = SeriesPoint::new(date).with_field(
                    FieldKey::Reported(MetricKey::Nav),
                    Decimal::from(1400 + i as i64 * 50),
                );
                date = fundchart_core::date::next_quarter_start(date).unwrap();
                point
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    fn benchmark_series(count: usize) -> TimeSeries {
        let mut date = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let points = (0..count)
            .map(|i| {
                let point = SeriesPoint::new(date)
                    .with_field(FieldKey::Benchmark(MetricKey::Nav), Decimal::from(i as i64))
                    .with_label("S&P 500");
                date = fundchart_core::date::next_quarter_start(date).unwrap();
                point
            })
            .collect();
        TimeSeries::new(points).unwrap()
    }

    fn create_selection() -> BenchmarkSelection {
        BenchmarkSelection::new(
            BenchmarkOption::new("NAV", "NAV"),
            BenchmarkOption::new("sp500", "S&P 500"),
        )
    }

    fn create_controller(reported_count: usize, forecast_count: usize) -> NavChartController {
        let reported = quarterly_reported(reported_count);
        let forecast = forecast_after(&reported, forecast_count);
        NavChartController::new(
            "Alpha Fund",
            &reported,
            Some(&forecast),
            DisplaySettings::default(),
        )
    }

    #[test]
    fn test_view_full_range() {
        let controller = create_controller(8, 0);
        let view = controller.view().unwrap();

        assert_eq!(view.mode, ChartMode::Primary);
        assert!(!view.benchmark_pending);
        assert_eq!(view.domain.length, 8);
        // 2년 범위는 분기 틱
        assert_eq!(view.granularity, TickGranularity::Quarter);
        assert_eq!(view.axis_format, "QQ 'YY");
        assert_eq!(view.ticks.len(), view.tick_labels.len());
        assert_eq!(view.tick_labels[0], "Q1 '19");
        assert!(view.window.is_none());
        assert!(view.value_axes.left.is_some());
        assert!(view.value_axes.right.is_some());
    }

    #[test]
    fn test_forecast_boundary_in_view() {
        let controller = create_controller(4, 3);
        let view = controller.view().unwrap();

        let expected = Utc.with_ymd_and_hms(2019, 10, 1, 0, 0, 0).unwrap();
        assert_eq!(view.forecast_start, Some(expected));
        // 병합 결과: 보고 4 + 예측 3
        assert_eq!(controller.merged().len(), 7);
    }

    #[test]
    fn test_apply_brush_narrows_domain() {
        let mut controller = create_controller(8, 0);
        let full_ticks = controller.view().unwrap().ticks;

        controller.apply_brush(2, 5).unwrap();
        let view = controller.view().unwrap();

        assert_eq!(view.domain.length, 4);
        assert_eq!(
            view.domain.from,
            Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(view.window.unwrap().start_index(), 2);

        // 틱은 브러시와 무관하게 전체 시리즈에서 생성됨
        assert_eq!(view.ticks, full_ticks);
    }

    #[test]
    fn test_granularity_follows_brushed_domain() {
        // 6년치 분기 데이터: 전체는 연간, 좁힌 범위는 분기
        let mut controller = create_controller(24, 0);
        assert_eq!(
            controller.view().unwrap().granularity,
            TickGranularity::Year
        );

        controller.apply_brush(0, 4).unwrap();
        assert_eq!(
            controller.view().unwrap().granularity,
            TickGranularity::Quarter
        );
    }

    #[test]
    fn test_brush_out_of_range_clamped() {
        let mut controller = create_controller(4, 0);
        controller.apply_brush(2, 99).unwrap();

        let view = controller.view().unwrap();
        assert_eq!(view.window.unwrap().end_index(), 3);
    }

    #[test]
    fn test_value_axes_reflect_visible_points() {
        let mut controller = create_controller(8, 0);
        let full = controller.view().unwrap().value_axes.left.unwrap();

        // NAV 1000..1350 중 1100..1200 구간만 표시
        controller.apply_brush(2, 4).unwrap();
        let narrowed = controller.view().unwrap().value_axes.left.unwrap();

        assert!(narrowed.max <= full.max);
        assert!(narrowed.min >= full.min);
        assert!(narrowed.max >= dec!(1200));
    }

    #[test]
    fn test_benchmark_flow() {
        let mut controller = create_controller(8, 0);
        controller.apply_brush(1, 6).unwrap();

        let token = controller.request_benchmark(create_selection());
        assert!(controller.is_benchmark_pending());
        // 대기 중에도 기본 시리즈로 그림
        assert_eq!(controller.view().unwrap().mode, ChartMode::Primary);
        assert!(controller.view().unwrap().benchmark_pending);

        let applied = controller
            .apply_benchmark_data(token, benchmark_series(6))
            .unwrap();
        assert!(applied);

        let view = controller.view().unwrap();
        assert_eq!(view.mode, ChartMode::Benchmark);
        assert_eq!(view.domain.length, 6);
        assert!(view.forecast_start.is_none());
        assert_eq!(view.benchmark.unwrap().source.name, "sp500");
    }

    #[test]
    fn test_benchmark_brush_preserves_primary_window() {
        let mut controller = create_controller(8, 0);
        controller.apply_brush(1, 6).unwrap();

        let token = controller.request_benchmark(create_selection());
        controller
            .apply_benchmark_data(token, benchmark_series(6))
            .unwrap();

        // 벤치마크 모드의 브러시는 벤치마크 윈도우에만 적용
        controller.apply_brush(0, 2).unwrap();
        let view = controller.view().unwrap();
        assert_eq!(view.domain.length, 3);

        // 해제하면 기본 시리즈의 이전 윈도우가 그대로
        controller.clear_benchmark();
        let view = controller.view().unwrap();
        assert_eq!(view.mode, ChartMode::Primary);
        let window = view.window.unwrap();
        assert_eq!(window.start_index(), 1);
        assert_eq!(window.end_index(), 6);
    }

    #[test]
    fn test_export_bundle_subset() {
        let mut controller = create_controller(8, 0);
        let export = ExportConfig::default();

        // 브러시 전에는 전체
        let bundle = controller.export_bundle(&export);
        assert_eq!(bundle.tables.rows.len(), 8);
        assert_eq!(bundle.zip_file_name, "Alpha Fund_FundPerformance_Nav");

        // 기본 규약(끝 제외)으로 부분집합 기록
        controller.apply_brush(2, 5).unwrap();
        let bundle = controller.export_bundle(&export);
        assert_eq!(bundle.tables.rows.len(), 3);
        assert_eq!(
            bundle.tables.rows[0].x,
            Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_export_subset_end_inclusive_convention() {
        let mut controller =
            create_controller(8, 0).with_slice_convention(SliceConvention::EndInclusive);

        controller.apply_brush(2, 5).unwrap();
        let bundle = controller.export_bundle(&ExportConfig::default());
        assert_eq!(bundle.tables.rows.len(), 4);
    }

    #[test]
    fn test_export_in_benchmark_mode_uses_primary_rows() {
        let mut controller = create_controller(8, 0);
        let token = controller.request_benchmark(create_selection());
        controller
            .apply_benchmark_data(token, benchmark_series(4))
            .unwrap();

        let bundle = controller.export_bundle(&ExportConfig::default());
        assert_eq!(bundle.tables.rows.len(), 8);
        assert!(bundle.tables.rows[0]
            .reported(MetricKey::Nav)
            .is_some());
    }

    #[test]
    fn test_metric_switch_changes_export_names() {
        let mut controller = create_controller(4, 0);
        controller.set_active_metric(MetricKey::JCurve);

        let bundle = controller.export_bundle(&ExportConfig::default());
        assert_eq!(bundle.zip_file_name, "Alpha Fund_FundPerformance_jCurve");
        assert_eq!(bundle.tables.settings.sheet_name, "Fund Performance jCurve");
    }

    #[test]
    fn test_hover_uses_benchmark_label() {
        let mut controller = create_controller(4, 0);
        let token = controller.request_benchmark(create_selection());
        controller
            .apply_benchmark_data(token, benchmark_series(4))
            .unwrap();

        let x = Utc.with_ymd_and_hms(2019, 4, 1, 0, 0, 0).unwrap();
        let entries = controller.hover(x);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label.as_deref(), Some("S&P 500"));
    }

    #[test]
    fn test_view_on_empty_series() {
        let controller = NavChartController::new(
            "Empty Fund",
            &TimeSeries::empty(),
            None,
            DisplaySettings::default(),
        );

        let result = controller.view();
        assert!(matches!(result, Err(ChartError::EmptySeries)));
        assert!(result.unwrap_err().is_empty_display());
    }
}
