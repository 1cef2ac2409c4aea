//! 벤치마크 오버레이 모드 전환.
//!
//! 기본 모드와 벤치마크 모드 사이의 상태 기계입니다. 벤치마크 조회는
//! 비동기이므로 응답이 돌아왔을 때 사용자가 이미 다른 선택을 했거나
//! 오버레이를 해제했을 수 있습니다. 요청마다 토큰을 발급하고 응답의
//! 토큰을 검사해서 낡은 응답을 버립니다.

use serde::Serialize;

use fundchart_core::{BenchmarkSelection, ChartError, ChartResult, TimeSeries};

use crate::selection::SelectionWindow;

/// 벤치마크 조회 요청 토큰.
///
/// [`OverlaySwitch::request_benchmark`]가 발급하며, 응답을 적용할 때
/// 같은 토큰을 제시해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchToken(u64);

impl std::fmt::Display for FetchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 오버레이 상태.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
    /// 기본 모드: 펀드 자체 시리즈를 표시
    Primary,
    /// 벤치마크가 선택되었고 데이터 도착을 기다리는 중
    BenchmarkPending {
        /// 조회 중인 선택
        selection: BenchmarkSelection,
        /// 이 요청에 발급된 토큰
        token: FetchToken,
    },
    /// 벤치마크 모드: 벤치마크 시리즈를 표시
    Benchmark {
        /// 적용된 선택
        selection: BenchmarkSelection,
        /// 벤치마크 시계열
        series: TimeSeries,
        /// 벤치마크 시리즈 위의 브러시 윈도우
        window: SelectionWindow,
    },
}

/// 오버레이 상태 기계.
#[derive(Debug, Clone)]
pub struct OverlaySwitch {
    state: OverlayState,
    next_token: u64,
}

impl Default for OverlaySwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySwitch {
    /// 기본 모드의 상태 기계를 생성합니다.
    pub fn new() -> Self {
        Self {
            state: OverlayState::Primary,
            next_token: 0,
        }
    }

    /// 현재 상태를 반환합니다.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// 벤치마크 모드인지 확인합니다 (데이터 도착 완료).
    pub fn is_benchmark_mode(&self) -> bool {
        matches!(self.state, OverlayState::Benchmark { .. })
    }

    /// 벤치마크 응답 대기 중인지 확인합니다.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, OverlayState::BenchmarkPending { .. })
    }

    /// 현재 선택된 벤치마크를 반환합니다 (대기 중 포함).
    pub fn selection(&self) -> Option<&BenchmarkSelection> {
        match &self.state {
            OverlayState::Primary => None,
            OverlayState::BenchmarkPending { selection, .. } => Some(selection),
            OverlayState::Benchmark { selection, .. } => Some(selection),
        }
    }

    /// 적용된 벤치마크 시리즈를 반환합니다.
    pub fn benchmark_series(&self) -> Option<&TimeSeries> {
        match &self.state {
            OverlayState::Benchmark { series, .. } => Some(series),
            _ => None,
        }
    }

    /// 벤치마크 시리즈 위의 브러시 윈도우를 반환합니다.
    pub fn benchmark_window(&self) -> Option<SelectionWindow> {
        match &self.state {
            OverlayState::Benchmark { window, .. } => Some(*window),
            _ => None,
        }
    }

    /// 벤치마크 조회를 시작하고 토큰을 발급합니다.
    ///
    /// 이전 요청이 대기 중이었다면 그 토큰은 무효가 됩니다.
    pub fn request_benchmark(&mut self, selection: BenchmarkSelection) -> FetchToken {
        let token = FetchToken(self.next_token);
        self.next_token += 1;

        tracing::debug!(
            kpi = %selection.kpi.name,
            source = %selection.source.name,
            %token,
            "벤치마크 조회 요청"
        );

        self.state = OverlayState::BenchmarkPending { selection, token };
        token
    }

    /// 조회 응답을 적용합니다.
    ///
    /// # 매개변수
    /// * `token` - 요청 시 발급받은 토큰
    /// * `series` - 조회된 벤치마크 시계열
    ///
    /// # 반환값
    /// * `Ok(true)` - 적용되어 벤치마크 모드로 전환됨
    /// * `Ok(false)` - 낡은 토큰이라 무시됨
    /// * `Err(MissingBenchmarkData)` - 응답이 비어 있음 (대기 상태 유지)
    pub fn apply_benchmark_data(
        &mut self,
        token: FetchToken,
        series: TimeSeries,
    ) -> ChartResult<bool> {
        let OverlayState::BenchmarkPending {
            selection,
            token: expected,
        } = &self.state
        else {
            tracing::warn!(%token, "대기 중인 벤치마크 요청이 없어 응답을 무시");
            return Ok(false);
        };

        if *expected != token {
            tracing::warn!(received = %token, expected = %expected, "낡은 벤치마크 응답을 무시");
            return Ok(false);
        }
        if series.is_empty() {
            return Err(ChartError::MissingBenchmarkData(
                selection.source.name.clone(),
            ));
        }

        let selection = selection.clone();
        let window = SelectionWindow::full(series.len())?;

        tracing::debug!(
            source = %selection.source.name,
            points = series.len(),
            "벤치마크 데이터 적용"
        );

        self.state = OverlayState::Benchmark {
            selection,
            series,
            window,
        };
        Ok(true)
    }

    /// 오버레이를 해제하고 기본 모드로 돌아갑니다.
    ///
    /// 대기 중인 요청도 함께 무효가 됩니다.
    pub fn clear_benchmark(&mut self) {
        if !matches!(self.state, OverlayState::Primary) {
            tracing::debug!("벤치마크 해제");
        }
        self.state = OverlayState::Primary;
    }

    /// 벤치마크 윈도우를 교체합니다. 벤치마크 모드가 아니면 무시합니다.
    pub(crate) fn set_window(&mut self, new_window: SelectionWindow) {
        if let OverlayState::Benchmark { window, .. } = &mut self.state {
            *window = new_window;
        }
    }
}
