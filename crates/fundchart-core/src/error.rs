//! 차트 엔진의 에러 타입.
//!
//! 이 모듈은 차트 파이프라인 전반에서 사용되는 에러 타입을 정의합니다.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// 핵심 차트 에러.
#[derive(Debug, Error)]
pub enum ChartError {
    /// 빈 시계열
    #[error("빈 시계열: 표시할 데이터가 없습니다")]
    EmptySeries,

    /// 정렬되지 않은 시계열
    #[error("정렬되지 않은 시계열: {prev} 뒤에 {next}가 왔습니다")]
    UnorderedSeries {
        /// 앞선 포인트의 시각
        prev: DateTime<Utc>,
        /// 순서를 위반한 포인트의 시각
        next: DateTime<Utc>,
    },

    /// 잘못된 선택 윈도우
    #[error("잘못된 선택 윈도우: [{start}, {end}] (시계열 길이 {len})")]
    InvalidSelectionWindow {
        /// 시작 인덱스
        start: usize,
        /// 끝 인덱스
        end: usize,
        /// 대상 시계열 길이
        len: usize,
    },

    /// 벤치마크 데이터 없음
    #[error("벤치마크 데이터 없음: {0}")]
    MissingBenchmarkData(String),

    /// 잘못된 날짜 입력
    #[error("잘못된 날짜 입력: {0}")]
    InvalidDate(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(#[from] config::ConfigError),
}

/// 차트 작업을 위한 Result 타입.
pub type ChartResult<T> = Result<T, ChartError>;

impl ChartError {
    /// 빈 차트로 표시 가능한 에러인지 확인합니다.
    ///
    /// 빈 시계열이나 벤치마크 데이터 부재는 실패가 아니라
    /// 빈 차트 플레이스홀더로 렌더링됩니다.
    pub fn is_empty_display(&self) -> bool {
        matches!(
            self,
            ChartError::EmptySeries | ChartError::MissingBenchmarkData(_)
        )
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}
