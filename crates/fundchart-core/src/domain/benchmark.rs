//! 벤치마크 오버레이 데이터 모델.
//!
//! 이 모듈은 벤치마크 비교에 필요한 선택 모델(KPI/소스)과 외부
//! 벤치마크 데이터 조회를 위한 추상화 계층을 제공합니다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::series::TimeSeries;
use crate::error::ChartResult;

/// 벤치마크가 적용되는 KPI 그룹.
///
/// 벤치마크 선택은 그룹 단위로 관리됩니다. NAV 차트는 `Nav` 그룹을
/// 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiGroup {
    /// 순자산가치 차트 그룹
    Nav,
    /// IRR 지표 그룹
    Irr,
    /// MOIC 지표 그룹
    Moic,
}

impl KpiGroup {
    /// 그룹 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiGroup::Nav => "nav",
            KpiGroup::Irr => "irr",
            KpiGroup::Moic => "moic",
        }
    }
}

impl fmt::Display for KpiGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 벤치마크 선택 옵션.
///
/// KPI 또는 데이터 소스 드롭다운의 한 항목입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkOption {
    /// 조회 요청에 사용하는 이름
    pub name: String,
    /// 표시용 레이블
    pub label: String,
}

impl BenchmarkOption {
    /// 새 옵션을 생성합니다.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// 벤치마크 조회 선택.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkSelection {
    /// 비교 대상 KPI
    pub kpi: BenchmarkOption,
    /// 벤치마크 데이터 소스
    pub source: BenchmarkOption,
}

impl BenchmarkSelection {
    /// 새 선택을 생성합니다.
    pub fn new(kpi: BenchmarkOption, source: BenchmarkOption) -> Self {
        Self { kpi, source }
    }
}

/// 벤치마크 시계열 제공자.
///
/// 외부 벤치마크 데이터 조회를 위한 추상화 계층입니다. 엔진은 이
/// trait을 직접 호출하지 않으며, 애플리케이션이 조회를 수행한 뒤
/// 결과를 컨트롤러에 전달합니다.
#[async_trait]
pub trait BenchmarkProvider: Send + Sync {
    /// 벤치마크 시계열을 조회합니다.
    ///
    /// # Arguments
    /// * `selection` - KPI/소스 선택
    /// * `group` - 적용 대상 KPI 그룹
    ///
    /// # Returns
    /// 벤치마크 필드 키를 가진 시계열
    async fn fetch_benchmark(
        &self,
        selection: &BenchmarkSelection,
        group: KpiGroup,
    ) -> ChartResult<TimeSeries>;
}
