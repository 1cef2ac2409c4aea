//! # Fundchart Core
//!
//! 펀드 성과 차트의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 차트 엔진 전반에서 사용되는 기본 타입을 제공합니다:
//! - 지표 및 필드 키 정의
//! - 시계열 포인트 및 시리즈 구조체
//! - 벤치마크 선택 및 데이터 제공자
//! - 달력 경계 계산 유틸리티
//! - 표시 형식 설정
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
