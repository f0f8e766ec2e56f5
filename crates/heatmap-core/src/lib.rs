//! # Heatmap Core
//!
//! 월별 수익률 히트맵의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일별 가격 시계열 ([`PriceSeries`])
//! - 월별 수익률 레코드와 연도 × 월 그리드 ([`MonthlyReturn`], [`ReturnGrid`])
//! - 가격 데이터 제공자 추상화 ([`PriceProvider`])
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
