//! HTTP 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 대시보드 페이지
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/v1/returns` - 월별 수익률 레코드와 그리드 (JSON)
//! - `/api/v1/prices` - 원시 일별 종가 (JSON)
//! - `/api/v1/heatmap.svg` - 히트맵 이미지

pub mod dashboard;
pub mod health;
pub mod query;
pub mod returns;

pub use dashboard::dashboard_page;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use query::{HeatmapQuery, ResolvedQuery};
pub use returns::{returns_router, PricesResponse};

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

/// 전체 라우터 생성 (미들웨어 제외).
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_page))
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API v1 엔드포인트
        .nest("/api/v1", returns_router())
}
