//! 월별 수익률 JSON/SVG 엔드포인트.
//!
//! - `GET /api/v1/returns` - 레코드와 그리드 (빈 셀은 `null`)
//! - `GET /api/v1/prices` - 원시 일별 종가
//! - `GET /api/v1/heatmap.svg` - 히트맵 이미지

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use heatmap_analytics::{HeatmapRenderer, HeatmapReport, ReturnsPipeline, SvgOptions};
use heatmap_core::PricePoint;

use super::query::HeatmapQuery;
use crate::error::{api_error, ApiResult};
use crate::state::AppState;

/// 가격 조회 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct PricesResponse {
    pub symbol: String,
    pub start: NaiveDate,
    pub count: usize,
    pub prices: Vec<PricePoint>,
}

/// 파이프라인 실행 공통 경로.
async fn run_pipeline(state: &AppState, query: &HeatmapQuery) -> ApiResult<HeatmapReport> {
    let resolved = query.resolve(&state.dashboard).map_err(api_error)?;

    ReturnsPipeline::new(resolved.fill_policy)
        .run(state.provider.as_ref(), &resolved.symbol, resolved.start)
        .await
        .map_err(api_error)
}

/// 월별 수익률 조회.
///
/// GET /api/v1/returns
pub async fn get_returns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeatmapQuery>,
) -> ApiResult<Json<HeatmapReport>> {
    let report = run_pipeline(&state, &query).await?;
    Ok(Json(report))
}

/// 원시 일별 종가 조회.
///
/// GET /api/v1/prices
pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeatmapQuery>,
) -> ApiResult<Json<PricesResponse>> {
    let resolved = query.resolve(&state.dashboard).map_err(api_error)?;
    let series = state
        .provider
        .fetch(&resolved.symbol, resolved.start)
        .await
        .map_err(api_error)?;

    Ok(Json(PricesResponse {
        symbol: series.symbol().to_string(),
        start: resolved.start,
        count: series.len(),
        prices: series.points().to_vec(),
    }))
}

/// 히트맵 SVG 이미지.
///
/// GET /api/v1/heatmap.svg
pub async fn get_heatmap_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HeatmapQuery>,
) -> ApiResult<impl IntoResponse> {
    let report = run_pipeline(&state, &query).await?;
    let svg = HeatmapRenderer::new(SvgOptions::for_symbol(&report.symbol)).render(&report.grid);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// 수익률 라우터 (`/api/v1` 아래에 마운트).
pub fn returns_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/returns", get(get_returns))
        .route("/prices", get(get_prices))
        .route("/heatmap.svg", get(get_heatmap_svg))
}
