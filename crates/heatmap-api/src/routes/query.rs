//! 대시보드/API 공용 쿼리 파라미터.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use heatmap_core::{normalize_symbol, DashboardConfig, FillPolicy, HeatmapError, HeatmapResult};

/// `?symbol=SPY&start=2000-01-01&fill=skip`
///
/// 폼 제출 시 빈 문자열이 올 수 있으므로 모두 문자열로 받고, 비어 있으면
/// 대시보드 기본값을 사용합니다.
#[derive(Debug, Default, Deserialize)]
pub struct HeatmapQuery {
    /// 종목 심볼 (기본: 설정의 default_symbol)
    pub symbol: Option<String>,
    /// 시작일 YYYY-MM-DD (기본: 설정의 default_start)
    pub start: Option<String>,
    /// 빈 월 처리 방식 (skip | forward_fill | ffill)
    pub fill: Option<String>,
}

/// 검증된 요청 파라미터.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
    pub symbol: String,
    pub start: NaiveDate,
    pub fill_policy: FillPolicy,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl HeatmapQuery {
    /// 기본값을 채우고 파라미터를 검증합니다.
    ///
    /// # Errors
    ///
    /// 심볼/날짜/정책 형식이 잘못되었거나 시작일이 미래이면 `InvalidInput`.
    pub fn resolve(&self, defaults: &DashboardConfig) -> HeatmapResult<ResolvedQuery> {
        let symbol = normalize_symbol(non_empty(&self.symbol).unwrap_or(&defaults.default_symbol))?;

        let start = match non_empty(&self.start) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                HeatmapError::InvalidInput(format!(
                    "시작일 형식이 잘못되었습니다 (YYYY-MM-DD): {}",
                    raw
                ))
            })?,
            None => defaults.default_start,
        };

        if start > Utc::now().date_naive() {
            return Err(HeatmapError::InvalidInput(format!(
                "시작일이 미래입니다: {}",
                start
            )));
        }

        let fill_policy = match non_empty(&self.fill) {
            Some(raw) => raw.parse().map_err(HeatmapError::InvalidInput)?,
            None => defaults.fill_policy,
        };

        Ok(ResolvedQuery {
            symbol,
            start,
            fill_policy,
        })
    }
}
