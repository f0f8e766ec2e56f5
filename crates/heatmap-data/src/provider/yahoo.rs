//! Yahoo Finance 일별 종가 제공자.
//!
//! Yahoo Finance v8 차트 API에서 일봉 종가를 조회합니다.
//!
//! # 심볼 형식
//!
//! 모든 심볼은 Yahoo Finance 형식으로 전달되어야 합니다:
//! - 미국 주식/ETF: "AAPL", "SPY"
//! - 지수: "^GSPC"
//! - 한국 주식: "005930.KS" (코스피) 또는 "124560.KQ" (코스닥)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use heatmap_data::YahooChartProvider;
//!
//! let provider = YahooChartProvider::new(&DataConfig::default())?;
//! let series = provider.fetch("SPY", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use heatmap_core::{
    normalize_symbol, DataConfig, HeatmapResult, PriceField, PricePoint, PriceProvider,
    PriceSeries,
};

use crate::error::{DataError, Result};

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    #[serde(default)]
    meta: Option<YahooMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooMeta {
    /// 거래소 현지 시간의 UTC 오프셋 (초)
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 차트 API 기반 가격 제공자.
///
/// 호출마다 새로 조회하며 캐싱이나 재시도를 하지 않습니다.
#[derive(Debug, Clone)]
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
    price_field: PriceField,
}

impl YahooChartProvider {
    /// 설정에서 제공자를 생성합니다.
    pub fn new(config: &DataConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            price_field: config.price_field,
        })
    }

    /// 기본 설정에 다른 API 주소를 사용하는 제공자 (테스트/프록시용).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let config = DataConfig {
            base_url: base_url.into(),
            ..DataConfig::default()
        };
        Self::new(&config)
    }

    /// 종가 필드를 변경합니다.
    pub fn with_price_field(mut self, price_field: PriceField) -> Self {
        self.price_field = price_field;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 차트 API 경로 (쿼리 제외).
    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, encode_symbol(symbol))
    }

    /// 일봉 종가 조회.
    #[instrument(skip(self), fields(price_field = ?self.price_field))]
    pub async fn fetch_daily(&self, symbol: &str, start: NaiveDate) -> Result<PriceSeries> {
        let symbol = normalize_symbol(symbol)?;
        let now = Utc::now();

        if start > now.date_naive() {
            return Err(DataError::InvalidRequest(format!(
                "시작일이 미래입니다: {}",
                start
            )));
        }

        let period1 = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default();
        let period2 = now.timestamp();

        let url = self.chart_url(&symbol);
        debug!(url = %url, period1, period2, "Fetching from Yahoo Finance");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DataError::Network(format!("Yahoo Finance 요청 실패 ({}): {}", symbol, e)))?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Yahoo Finance response");

        if !status.is_success() {
            // 404 응답도 chart.error에 설명이 담겨 옴
            let message = serde_json::from_str::<YahooChartResponse>(&body)
                .ok()
                .and_then(|r| r.chart.error)
                .map(|e| format!("{} - {}", e.code, e.description))
                .unwrap_or_else(|| truncate(&body, 200));

            warn!(symbol = %symbol, status = status.as_u16(), %message, "Yahoo Finance API error");

            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                DataError::NotFound(format!("{}: {}", symbol, message))
            } else {
                DataError::Http {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let series = parse_chart(&symbol, &body, self.price_field)?;
        let series = series.since(start);

        if series.is_empty() {
            warn!(symbol = %symbol, "Yahoo Finance: 데이터 없음");
            return Err(DataError::Empty(format!("{} ({} 이후)", symbol, start)));
        }

        info!(
            symbol = %symbol,
            rows = series.len(),
            first = %series.first().map(|p| p.date).unwrap_or(start),
            last = %series.last().map(|p| p.date).unwrap_or(start),
            "Fetched daily closes from Yahoo Finance"
        );

        Ok(series)
    }
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch(&self, symbol: &str, start: NaiveDate) -> HeatmapResult<PriceSeries> {
        Ok(self.fetch_daily(symbol, start).await?)
    }
}

/// 차트 API 응답 본문을 가격 시계열로 변환합니다.
///
/// 종가가 null이거나 0 이하인 행은 버리고, 같은 날짜는 마지막 행을 사용합니다.
fn parse_chart(symbol: &str, body: &str, price_field: PriceField) -> Result<PriceSeries> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = chart_response.chart.error {
        return Err(DataError::NotFound(format!(
            "{}: {} - {}",
            symbol, error.code, error.description
        )));
    }

    let result = chart_response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::Empty(format!("{}: 응답에 결과 없음", symbol)))?;

    let offset = result
        .meta
        .as_ref()
        .and_then(|m| m.gmtoffset)
        .unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    let adj_closes = match price_field {
        PriceField::AdjClose => result
            .indicators
            .adj_close
            .and_then(|ac| ac.into_iter().next())
            .and_then(|ac| ac.adj_close),
        PriceField::Close => None,
    };

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        // 조정 종가 우선, 없으면 원 종가
        let close = adj_closes
            .as_ref()
            .and_then(|ac| ac.get(i).copied().flatten())
            .or_else(|| closes.get(i).copied().flatten());

        let (Some(close), Some(date)) = (close, exchange_date(*ts, offset)) else {
            continue;
        };

        if let Some(close) = Decimal::from_f64(close) {
            points.push(PricePoint::new(date, close.round_dp(6)));
        }
    }

    Ok(PriceSeries::from_unsorted(symbol, points))
}

/// Unix 타임스탬프를 거래소 현지 날짜로 변환합니다.
fn exchange_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

/// URL 경로에 넣을 수 있도록 심볼의 특수문자를 인코딩합니다.
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E").replace('=', "%3D")
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "SPY", "currency": "USD", "gmtoffset": -18000},
                "timestamp": [1704205800, 1704292200, 1704378600, 1704465000],
                "indicators": {
                    "quote": [{"close": [472.65, null, 467.28, 467.92]}],
                    "adjclose": [{"adjclose": [460.1, 459.0, null, 455.5]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_adjusted() {
        let series = parse_chart("SPY", SAMPLE, PriceField::AdjClose).unwrap();
        let closes: Vec<Decimal> = series.points().iter().map(|p| p.close).collect();

        // 세 번째 행은 조정 종가가 없어 원 종가 사용
        assert_eq!(closes, vec![dec!(460.1), dec!(459.0), dec!(467.28), dec!(455.5)]);
        assert_eq!(
            series.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_parse_chart_raw_close_skips_nulls() {
        let series = parse_chart("SPY", SAMPLE, PriceField::Close).unwrap();
        let closes: Vec<Decimal> = series.points().iter().map(|p| p.close).collect();

        assert_eq!(closes, vec![dec!(472.65), dec!(467.28), dec!(467.92)]);
    }

    #[test]
    fn test_parse_chart_error_payload() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart("NOPE", body, PriceField::Close).unwrap_err();
        assert!(matches!(err, DataError::NotFound(ref m) if m.contains("delisted")));
    }

    #[test]
    fn test_parse_chart_empty_result() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(
            parse_chart("SPY", body, PriceField::Close),
            Err(DataError::Empty(_))
        ));
    }

    #[test]
    fn test_parse_chart_invalid_json() {
        assert!(matches!(
            parse_chart("SPY", "<html>", PriceField::Close),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_exchange_date_uses_offset() {
        // 2024-01-02 00:30 UTC = 2024-01-01 19:30 EST
        let ts = 1704155400;
        assert_eq!(
            exchange_date(ts, 0),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(
            exchange_date(ts, -18000),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_encode_symbol() {
        assert_eq!(encode_symbol("^GSPC"), "%5EGSPC");
        assert_eq!(encode_symbol("EURUSD=X"), "EURUSD%3DX");
        assert_eq!(encode_symbol("SPY"), "SPY");
    }

    #[test]
    fn test_chart_url() {
        let provider = YahooChartProvider::with_base_url("http://localhost:1234/").unwrap();
        assert_eq!(
            provider.chart_url("^GSPC"),
            "http://localhost:1234/v8/finance/chart/%5EGSPC"
        );
    }
}
