//! Yahoo Finance 제공자 HTTP 통합 테스트.
//!
//! mockito 서버로 차트 API 응답을 흉내 냅니다.

use chrono::NaiveDate;
use heatmap_core::{HeatmapError, PriceField, PriceProvider};
use heatmap_data::YahooChartProvider;
use mockito::Matcher;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// 2024-01-02, 2024-01-31, 2024-02-01 (미국 동부 09:30)
const SPY_BODY: &str = r#"{
    "chart": {
        "result": [{
            "meta": {"symbol": "SPY", "gmtoffset": -18000},
            "timestamp": [1704205800, 1706711400, 1706797800],
            "indicators": {
                "quote": [{"close": [472.65, 482.88, null]}],
                "adjclose": [{"adjclose": [465.0, 475.0, 477.5]}]
            }
        }],
        "error": null
    }
}"#;

#[tokio::test]
async fn test_fetch_adjusted_closes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v8/finance/chart/SPY")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("interval".into(), "1d".into()),
            Matcher::UrlEncoded("includeAdjustedClose".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SPY_BODY)
        .create_async()
        .await;

    let provider = YahooChartProvider::with_base_url(server.url()).unwrap();
    let series = provider.fetch("spy", start()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(series.symbol(), "SPY");
    assert_eq!(series.len(), 3);
    assert_eq!(series.points()[1].date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    assert_eq!(series.points()[2].close, dec!(477.5));
}

#[tokio::test]
async fn test_fetch_raw_closes_drops_nulls() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v8/finance/chart/SPY")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SPY_BODY)
        .create_async()
        .await;

    let provider = YahooChartProvider::with_base_url(server.url())
        .unwrap()
        .with_price_field(PriceField::Close);
    let series = provider.fetch("SPY", start()).await.unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.last().unwrap().close, dec!(482.88));
}

#[tokio::test]
async fn test_unknown_symbol_is_data_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v8/finance/chart/NOSUCHTICKER")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        )
        .create_async()
        .await;

    let provider = YahooChartProvider::with_base_url(server.url()).unwrap();
    let err = provider.fetch("NOSUCHTICKER", start()).await.unwrap_err();

    match err {
        HeatmapError::DataUnavailable(msg) => assert!(msg.contains("delisted")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_data_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v8/finance/chart/SPY")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let provider = YahooChartProvider::with_base_url(server.url()).unwrap();
    let err = provider.fetch("SPY", start()).await.unwrap_err();

    assert!(err.is_upstream());
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_empty_result_is_data_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v8/finance/chart/SPY")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"chart":{"result":[{"meta":{"gmtoffset":-18000},"indicators":{"quote":[{}]}}],"error":null}}"#,
        )
        .create_async()
        .await;

    let provider = YahooChartProvider::with_base_url(server.url()).unwrap();
    let err = provider.fetch("SPY", start()).await.unwrap_err();

    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_index_symbol_is_percent_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v8/finance/chart/%5EGSPC")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SPY_BODY)
        .create_async()
        .await;

    let provider = YahooChartProvider::with_base_url(server.url()).unwrap();
    let series = provider.fetch("^gspc", start()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(series.symbol(), "^GSPC");
}

#[tokio::test]
async fn test_invalid_symbol_never_hits_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let provider = YahooChartProvider::with_base_url(server.url()).unwrap();
    let err = provider.fetch("SPY/../x", start()).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, HeatmapError::InvalidInput(_)));
}
