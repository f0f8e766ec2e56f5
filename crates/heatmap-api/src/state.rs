//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! 가격 제공자는 읽기 전용으로 공유되며, 요청마다 파이프라인이 독립적으로
//! 실행됩니다. 요청 간에 변경되는 상태는 없습니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use heatmap_core::{DashboardConfig, PriceProvider};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 일별 종가 제공자 (Yahoo Finance 또는 CSV)
    pub provider: Arc<dyn PriceProvider>,

    /// 대시보드 기본값 및 문구
    pub dashboard: Arc<DashboardConfig>,

    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(provider: Arc<dyn PriceProvider>, dashboard: DashboardConfig) -> Self {
        Self {
            provider,
            dashboard: Arc::new(dashboard),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use test_support::{create_test_state, StaticPriceProvider};

#[cfg(any(test, feature = "test-utils"))]
mod test_support {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Datelike, Duration, NaiveDate};
    use heatmap_core::{HeatmapError, HeatmapResult, PricePoint, PriceSeries};
    use rust_decimal::Decimal;

    /// 네트워크 없이 고정 시계열을 돌려주는 테스트용 제공자.
    ///
    /// - `UNKNOWN`: `DataUnavailable`
    /// - `SHORT`: 한 달치 데이터만 반환
    /// - 그 외: 2020-01-01부터 2021-12-31까지의 영업일 데이터
    #[derive(Debug, Default)]
    pub struct StaticPriceProvider;

    impl StaticPriceProvider {
        fn series(symbol: &str, from: NaiveDate, to: NaiveDate) -> PriceSeries {
            let mut points = Vec::new();
            let mut date = from;
            let mut price = Decimal::from(100);
            while date <= to {
                if date.weekday().number_from_monday() <= 5 {
                    // 짝수 월은 상승, 홀수 월은 하락
                    let step = if date.month() % 2 == 0 {
                        Decimal::new(5, 1)
                    } else {
                        Decimal::new(-3, 1)
                    };
                    price += step;
                    points.push(PricePoint::new(date, price));
                }
                date += Duration::days(1);
            }
            PriceSeries::from_unsorted(symbol, points)
        }
    }

    #[async_trait]
    impl PriceProvider for StaticPriceProvider {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, symbol: &str, start: NaiveDate) -> HeatmapResult<PriceSeries> {
            let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

            let series = match symbol {
                "UNKNOWN" => {
                    return Err(HeatmapError::DataUnavailable(
                        "Not found: UNKNOWN - No data found, symbol may be delisted".to_string(),
                    ))
                }
                "SHORT" => Self::series(symbol, day(2021, 3, 1), day(2021, 3, 31)),
                _ => Self::series(symbol, day(2020, 1, 1), day(2021, 12, 31)),
            }
            .since(start);

            if series.is_empty() {
                return Err(HeatmapError::DataUnavailable(format!(
                    "No price data: {} ({} 이후)",
                    symbol, start
                )));
            }
            Ok(series)
        }
    }

    /// 실제 네트워크 없이 테스트할 수 있는 상태를 생성합니다.
    pub fn create_test_state() -> AppState {
        AppState::new(Arc::new(StaticPriceProvider), DashboardConfig::default())
    }
}
