//! 가져오기 → 월별 수익률 계산 → 피벗 파이프라인.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument, warn, Instrument};

use heatmap_core::{
    normalize_symbol, pipeline_span, FillPolicy, HeatmapError, HeatmapResult, MonthlyReturn,
    PriceProvider, PriceSeries, ReturnGrid,
};

use crate::pivot::build_grid;
use crate::returns::ReturnCalculator;

/// 한 번의 파이프라인 실행 결과.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapReport {
    /// 정규화된 종목 심볼
    pub symbol: String,
    /// 조회 시작일
    pub start: NaiveDate,
    /// 사용한 빈 월 처리 방식
    pub fill_policy: FillPolicy,
    /// 원시 일별 종가
    #[serde(skip)]
    pub series: PriceSeries,
    /// 월별 수익률 레코드
    pub records: Vec<MonthlyReturn>,
    /// 연도 × 월 그리드
    pub grid: ReturnGrid,
}

/// 월별 수익률 파이프라인.
///
/// 상태가 없으며 실행마다 데이터를 새로 가져옵니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnsPipeline {
    calculator: ReturnCalculator,
}

impl ReturnsPipeline {
    pub fn new(fill_policy: FillPolicy) -> Self {
        Self {
            calculator: ReturnCalculator::new(fill_policy),
        }
    }

    pub fn fill_policy(&self) -> FillPolicy {
        self.calculator.fill_policy()
    }

    /// 가격을 가져와 수익률 그리드까지 계산합니다.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: 잘못된 심볼
    /// - `DataUnavailable`: 제공자 실패
    /// - `InsufficientData`: 가격이 없거나 2개월 미만
    pub async fn run(
        &self,
        provider: &dyn PriceProvider,
        symbol: &str,
        start: NaiveDate,
    ) -> HeatmapResult<HeatmapReport> {
        let symbol = normalize_symbol(symbol)?;
        let span = pipeline_span!("returns_pipeline", symbol, start);

        async move {
            let series = provider.fetch(&symbol, start).await.inspect_err(|e| {
                warn!(provider = provider.name(), error = %e, "Price fetch failed");
            })?;

            self.run_on_series(series, start)
        }
        .instrument(span)
        .await
    }

    /// 이미 가져온 시계열로 나머지 단계를 실행합니다.
    #[instrument(skip(self, series), fields(symbol = %series.symbol()))]
    pub fn run_on_series(&self, series: PriceSeries, start: NaiveDate) -> HeatmapResult<HeatmapReport> {
        let records = self.calculator.calculate(&series)?;
        if records.is_empty() {
            return Err(HeatmapError::InsufficientData(format!(
                "{}: 월별 수익률을 계산하려면 최소 2개월의 데이터가 필요합니다",
                series.symbol()
            )));
        }

        let grid = build_grid(&records);
        info!(
            days = series.len(),
            records = records.len(),
            years = grid.row_count(),
            "Returns heatmap ready"
        );

        Ok(HeatmapReport {
            symbol: series.symbol().to_string(),
            start,
            fill_policy: self.fill_policy(),
            series,
            records,
            grid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_core::{Month, PricePoint};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_run_on_series() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                PricePoint::new(date(2024, 1, 31), dec!(100)),
                PricePoint::new(date(2024, 2, 29), dec!(110)),
                PricePoint::new(date(2024, 3, 28), dec!(99)),
            ],
        )
        .unwrap();

        let report = ReturnsPipeline::default()
            .run_on_series(series, date(2024, 1, 1))
            .unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.grid.get(2024, Month::Jan), None);
        assert_eq!(report.grid.get(2024, Month::Feb), Some(10.0));
        assert_eq!(report.grid.get(2024, Month::Mar), Some(-10.0));
    }

    #[test]
    fn test_single_month_is_insufficient() {
        let series = PriceSeries::new(
            "SPY",
            vec![PricePoint::new(date(2024, 1, 31), dec!(100))],
        )
        .unwrap();

        let err = ReturnsPipeline::default()
            .run_on_series(series, date(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, HeatmapError::InsufficientData(_)));
    }

    #[test]
    fn test_report_json_has_null_cells() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                PricePoint::new(date(2024, 1, 31), dec!(100)),
                PricePoint::new(date(2024, 2, 29), dec!(110)),
            ],
        )
        .unwrap();
        let report = ReturnsPipeline::default()
            .run_on_series(series, date(2024, 1, 1))
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["symbol"], "SPY");
        assert_eq!(json["fill_policy"], "skip");
        assert!(json["grid"]["rows"][0]["values"][0].is_null());
        assert!(json.get("series").is_none());
    }
}
