//! 월말 리샘플링과 월별 수익률 계산.
//!
//! 일별 종가를 달력 월 단위로 묶어 월말 대표 가격(그 달 말일 또는 그 이전의
//! 마지막 종가)을 구하고, 전월 대표 가격 대비 변화율(%)을 계산합니다.
//!
//! ```text
//! 월말 가격: 100 (Jan), 110 (Feb), 99 (Mar)
//! 수익률:         -     10.0      -10.0
//! ```

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, instrument};

use heatmap_core::{
    FillPolicy, HeatmapError, HeatmapResult, Month, MonthEndPrice, MonthlyReturn, PricePoint,
    PriceSeries,
};

/// 월별 수익률 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnCalculator {
    fill_policy: FillPolicy,
}

impl ReturnCalculator {
    pub fn new(fill_policy: FillPolicy) -> Self {
        Self { fill_policy }
    }

    pub fn fill_policy(&self) -> FillPolicy {
        self.fill_policy
    }

    /// 일별 시계열을 월말 대표 가격으로 리샘플링합니다.
    ///
    /// 기본(`Skip`)은 데이터가 있는 월만 만듭니다. `ForwardFill`이면 첫 관측 월부터 마지막 관측 월까지 모든 달력 월을
    /// 만들고, 거래일이 없는 월은 직전 가격을 `filled = true`로 이어 씁니다.
    pub fn month_end_prices(&self, series: &PriceSeries) -> Vec<MonthEndPrice> {
        // 시계열이 날짜순이므로 월마다 마지막 값이 남음
        let mut last_in_month: BTreeMap<(i32, u32), PricePoint> = BTreeMap::new();
        for point in series.points() {
            last_in_month.insert((point.date.year(), point.date.month()), *point);
        }

        match self.fill_policy {
            FillPolicy::Skip => last_in_month
                .into_iter()
                .filter_map(|((year, month), point)| {
                    Some(MonthEndPrice {
                        year,
                        month: Month::from_number(month)?,
                        date: point.date,
                        close: point.close,
                        filled: false,
                    })
                })
                .collect(),
            FillPolicy::ForwardFill => forward_fill(&last_in_month),
        }
    }

    /// 월별 수익률 레코드를 계산합니다.
    ///
    /// 첫 번째 월은 기준 가격이 없으므로 레코드를 만들지 않습니다.
    /// 관측 월이 2개 미만이면 빈 결과를 반환합니다. 기본 정책에서 레코드 수는
    /// 항상 (관측 월 수 - 1)입니다.
    ///
    /// # Errors
    ///
    /// 입력 시계열이 비어 있으면 `HeatmapError::InsufficientData`.
    #[instrument(skip(self, series), fields(symbol = %series.symbol(), days = series.len(), fill = %self.fill_policy))]
    pub fn calculate(&self, series: &PriceSeries) -> HeatmapResult<Vec<MonthlyReturn>> {
        if series.is_empty() {
            return Err(HeatmapError::InsufficientData(format!(
                "{}: 가격 데이터가 없습니다",
                series.symbol()
            )));
        }

        let month_ends = self.month_end_prices(series);
        let records: Vec<MonthlyReturn> = month_ends
            .windows(2)
            .filter_map(|pair| {
                let (prev, curr) = (&pair[0], &pair[1]);
                percent_change(prev.close, curr.close)
                    .map(|pct| MonthlyReturn::new(curr.year, curr.month, pct))
            })
            .collect();

        debug!(
            months = month_ends.len(),
            filled = month_ends.iter().filter(|m| m.filled).count(),
            records = records.len(),
            "Monthly returns calculated"
        );

        Ok(records)
    }
}

/// 기본 정책(`Skip`)으로 월별 수익률을 계산합니다.
pub fn monthly_returns(series: &PriceSeries) -> HeatmapResult<Vec<MonthlyReturn>> {
    ReturnCalculator::default().calculate(series)
}

/// `(curr / prev - 1) * 100`
fn percent_change(prev: Decimal, curr: Decimal) -> Option<f64> {
    if prev <= Decimal::ZERO {
        return None;
    }
    let ratio = curr.checked_div(prev)?;
    let pct = (ratio - Decimal::ONE).checked_mul(dec!(100))?;
    pct.to_f64()
}

fn forward_fill(last_in_month: &BTreeMap<(i32, u32), PricePoint>) -> Vec<MonthEndPrice> {
    let (Some((&first, _)), Some((&last, _))) =
        (last_in_month.first_key_value(), last_in_month.last_key_value())
    else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut carried: Option<PricePoint> = None;
    let (mut year, mut month) = first;

    while (year, month) <= last {
        let observed = last_in_month.get(&(year, month)).copied();
        let filled = observed.is_none();
        if let Some(point) = observed {
            carried = Some(point);
        }

        if let (Some(point), Some(m)) = (carried, Month::from_number(month)) {
            result.push(MonthEndPrice {
                year,
                month: m,
                date: point.date,
                close: point.close,
                filled,
            });
        }

        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    result
}
