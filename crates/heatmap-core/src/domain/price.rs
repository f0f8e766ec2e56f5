//! 일별 가격 시계열.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// 하루치 종가.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 거래일
    pub date: NaiveDate,
    /// 종가
    pub close: Decimal,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }
}

/// 한 종목의 일별 종가 시계열.
///
/// 날짜는 중복 없이 엄격하게 증가하고 가격은 모두 양수입니다.
/// 생성 시 검증되므로 이후 단계는 이 불변식을 가정할 수 있습니다.
/// 역직렬화도 [`PriceSeries::new`]를 거칩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

/// 검증 전 역직렬화 형태.
#[derive(Deserialize)]
struct RawPriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = HeatmapError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        PriceSeries::new(raw.symbol, raw.points)
    }
}

impl PriceSeries {
    /// 검증된 가격 시계열을 생성합니다.
    ///
    /// # Errors
    ///
    /// 날짜가 엄격하게 증가하지 않거나 가격이 0 이하이면
    /// `HeatmapError::InvalidInput`을 반환합니다.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> HeatmapResult<Self> {
        let symbol = symbol.into();

        if let Some(bad) = points.iter().find(|p| p.close <= Decimal::ZERO) {
            return Err(HeatmapError::InvalidInput(format!(
                "{}: 가격은 양수여야 합니다 ({} = {})",
                symbol, bad.date, bad.close
            )));
        }

        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(HeatmapError::InvalidInput(format!(
                "{}: 날짜가 엄격하게 증가하지 않습니다 ({} -> {})",
                symbol, pair[0].date, pair[1].date
            )));
        }

        Ok(Self { symbol, points })
    }

    /// 정렬되지 않았거나 중복이 있는 원시 데이터로부터 시계열을 생성합니다.
    ///
    /// 날짜순으로 정렬하고 같은 날짜는 마지막 값을 유지하며,
    /// 0 이하 가격은 버립니다.
    pub fn from_unsorted(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close > Decimal::ZERO);
        // 안정 정렬이므로 같은 날짜 안에서는 입력 순서가 유지됨
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    /// 빈 시계열.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// 시작일 이후(포함) 데이터만 남긴 시계열.
    pub fn since(&self, start: NaiveDate) -> Self {
        Self {
            symbol: self.symbol.clone(),
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start)
                .copied()
                .collect(),
        }
    }
}
