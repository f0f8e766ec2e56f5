//! 월별 수익률 레코드와 연도 × 월 수익률 그리드.
//!
//! 데이터가 없는 (연도, 월) 조합은 `None`으로 표현되며 절대 0.0으로
//! 채워지지 않습니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Month;

/// 월말 대표 가격.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthEndPrice {
    /// 연도
    pub year: i32,
    /// 월
    pub month: Month,
    /// 대표 가격이 관측된 거래일
    pub date: NaiveDate,
    /// 월말 또는 그 이전 마지막 종가
    pub close: Decimal,
    /// 해당 월에 거래 데이터가 없어 직전 가격을 이어 썼는지 여부
    pub filled: bool,
}

/// 월별 수익률 레코드.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    /// 연도
    pub year: i32,
    /// 월
    pub month: Month,
    /// 전월 대비 수익률 (%)
    pub return_pct: f64,
}

impl MonthlyReturn {
    pub fn new(year: i32, month: Month, return_pct: f64) -> Self {
        Self {
            year,
            month,
            return_pct,
        }
    }
}

/// 그리드의 한 행 (한 연도).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    /// 연도
    pub year: i32,
    /// Jan..Dec 순서의 수익률 (%), 데이터가 없으면 `None`
    pub values: [Option<f64>; 12],
}

impl GridRow {
    /// 모든 셀이 비어 있는 행.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            values: [None; 12],
        }
    }

    pub fn get(&self, month: Month) -> Option<f64> {
        self.values[month.index()]
    }
}

/// 연도(행) × 월(열) 수익률 그리드.
///
/// 행은 연도 오름차순, 열은 항상 Jan..Dec 12개입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnGrid {
    /// 열 레이블 (항상 정규 순서의 12개월)
    pub columns: [Month; 12],
    /// 연도별 행
    pub rows: Vec<GridRow>,
}

impl Default for ReturnGrid {
    fn default() -> Self {
        Self {
            columns: Month::ALL,
            rows: Vec::new(),
        }
    }
}

impl ReturnGrid {
    /// 그리드 열 개수.
    pub const COLUMNS: usize = 12;

    /// 행 목록에서 그리드를 생성합니다.
    ///
    /// 행은 연도 오름차순으로 정렬되며, 같은 연도가 여러 번 나오면
    /// 뒤에 나온 행의 값이 있는 셀만 덮어씁니다.
    pub fn from_rows(rows: Vec<GridRow>) -> Self {
        let mut merged: Vec<GridRow> = Vec::with_capacity(rows.len());
        let mut sorted = rows;
        sorted.sort_by_key(|r| r.year);

        for row in sorted {
            match merged.last_mut() {
                Some(last) if last.year == row.year => {
                    for (cell, value) in last.values.iter_mut().zip(row.values) {
                        if value.is_some() {
                            *cell = value;
                        }
                    }
                }
                _ => merged.push(row),
            }
        }

        Self {
            columns: Month::ALL,
            rows: merged,
        }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        Self::COLUMNS
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 행 연도 목록 (오름차순).
    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    /// 특정 셀 값.
    pub fn get(&self, year: i32, month: Month) -> Option<f64> {
        self.rows
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .and_then(|i| self.rows[i].get(month))
    }

    /// 값이 있는 셀을 (연도, 월, 수익률) 순서로 순회합니다.
    pub fn cells(&self) -> impl Iterator<Item = (i32, Month, f64)> + '_ {
        self.rows.iter().flat_map(|row| {
            Month::ALL
                .iter()
                .filter_map(move |m| row.get(*m).map(|v| (row.year, *m, v)))
        })
    }

    /// 값이 있는 셀 개수.
    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }

    /// 값이 있는 셀의 (최소, 최대).
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells().fold(None, |acc, (_, _, v)| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
