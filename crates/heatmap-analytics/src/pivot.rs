//! 월별 수익률 레코드를 연도 × 월 그리드로 변환.

use std::collections::BTreeMap;

use heatmap_core::{GridRow, MonthlyReturn, ReturnGrid};

/// 레코드 집합에서 수익률 그리드를 생성합니다.
///
/// - 행: 레코드에 존재하는 연도 (오름차순)
/// - 열: 항상 Jan..Dec 12개
/// - 레코드가 없는 셀은 `None` (0으로 채우지 않음)
/// - 같은 (연도, 월) 레코드가 여러 개면 평균
pub fn build_grid(records: &[MonthlyReturn]) -> ReturnGrid {
    let mut sums: BTreeMap<i32, [(f64, u32); 12]> = BTreeMap::new();

    for record in records {
        let cell = &mut sums.entry(record.year).or_insert([(0.0, 0); 12])[record.month.index()];
        cell.0 += record.return_pct;
        cell.1 += 1;
    }

    let rows = sums
        .into_iter()
        .map(|(year, cells)| {
            let mut row = GridRow::empty(year);
            for (value, (sum, count)) in row.values.iter_mut().zip(cells) {
                if count > 0 {
                    *value = Some(sum / f64::from(count));
                }
            }
            row
        })
        .collect();

    ReturnGrid::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_core::Month;

    #[test]
    fn test_rows_and_columns() {
        let records = vec![
            MonthlyReturn::new(2021, Month::Mar, 1.5),
            MonthlyReturn::new(2020, Month::Dec, -3.0),
            MonthlyReturn::new(2021, Month::Jan, 2.0),
        ];

        let grid = build_grid(&records);
        assert_eq!(grid.years(), vec![2020, 2021]);
        assert_eq!(grid.column_count(), 12);
        assert_eq!(grid.columns, Month::ALL);
        assert_eq!(grid.get(2021, Month::Jan), Some(2.0));
        assert_eq!(grid.get(2021, Month::Feb), None);
        assert_eq!(grid.get(2020, Month::Jan), None);
        assert_eq!(grid.filled_count(), 3);
    }

    #[test]
    fn test_duplicates_are_averaged() {
        let records = vec![
            MonthlyReturn::new(2022, Month::Jun, 1.0),
            MonthlyReturn::new(2022, Month::Jun, 3.0),
        ];

        let grid = build_grid(&records);
        assert_eq!(grid.get(2022, Month::Jun), Some(2.0));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_empty_records() {
        let grid = build_grid(&[]);
        assert!(grid.is_empty());
        assert_eq!(grid.column_count(), 12);
    }

    #[test]
    fn test_zero_return_is_kept() {
        let grid = build_grid(&[MonthlyReturn::new(2020, Month::Feb, 0.0)]);
        assert_eq!(grid.get(2020, Month::Feb), Some(0.0));
        assert_eq!(grid.get(2020, Month::Mar), None);
    }
}
