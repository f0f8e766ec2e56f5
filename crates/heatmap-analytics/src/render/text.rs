//! CLI용 고정폭 텍스트 표 렌더러.

use std::fmt::Write;

use heatmap_core::{Month, ReturnGrid};

const YEAR_WIDTH: usize = 6;
const CELL_WIDTH: usize = 7;

/// 그리드를 텍스트 표로 렌더링합니다.
///
/// ```text
/// Year     Jan    Feb    Mar ...
/// 2024            10.0  -10.0 ...
/// ```
pub fn render_text_table(grid: &ReturnGrid) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<YEAR_WIDTH$}", "Year");
    for month in Month::ALL {
        let _ = write!(out, "{:>CELL_WIDTH$}", month.label());
    }
    out.push('\n');

    for row in grid.rows() {
        let _ = write!(out, "{:<YEAR_WIDTH$}", row.year);
        for value in row.values {
            match value {
                Some(v) => {
                    let _ = write!(out, "{:>CELL_WIDTH$.1}", v);
                }
                None => out.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        // 빈 셀로 끝나는 행의 꼬리 공백 제거
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }

    out
}
