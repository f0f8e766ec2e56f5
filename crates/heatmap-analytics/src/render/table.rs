//! 그리드/레코드 CSV 내보내기.

use heatmap_core::{HeatmapError, HeatmapResult, Month, ReturnGrid};

/// 그리드를 `year,Jan,...,Dec` CSV로 변환합니다.
///
/// 값이 없는 셀은 빈 필드로 씁니다.
pub fn grid_to_csv(grid: &ReturnGrid) -> HeatmapResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["year"];
    header.extend(Month::ALL.iter().map(|m| m.label()));
    writer.write_record(&header).map_err(csv_error)?;

    for row in grid.rows() {
        let mut record = Vec::with_capacity(ReturnGrid::COLUMNS + 1);
        record.push(row.year.to_string());
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HeatmapError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| HeatmapError::Render(e.to_string()))
}

fn csv_error(err: csv::Error) -> HeatmapError {
    HeatmapError::Render(format!("CSV 작성 실패: {}", err))
}
