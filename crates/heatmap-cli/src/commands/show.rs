//! 월별 수익률 표를 터미널에 출력합니다.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use heatmap_analytics::{render_text_table, ReturnsPipeline};
use heatmap_core::{FillPolicy, PriceProvider};

use super::with_spinner;

/// show 명령 설정.
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub symbol: String,
    pub start: NaiveDate,
    pub fill_policy: FillPolicy,
}

/// 파이프라인을 실행하고 출력할 텍스트를 만듭니다.
///
/// 첫 줄은 요약, 이후는 연도 × 월 표입니다. 빈 셀은 공백으로 남습니다.
pub async fn show_returns(provider: &dyn PriceProvider, config: &ShowConfig) -> Result<String> {
    let pipeline = ReturnsPipeline::new(config.fill_policy);
    let report = with_spinner(
        format!("Fetching {} prices since {}...", config.symbol, config.start),
        pipeline.run(provider, &config.symbol, config.start),
    )
    .await?;

    info!(
        symbol = %report.symbol,
        records = report.records.len(),
        years = report.grid.row_count(),
        "Monthly returns calculated"
    );

    Ok(format!(
        "{} monthly returns (%) since {} [{}], {} months\n\n{}",
        report.symbol,
        report.start,
        report.fill_policy,
        report.records.len(),
        render_text_table(&report.grid)
    ))
}
