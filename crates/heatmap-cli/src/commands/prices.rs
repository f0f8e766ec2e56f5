//! 일별 종가를 `date,close` CSV로 내려받습니다.
//!
//! 저장한 파일은 `--data-dir`로 지정하면 오프라인 가격 소스로 다시 쓸 수 있습니다.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use heatmap_core::{normalize_symbol, PriceProvider, PriceSeries};
use heatmap_data::write_price_csv;

use super::with_spinner;

/// prices 명령 설정.
#[derive(Debug, Clone)]
pub struct PricesConfig {
    pub symbol: String,
    pub start: NaiveDate,
    /// 출력 파일 경로 (없으면 `data/{SYMBOL}.csv`)
    pub output: Option<PathBuf>,
}

/// 기본 저장 경로 `data/{SYMBOL}.csv`.
pub fn default_prices_path(symbol: &str) -> PathBuf {
    PathBuf::from("data").join(format!("{}.csv", symbol))
}

/// 가격을 가져와 CSV로 저장합니다.
///
/// 저장한 경로와 시계열을 반환합니다.
pub async fn download_prices(
    provider: &dyn PriceProvider,
    config: &PricesConfig,
) -> Result<(PathBuf, PriceSeries)> {
    let symbol = normalize_symbol(&config.symbol)?;
    let series = with_spinner(
        format!("Downloading {} daily closes since {}...", symbol, config.start),
        provider.fetch(&symbol, config.start),
    )
    .await?;

    let path = config
        .output
        .clone()
        .unwrap_or_else(|| default_prices_path(&symbol));
    write_price_csv(&path, &series)
        .with_context(|| format!("Failed to save prices: {}", path.display()))?;

    info!(
        symbol = %symbol,
        rows = series.len(),
        path = %path.display(),
        "Daily closes saved"
    );
    Ok((path, series))
}
