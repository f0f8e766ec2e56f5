//! # Heatmap Data
//!
//! 월별 수익률 계산에 필요한 일별 종가 데이터를 로드합니다.
//!
//! ## 제공자
//!
//! - [`YahooChartProvider`]: Yahoo Finance v8 차트 API (기본)
//! - [`CsvPriceProvider`]: 로컬 `date,close` CSV 파일 (오프라인)
//!
//! 두 제공자 모두 [`heatmap_core::PriceProvider`]를 구현하며, 설정에 따라
//! [`create_provider`]가 하나를 선택합니다.

pub mod error;
pub mod provider;

use std::sync::Arc;

use heatmap_core::{DataConfig, PriceProvider};
use tracing::info;

pub use error::{DataError, Result};
pub use provider::{write_price_csv, write_prices, CsvPriceProvider, YahooChartProvider};

/// 설정에 맞는 가격 제공자를 생성합니다.
///
/// `data_dir`이 설정되어 있으면 CSV 제공자를, 아니면 Yahoo Finance를 사용합니다.
pub fn create_provider(config: &DataConfig) -> Result<Arc<dyn PriceProvider>> {
    match config.data_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(dir) => {
            info!(data_dir = %dir, "Using CSV price provider");
            Ok(Arc::new(CsvPriceProvider::new(dir)))
        }
        None => {
            info!(base_url = %config.base_url, "Using Yahoo Finance price provider");
            Ok(Arc::new(YahooChartProvider::new(config)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_selects_source() {
        let config = DataConfig::default();
        assert_eq!(create_provider(&config).unwrap().name(), "yahoo");

        let config = DataConfig {
            data_dir: Some("./data".to_string()),
            ..DataConfig::default()
        };
        assert_eq!(create_provider(&config).unwrap().name(), "csv");

        let config = DataConfig {
            data_dir: Some("  ".to_string()),
            ..DataConfig::default()
        };
        assert_eq!(create_provider(&config).unwrap().name(), "yahoo");
    }
}
