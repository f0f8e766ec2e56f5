//! 가격 데이터 제공자 추상화.
//!
//! 외부 시세 소스(Yahoo Finance, CSV 파일 등)로부터 일별 종가를 가져오기
//! 위한 소스 중립적인 인터페이스를 제공합니다.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::PriceSeries;
use crate::error::HeatmapResult;

/// 가격 데이터 제공자 trait.
///
/// 파이프라인은 이 경계를 순수 함수처럼 취급합니다. 구현체는 재시도나
/// 캐싱을 하지 않으며, 호출마다 새 데이터를 가져옵니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct StaticProvider {
///     series: PriceSeries,
/// }
///
/// #[async_trait]
/// impl PriceProvider for StaticProvider {
///     fn name(&self) -> &str {
///         "static"
///     }
///
///     async fn fetch(&self, _symbol: &str, start: NaiveDate) -> HeatmapResult<PriceSeries> {
///         Ok(self.series.since(start))
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 제공자 이름 (로그 및 헬스 체크용).
    fn name(&self) -> &str;

    /// `start`(포함)부터 현재까지의 일별 종가를 가져옵니다.
    ///
    /// # Errors
    ///
    /// 네트워크 실패, 알 수 없는 심볼, 결과 없음은
    /// `HeatmapError::DataUnavailable`로 반환합니다.
    async fn fetch(&self, symbol: &str, start: NaiveDate) -> HeatmapResult<PriceSeries>;
}

/// 심볼 정규화 (공백 제거, 대문자).
///
/// # Errors
///
/// 빈 심볼이거나 허용되지 않는 문자가 있으면 `HeatmapError::InvalidInput`.
pub fn normalize_symbol(symbol: &str) -> HeatmapResult<String> {
    let normalized = symbol.trim().to_uppercase();

    if normalized.is_empty() {
        return Err(crate::HeatmapError::InvalidInput(
            "심볼이 비어 있습니다".to_string(),
        ));
    }

    // Yahoo 형식: 영숫자와 . - ^ = (예: BRK-B, ^GSPC, 005930.KS, EURUSD=X)
    if !normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
    {
        return Err(crate::HeatmapError::InvalidInput(format!(
            "허용되지 않는 심볼: {}",
            symbol
        )));
    }

    Ok(normalized)
}
