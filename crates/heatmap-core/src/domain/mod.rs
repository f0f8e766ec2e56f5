//! 도메인 모델.
//!
//! - [`price`]: 일별 가격 시계열
//! - [`returns`]: 월말 가격, 월별 수익률, 수익률 그리드
//! - [`provider`]: 가격 데이터 제공자 trait

pub mod price;
pub mod provider;
pub mod returns;

pub use price::{PricePoint, PriceSeries};
pub use provider::{normalize_symbol, PriceProvider};
pub use returns::{GridRow, MonthEndPrice, MonthlyReturn, ReturnGrid};
