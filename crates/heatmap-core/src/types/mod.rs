//! 공통 타입 정의.

pub mod month;

pub use month::Month;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 거래일이 전혀 없는 달력 월의 처리 방식.
///
/// 월 안의 휴장일(주말 월말 등)은 두 정책 모두 그 월의 마지막 종가를 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// 첫 관측 월부터 마지막 관측 월까지 모든 월을 생성하고,
    /// 데이터가 없는 월은 직전 월말 가격을 이어 씁니다 (수익률 0.0).
    ForwardFill,
    /// 데이터가 있는 월만 생성하고, 직전 데이터 월 대비 수익률을 계산합니다.
    /// 데이터가 없는 월은 그리드에서 빈 셀로 남습니다.
    #[default]
    Skip,
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillPolicy::ForwardFill => write!(f, "forward_fill"),
            FillPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for FillPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward_fill" | "ffill" | "pad" => Ok(Self::ForwardFill),
            "skip" | "none" => Ok(Self::Skip),
            _ => Err(format!("Unknown fill policy: {}", s)),
        }
    }
}

/// 시세 응답에서 사용할 종가 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// 원 종가
    Close,
    /// 배당/분할 조정 종가 (없는 행은 원 종가 사용)
    #[default]
    AdjClose,
}

impl FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "close" => Ok(Self::Close),
            "adj_close" | "adjclose" | "adjusted" => Ok(Self::AdjClose),
            _ => Err(format!("Unknown price field: {}", s)),
        }
    }
}
