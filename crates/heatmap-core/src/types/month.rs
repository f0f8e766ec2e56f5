//! 히트맵 열을 구성하는 달력 월 정의.
//!
//! 그리드의 열 순서는 데이터 유무와 관계없이 항상 Jan..Dec 입니다.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 달력 월.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// 정규 순서의 12개월.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// 월 번호(1-12)에서 생성합니다.
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1..=12 => Some(Self::ALL[(number - 1) as usize]),
            _ => None,
        }
    }

    /// 날짜가 속한 월을 반환합니다.
    pub fn of(date: NaiveDate) -> Self {
        // NaiveDate::month()는 항상 1-12
        Self::ALL[date.month0() as usize]
    }

    /// 월 번호 (1-12).
    pub fn number(&self) -> u32 {
        self.index() as u32 + 1
    }

    /// 그리드 열 인덱스 (0-11).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 세 글자 영문 레이블 (예: "Jan").
    pub fn label(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// 해당 연도에서 이 월의 마지막 날짜.
    pub fn last_day(&self, year: i32) -> Option<NaiveDate> {
        let (next_year, next_month) = if *self == Month::Dec {
            (year + 1, 1)
        } else {
            (year, self.number() + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u32>() {
            return Self::from_number(number).ok_or_else(|| format!("Invalid month: {}", s));
        }

        let lower = trimmed.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| lower.starts_with(&m.label().to_lowercase()) && lower.len() >= 3)
            .ok_or_else(|| format!("Invalid month: {}", s))
    }
}
