//! CLI 명령어 구현 모듈.

pub mod export;
pub mod prices;
pub mod show;

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};

pub use export::{export_report, render_export, ExportConfig, ExportFormat};
pub use prices::{default_prices_path, download_prices, PricesConfig};
pub use show::{show_returns, ShowConfig};

/// `YYYY-MM-DD` 날짜를 파싱합니다.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

/// `-f` 인자가 없으면 설정의 기본 시작일을 사용합니다.
///
/// 미래 날짜는 거부합니다.
pub fn resolve_start(from: Option<&str>, default: NaiveDate) -> Result<NaiveDate> {
    let start = match from {
        Some(raw) => parse_date(raw)?,
        None => default,
    };

    if start > Utc::now().date_naive() {
        anyhow::bail!("Start date is in the future: {}", start);
    }
    Ok(start)
}

/// 작업이 끝날 때까지 스피너를 표시합니다.
///
/// 터미널이 아니면 indicatif가 스피너를 숨깁니다.
pub async fn with_spinner<F, T>(message: impl Into<String>, task: F) -> T
where
    F: Future<Output = T>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));

    let output = task.await;
    pb.finish_and_clear();
    output
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2000-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
        );
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );

        let err = parse_date("01/02/2000").unwrap_err();
        assert!(err.to_string().contains("Expected YYYY-MM-DD"));
    }

    #[test]
    fn test_resolve_start() {
        let default = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(resolve_start(None, default).unwrap(), default);
        assert_eq!(
            resolve_start(Some("2010-06-01"), default).unwrap(),
            NaiveDate::from_ymd_opt(2010, 6, 1).unwrap()
        );
        assert!(resolve_start(Some("2999-01-01"), default).is_err());
    }

    #[tokio::test]
    async fn test_with_spinner_returns_output() {
        let value = with_spinner("working", async { 42 }).await;
        assert_eq!(value, 42);
    }
}
