//! 히트맵 결과를 파일로 내보냅니다.
//!
//! ```bash
//! heatmap export -s SPY --format csv -o spy.csv
//! heatmap export -s QQQ -f 2010-01-01 --format html -o qqq.html
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use heatmap_analytics::{
    grid_to_csv, heatmap_section, html_page, HeatmapRenderer, HeatmapReport, ReturnsPipeline,
    SvgOptions,
};
use heatmap_core::{DashboardConfig, FillPolicy, PriceProvider};

use super::with_spinner;

/// 내보내기 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `year,Jan..Dec` 그리드 (빈 셀은 공백)
    Csv,
    /// 레코드와 그리드를 포함한 전체 결과
    Json,
    /// 히트맵 이미지
    Svg,
    /// 제목/설명이 포함된 독립 HTML 페이지
    Html,
}

impl ExportFormat {
    /// 파일 확장자.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
            ExportFormat::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!(
                "Invalid format: {}. Supported: csv, json, svg, html",
                s
            )),
        }
    }
}

/// export 명령 설정.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub symbol: String,
    pub start: NaiveDate,
    pub fill_policy: FillPolicy,
    pub format: ExportFormat,
    /// 출력 파일 경로 (없으면 `{SYMBOL}_monthly_returns.{ext}`)
    pub output: Option<PathBuf>,
}

impl ExportConfig {
    /// 실제로 쓸 파일 경로.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}_monthly_returns.{}",
                self.symbol.to_uppercase(),
                self.format.extension()
            ))
        })
    }
}

/// 결과를 요청한 형식의 문자열로 렌더링합니다.
pub fn render_export(
    report: &HeatmapReport,
    format: ExportFormat,
    dashboard: &DashboardConfig,
) -> Result<String> {
    let content = match format {
        ExportFormat::Csv => grid_to_csv(&report.grid)?,
        ExportFormat::Json => serde_json::to_string_pretty(report)?,
        ExportFormat::Svg => svg(report),
        ExportFormat::Html => html_page(
            &dashboard.title_for(&report.symbol),
            &dashboard.description_for(&report.symbol),
            &heatmap_section(&svg(report)),
        ),
    };
    Ok(content)
}

fn svg(report: &HeatmapReport) -> String {
    HeatmapRenderer::new(SvgOptions::for_symbol(&report.symbol)).render(&report.grid)
}

/// 파이프라인을 실행하고 결과를 파일로 저장합니다.
///
/// 저장한 파일 경로를 반환합니다.
pub async fn export_report(
    provider: &dyn PriceProvider,
    config: &ExportConfig,
    dashboard: &DashboardConfig,
) -> Result<PathBuf> {
    let pipeline = ReturnsPipeline::new(config.fill_policy);
    let report = with_spinner(
        format!("Fetching {} prices since {}...", config.symbol, config.start),
        pipeline.run(provider, &config.symbol, config.start),
    )
    .await?;

    let content = render_export(&report, config.format, dashboard)?;
    let path = config.output_path();
    write_output(&path, &content)?;

    info!(
        symbol = %report.symbol,
        format = %config.format,
        path = %path.display(),
        "Heatmap exported"
    );
    Ok(path)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::StaticProvider;

    fn config(format: ExportFormat, output: Option<PathBuf>) -> ExportConfig {
        ExportConfig {
            symbol: "SPY".to_string(),
            start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            fill_policy: FillPolicy::ForwardFill,
            format,
            output,
        }
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("svg".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
        assert_eq!("htm".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert!("png".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_default_output_path() {
        let config = config(ExportFormat::Svg, None);
        assert_eq!(config.output_path(), PathBuf::from("SPY_monthly_returns.svg"));
    }

    #[tokio::test]
    async fn test_export_writes_each_format() {
        let dir = std::env::temp_dir().join(format!("heatmap-export-{}", std::process::id()));
        let dashboard = DashboardConfig::default();

        let csv_path = dir.join("nested").join("spy.csv");
        let written = export_report(
            &StaticProvider,
            &config(ExportFormat::Csv, Some(csv_path.clone())),
            &dashboard,
        )
        .await
        .unwrap();
        assert_eq!(written, csv_path);
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("year,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec"));
        // 2022년 1~11월은 빈 셀
        assert!(csv.lines().nth(1).unwrap().starts_with("2022,,,,,,,,,,,,"));

        let json_path = dir.join("spy.json");
        export_report(
            &StaticProvider,
            &config(ExportFormat::Json, Some(json_path.clone())),
            &dashboard,
        )
        .await
        .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["symbol"], "SPY");
        assert_eq!(json["records"].as_array().unwrap().len(), 4);

        let html_path = dir.join("spy.html");
        export_report(
            &StaticProvider,
            &config(ExportFormat::Html, Some(html_path.clone())),
            &dashboard,
        )
        .await
        .unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("📊 SPY Historical Returns"));
        assert!(html.contains("<svg"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
