//! 월별 수익률 히트맵 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # SPY 월별 수익률 표 출력 (2000-01-01부터)
//! heatmap show -s SPY
//!
//! # 데이터가 없는 월을 직전 종가로 채워서 계산
//! heatmap show -s QQQ -f 2010-01-01 --fill ffill
//!
//! # 히트맵을 HTML/SVG/CSV/JSON으로 저장
//! heatmap export -s SPY --format html -o spy.html
//!
//! # 일별 종가를 CSV로 내려받은 뒤 오프라인으로 사용
//! heatmap prices -s SPY -o data/SPY.csv
//! heatmap --data-dir data show -s SPY
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use heatmap_cli::commands::{
    download_prices, export_report, resolve_start, show_returns, ExportConfig, ExportFormat,
    PricesConfig, ShowConfig,
};
use heatmap_core::{
    init_logging, AppConfig, FillPolicy, LogConfig, LogFormat, DEFAULT_CONFIG_PATH,
};
use heatmap_data::create_provider;

#[derive(Parser)]
#[command(name = "heatmap")]
#[command(about = "Monthly returns heatmap CLI - 월별 수익률 히트맵", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// CSV 가격 디렉토리 (지정 시 Yahoo Finance 대신 사용)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// 상세 로그 출력
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 월별 수익률 표 출력
    Show {
        /// 종목 심볼 (예: SPY, ^GSPC)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 설정의 default_start)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 빈 월 처리 방식 (ffill, skip)
        #[arg(long)]
        fill: Option<String>,
    },

    /// 히트맵을 파일로 내보내기
    Export {
        /// 종목 심볼 (예: SPY, ^GSPC)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 설정의 default_start)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 빈 월 처리 방식 (ffill, skip)
        #[arg(long)]
        fill: Option<String>,

        /// 출력 형식 (csv, json, svg, html)
        #[arg(long, default_value = "html")]
        format: String,

        /// 출력 파일 경로 (기본: {SYMBOL}_monthly_returns.{format})
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 일별 종가를 CSV로 다운로드
    Prices {
        /// 종목 심볼 (예: SPY, ^GSPC)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 설정의 default_start)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 출력 파일 경로 (기본: data/{SYMBOL}.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_fill(fill: Option<&str>, default: FillPolicy) -> Result<FillPolicy> {
    match fill {
        Some(raw) => raw.parse().map_err(anyhow::Error::msg),
        None => Ok(default),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    // 표 출력(stdout)을 가리지 않도록 기본은 warn
    let level = if cli.verbose {
        config.logging.level.clone()
    } else {
        "warn".to_string()
    };
    let format = config.logging.format.parse().unwrap_or(LogFormat::Compact);
    init_logging(LogConfig::new(level).with_format(format))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if let Some(dir) = cli.data_dir {
        config.data.data_dir = Some(dir);
    }
    let provider = create_provider(&config.data)?;
    let dashboard = &config.dashboard;
    let symbol_or_default =
        |symbol: Option<String>| symbol.unwrap_or_else(|| dashboard.default_symbol.clone());

    let result = match cli.command {
        Commands::Show { symbol, from, fill } => {
            let config = ShowConfig {
                symbol: symbol_or_default(symbol),
                start: resolve_start(from.as_deref(), dashboard.default_start)?,
                fill_policy: parse_fill(fill.as_deref(), dashboard.fill_policy)?,
            };

            show_returns(provider.as_ref(), &config)
                .await
                .map(|output| println!("{}", output))
        }

        Commands::Export {
            symbol,
            from,
            fill,
            format,
            output,
        } => {
            let config = ExportConfig {
                symbol: symbol_or_default(symbol),
                start: resolve_start(from.as_deref(), dashboard.default_start)?,
                fill_policy: parse_fill(fill.as_deref(), dashboard.fill_policy)?,
                format: format.parse::<ExportFormat>().map_err(anyhow::Error::msg)?,
                output,
            };

            export_report(provider.as_ref(), &config, dashboard)
                .await
                .map(|path| println!("Saved {} heatmap to {}", config.format, path.display()))
        }

        Commands::Prices {
            symbol,
            from,
            output,
        } => {
            let config = PricesConfig {
                symbol: symbol_or_default(symbol),
                start: resolve_start(from.as_deref(), dashboard.default_start)?,
                output,
            };

            download_prices(provider.as_ref(), &config)
                .await
                .map(|(path, series)| {
                    info!(provider = provider.name(), "Download complete");
                    println!("Saved {} rows to {}", series.len(), path.display());
                })
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "heatmap", "show", "-s", "QQQ", "-f", "2010-01-01", "--fill", "skip", "--data-dir",
            "data",
        ])
        .unwrap();

        assert_eq!(cli.data_dir.as_deref(), Some("data"));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        match cli.command {
            Commands::Show { symbol, from, fill } => {
                assert_eq!(symbol.as_deref(), Some("QQQ"));
                assert_eq!(from.as_deref(), Some("2010-01-01"));
                assert_eq!(fill.as_deref(), Some("skip"));
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "heatmap", "export", "-s", "SPY", "--format", "svg", "-o", "out/spy.svg",
        ])
        .unwrap();

        match cli.command {
            Commands::Export { format, output, .. } => {
                assert_eq!(format, "svg");
                assert_eq!(output, Some(PathBuf::from("out/spy.svg")));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_parse_fill() {
        assert_eq!(parse_fill(None, FillPolicy::Skip).unwrap(), FillPolicy::Skip);
        assert_eq!(
            parse_fill(Some("ffill"), FillPolicy::Skip).unwrap(),
            FillPolicy::ForwardFill
        );
        assert_eq!(
            parse_fill(Some("skip"), FillPolicy::ForwardFill).unwrap(),
            FillPolicy::Skip
        );
        assert!(parse_fill(Some("bfill"), FillPolicy::Skip).is_err());
    }
}
