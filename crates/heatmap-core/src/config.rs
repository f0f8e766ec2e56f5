//! 설정 관리.
//!
//! 설정 파일(`config/default.toml`, 선택적)과 `HEATMAP__` 접두사 환경 변수에서
//! 애플리케이션 설정을 로드합니다. 모든 섹션은 기본값을 가지므로 설정
//! 파일 없이도 동작합니다.
//!
//! ```text
//! HEATMAP__SERVER__PORT=8080
//! HEATMAP__DASHBOARD__DEFAULT_SYMBOL=QQQ
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::{FillPolicy, PriceField};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 데이터 소스 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 대시보드 화면 설정
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 문자열.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Yahoo Finance 차트 API 기본 URL
    pub base_url: String,
    /// HTTP User-Agent
    pub user_agent: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 사용할 종가 필드
    pub price_field: PriceField,
    /// CSV 가격 파일 디렉토리 (설정 시 Yahoo 대신 CSV 사용)
    pub data_dir: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 20,
            price_field: PriceField::AdjClose,
            data_dir: None,
        }
    }
}

/// 대시보드 화면 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 기본 종목
    pub default_symbol: String,
    /// 기본 시작일
    pub default_start: NaiveDate,
    /// 페이지 제목 (`{symbol}`은 종목으로 치환)
    pub title: String,
    /// 제목 아래 설명 문구 (`{symbol}`은 종목으로 치환)
    pub description: String,
    /// 원시 가격 표에 표시할 최대 행 수
    pub price_table_rows: usize,
    /// 월말 리샘플링 시 빈 월 처리 방식
    pub fill_policy: FillPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbol: "SPY".to_string(),
            default_start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            title: "{symbol} Historical Returns".to_string(),
            description: "This app shows a Bloomberg-style heatmap of {symbol} monthly returns over time."
                .to_string(),
            price_table_rows: 250,
            fill_policy: FillPolicy::Skip,
        }
    }
}

impl DashboardConfig {
    /// 종목을 치환한 페이지 제목.
    pub fn title_for(&self, symbol: &str) -> String {
        self.title.replace("{symbol}", symbol)
    }

    /// 종목을 치환한 설명 문구.
    pub fn description_for(&self, symbol: &str) -> String {
        self.description.replace("{symbol}", symbol)
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드 (선택적)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("HEATMAP")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
