//! 히트맵 파이프라인의 에러 타입.
//!
//! 가져오기 → 변환 → 피벗 → 렌더링 전 과정에서 사용되는 에러를 정의합니다.
//! 파이프라인은 재시도나 부분 결과를 제공하지 않으므로 모든 에러는
//! 호출자(CLI 또는 대시보드)까지 그대로 전파됩니다.

use thiserror::Error;

/// 핵심 히트맵 에러.
#[derive(Debug, Error)]
pub enum HeatmapError {
    /// 가격 데이터를 가져오지 못했거나 결과가 비어 있음
    #[error("데이터 없음: {0}")]
    DataUnavailable(String),

    /// 수익률 그리드를 만들기에 가격 데이터가 부족함
    #[error("데이터 부족: {0}")]
    InsufficientData(String),

    /// 잘못된 입력 (심볼, 날짜, 정렬되지 않은 가격 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 렌더링 에러
    #[error("렌더링 에러: {0}")]
    Render(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 히트맵 작업을 위한 Result 타입.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

impl HeatmapError {
    /// 외부 데이터 소스 측 문제인지 확인합니다.
    pub fn is_upstream(&self) -> bool {
        matches!(self, HeatmapError::DataUnavailable(_))
    }

    /// 사용자 입력을 고치면 해결될 수 있는 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HeatmapError::InvalidInput(_) | HeatmapError::InsufficientData(_)
        )
    }

    /// API 응답 및 로그에서 사용하는 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            HeatmapError::DataUnavailable(_) => "DATA_UNAVAILABLE",
            HeatmapError::InsufficientData(_) => "INSUFFICIENT_DATA",
            HeatmapError::InvalidInput(_) => "INVALID_INPUT",
            HeatmapError::Config(_) => "CONFIG_ERROR",
            HeatmapError::Render(_) => "RENDER_ERROR",
            HeatmapError::Io(_) => "IO_ERROR",
        }
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::Render(err.to_string())
    }
}

impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for HeatmapError {
    fn from(err: config::ConfigError) -> Self {
        HeatmapError::Config(err.to_string())
    }
}
