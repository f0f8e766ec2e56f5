//! 데이터 모듈 오류 타입.

use heatmap_core::HeatmapError;
use thiserror::Error;

/// 데이터 로딩 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크/전송 오류
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 오류 응답
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 알 수 없는 심볼 또는 파일 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 응답/파일 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 결과가 비어 있음
    #[error("No price data: {0}")]
    Empty(String),

    /// 잘못된 요청 파라미터
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    Config(String),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            DataError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            DataError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            DataError::NotFound(err.to_string())
        } else {
            DataError::Io(err.to_string())
        }
    }
}

impl From<HeatmapError> for DataError {
    fn from(err: HeatmapError) -> Self {
        match err {
            HeatmapError::InvalidInput(msg) => DataError::InvalidRequest(msg),
            other => DataError::Parse(other.to_string()),
        }
    }
}

/// 파이프라인 경계에서는 요청 자체가 잘못된 경우를 제외하고 모두
/// `DataUnavailable`로 취급합니다.
impl From<DataError> for HeatmapError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::InvalidRequest(msg) => HeatmapError::InvalidInput(msg),
            DataError::Config(msg) => HeatmapError::Config(msg),
            other => HeatmapError::DataUnavailable(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_heatmap_error() {
        let err: HeatmapError = DataError::Empty("SPY".to_string()).into();
        assert!(matches!(err, HeatmapError::DataUnavailable(_)));

        let err: HeatmapError = DataError::Http {
            status: 404,
            message: "Not Found".to_string(),
        }
        .into();
        assert!(matches!(err, HeatmapError::DataUnavailable(ref m) if m.contains("404")));

        let err: HeatmapError = DataError::InvalidRequest("empty symbol".to_string()).into();
        assert!(matches!(err, HeatmapError::InvalidInput(_)));
    }

    #[test]
    fn test_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        assert!(matches!(DataError::from(io), DataError::NotFound(_)));
    }
}
