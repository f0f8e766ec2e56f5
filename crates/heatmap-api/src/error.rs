//! 통합 API 에러 응답 타입.
//!
//! 모든 JSON 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::http::StatusCode;
use axum::Json;
use heatmap_core::HeatmapError;
use serde::{Deserialize, Serialize};

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "DATA_UNAVAILABLE",
///   "message": "데이터 없음: Not found: NOSUCH - No data found",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DATA_UNAVAILABLE", "INVALID_INPUT")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

impl From<&HeatmapError> for ApiErrorResponse {
    fn from(err: &HeatmapError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 파이프라인 에러의 HTTP 상태 코드.
///
/// - `DataUnavailable` → 502 (상위 데이터 소스 문제)
/// - `InsufficientData` → 422
/// - `InvalidInput` → 400
/// - 그 외 → 500
pub fn status_for(err: &HeatmapError) -> StatusCode {
    match err {
        HeatmapError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
        HeatmapError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
        HeatmapError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `HeatmapError`를 핸들러 에러 응답으로 변환합니다.
///
/// ```ignore
/// let report = pipeline.run(provider, &symbol, start).await.map_err(api_error)?;
/// ```
pub fn api_error(err: HeatmapError) -> (StatusCode, Json<ApiErrorResponse>) {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::warn!(code = err.code(), error = %err, "Request failed");
    } else {
        tracing::debug!(code = err.code(), error = %err, "Request rejected");
    }
    (status, Json(ApiErrorResponse::from(&err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&HeatmapError::DataUnavailable("x".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&HeatmapError::InsufficientData("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&HeatmapError::InvalidInput("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&HeatmapError::Render("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let (status, Json(body)) = api_error(HeatmapError::InvalidInput("빈 심볼".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code(), "INVALID_INPUT");

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["timestamp"].is_i64());
        assert!(json["message"].as_str().unwrap().contains("빈 심볼"));
    }

    #[test]
    fn test_display() {
        let err = ApiErrorResponse::new("INVALID_INPUT", "bad date");
        assert_eq!(err.to_string(), "[INVALID_INPUT] bad date");
    }
}
