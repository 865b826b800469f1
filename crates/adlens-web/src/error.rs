//! API 에러 처리.
//!
//! 모든 에러 응답 본문은 `{success: false, error, status}` 형태.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use adlens_core::error::{CoreError, VendorErrorKind};

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 잘못된 요청
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 리소스를 찾을 수 없음
    #[error("리소스를 찾을 수 없음: {0}")]
    NotFound(String),

    /// 이미 실행 중인 작업과 충돌
    #[error("작업 충돌: {0}")]
    Conflict(String),

    /// 벤더 요청 빈도 제한
    #[error("요청 한도 초과: {0}")]
    TooManyRequests(String),

    /// 벤더 호출 실패 / 응답 형식 오류
    #[error("외부 AI 서비스 오류: {0}")]
    BadGateway(String),

    /// 필요한 설정(API 키 등) 누락
    #[error("서비스 사용 불가: {0}")]
    ServiceUnavailable(String),

    /// 내부 서버 오류
    #[error("내부 서버 오류: {0}")]
    Internal(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 항상 false
    pub success: bool,
    /// 에러 메시지
    pub error: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::TooManyRequests(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            error: self.message().to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.user_message();
        match err {
            CoreError::NotFound { .. }
            | CoreError::ResourceNotFound(_)
            | CoreError::EmptySelection { .. } => ApiError::NotFound(message),
            CoreError::Validation { .. } => ApiError::BadRequest(message),
            CoreError::Conflict(_) => ApiError::Conflict(message),
            CoreError::Vendor {
                kind: VendorErrorKind::RateLimited,
                ..
            } => ApiError::TooManyRequests(message),
            CoreError::Vendor { kind, message: detail } => {
                warn!(kind = ?kind, "벤더 호출 실패: {}", detail);
                ApiError::BadGateway(message)
            }
            CoreError::SchemaValidation { .. } => ApiError::BadGateway(message),
            CoreError::Config(_) => ApiError::ServiceUnavailable(message),
            other => {
                error!("처리되지 않은 내부 에러: {}", other);
                ApiError::Internal(message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
