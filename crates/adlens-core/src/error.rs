//! AdLens 핵심 에러 타입.
//!
//! 어댑터 crate는 `CoreError`를 그대로 반환하고, 웹 레이어는 `ApiError`로 변환한다.

use serde::Serialize;
use thiserror::Error;

/// 외부 AI 벤더 호출 실패 분류.
///
/// 분류는 사용자 표시용이며 재시도 동작에는 영향을 주지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorErrorKind {
    /// API 키 누락/무효
    Auth,
    /// 사용 한도(크레딧) 소진
    QuotaExceeded,
    /// 요청 빈도 제한 (429)
    RateLimited,
    /// 잘못된 요청 (400/422)
    MalformedRequest,
    /// 모델 접근 불가
    ModelUnavailable,
    /// 벤더 서버 오류 (5xx)
    Server,
    /// 기타
    Other,
}

impl VendorErrorKind {
    /// 사용자에게 보여줄 안내 문구
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Auth => "OpenAI API 키가 올바르지 않습니다. API 키 설정을 확인해주세요.",
            Self::QuotaExceeded => "API 사용 한도를 초과했습니다. 크레딧을 확인해주세요.",
            Self::RateLimited => "요청 한도를 초과했습니다. 잠시 후 다시 시도해주세요.",
            Self::MalformedRequest => "요청 형식이 올바르지 않습니다. 입력값을 확인해주세요.",
            Self::ModelUnavailable => "요청한 모델에 접근할 수 없습니다. 모델 설정을 확인해주세요.",
            Self::Server => "AI 서비스에 일시적인 문제가 발생했습니다.",
            Self::Other => "AI 서비스 호출 중 오류가 발생했습니다.",
        }
    }
}

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 리소스를 찾을 수 없음 (레코드 등)
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Creative")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 소재 이미지 등 콘텐츠 경로를 해석할 수 없음.
    /// 벤더 호출 전에 반환된다.
    #[error("콘텐츠를 찾을 수 없음: {0}")]
    ResourceNotFound(String),

    /// 벤더 응답이 JSON이 아니거나 필수 키가 누락됨
    #[error("응답 스키마 검증 실패: {message}")]
    SchemaValidation {
        /// 실패 사유
        message: String,
        /// 진단용 원본 응답 텍스트
        raw_response: String,
    },

    /// 외부 AI 벤더 호출 실패
    #[error("AI 벤더 호출 실패 ({kind:?}): {message}")]
    Vendor {
        /// 실패 분류
        kind: VendorErrorKind,
        /// 벤더 응답 요약
        message: String,
    },

    /// 카테고리 필터 결과가 비어 있음
    #[error("선택한 카테고리에 해당하는 소재가 없습니다. ({main_category}/{sub_category})")]
    EmptySelection {
        /// 대분류
        main_category: String,
        /// 소분류
        sub_category: String,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 이미 실행 중인 작업과 충돌
    #[error("작업 충돌: {0}")]
    Conflict(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 벤더 에러 생성 헬퍼
    pub fn vendor(kind: VendorErrorKind, message: impl Into<String>) -> Self {
        Self::Vendor {
            kind,
            message: message.into(),
        }
    }

    /// 스키마 검증 에러 생성 헬퍼
    pub fn schema(message: impl Into<String>, raw_response: impl Into<String>) -> Self {
        Self::SchemaValidation {
            message: message.into(),
            raw_response: raw_response.into(),
        }
    }

    /// 사용자 표시용 메시지.
    ///
    /// 벤더 에러는 분류별 안내 문구를, 나머지는 `Display` 출력을 사용한다.
    pub fn user_message(&self) -> String {
        match self {
            Self::Vendor { kind, .. } => kind.user_message().to_string(),
            Self::EmptySelection { .. } => "선택한 카테고리에 해당하는 소재가 없습니다.".into(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_user_message_hides_raw_body() {
        let err = CoreError::vendor(VendorErrorKind::Auth, "Incorrect API key provided: sk-***");
        assert!(err.user_message().contains("API 키"));
        assert!(!err.user_message().contains("sk-"));
    }

    #[test]
    fn empty_selection_message() {
        let err = CoreError::EmptySelection {
            main_category: "금융".into(),
            sub_category: "은행".into(),
        };
        assert_eq!(
            err.user_message(),
            "선택한 카테고리에 해당하는 소재가 없습니다."
        );
        assert!(err.to_string().contains("금융/은행"));
    }

    #[test]
    fn schema_error_keeps_raw_text() {
        let err = CoreError::schema("필수 키 누락: eyeFlow", "{\"mainCopy\":\"a\"}");
        match err {
            CoreError::SchemaValidation { raw_response, .. } => {
                assert!(raw_response.contains("mainCopy"))
            }
            _ => panic!("SchemaValidation 기대"),
        }
    }
}
