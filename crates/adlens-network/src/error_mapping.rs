//! 벤더 HTTP 오류 → `CoreError::Vendor` 분류.
//!
//! 분류는 사용자 표시용이다. 어떤 분류도 자동 재시도를 일으키지 않는다.

use adlens_core::error::{CoreError, VendorErrorKind};
use tracing::warn;

/// 본문 요약 최대 길이
const BODY_PREVIEW_CHARS: usize = 200;

/// 상태 코드 + 본문으로 실패 분류
pub fn classify_vendor_error(status: u16, body: &str) -> VendorErrorKind {
    let lower = body.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    match status {
        401 | 403 => VendorErrorKind::Auth,
        402 => VendorErrorKind::QuotaExceeded,
        429 if mentions(&["quota", "billing", "credit"]) => VendorErrorKind::QuotaExceeded,
        429 => VendorErrorKind::RateLimited,
        404 if mentions(&["model"]) => VendorErrorKind::ModelUnavailable,
        400 | 422 if mentions(&["model_not_found", "does not exist", "do not have access"]) => {
            VendorErrorKind::ModelUnavailable
        }
        400 | 404 | 413 | 422 => VendorErrorKind::MalformedRequest,
        500..=599 => VendorErrorKind::Server,
        _ => VendorErrorKind::Other,
    }
}

/// 에러 본문에서 사람이 읽을 메시지 추출.
///
/// OpenAI/Anthropic 모두 `{"error": {"message": ...}}` 형태. 아니면 본문 앞부분.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.chars().take(BODY_PREVIEW_CHARS).collect())
}

/// 실패 응답을 `CoreError::Vendor`로 변환하고 경고 로그를 남긴다
pub fn vendor_error(operation: &str, status: u16, body: &str) -> CoreError {
    let kind = classify_vendor_error(status, body);
    let message = extract_error_message(body);
    warn!(operation, status, kind = ?kind, "AI API 오류 응답: {}", message);
    CoreError::vendor(kind, format!("{operation} ({status}): {message}"))
}

/// 전송 단계(reqwest) 실패 변환
pub fn transport_error(operation: &str, err: reqwest::Error) -> CoreError {
    if err.is_timeout() {
        CoreError::Network(format!("{operation} 타임아웃: {err}"))
    } else {
        CoreError::Network(format!("{operation} 실패: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses() {
        assert_eq!(classify_vendor_error(401, ""), VendorErrorKind::Auth);
        assert_eq!(classify_vendor_error(403, "forbidden"), VendorErrorKind::Auth);
    }

    #[test]
    fn rate_limit_vs_quota() {
        assert_eq!(
            classify_vendor_error(429, r#"{"error":{"message":"Rate limit reached"}}"#),
            VendorErrorKind::RateLimited
        );
        assert_eq!(
            classify_vendor_error(
                429,
                r#"{"error":{"message":"You exceeded your current quota","code":"insufficient_quota"}}"#
            ),
            VendorErrorKind::QuotaExceeded
        );
    }

    #[test]
    fn model_problems() {
        assert_eq!(
            classify_vendor_error(404, r#"{"error":{"code":"model_not_found"}}"#),
            VendorErrorKind::ModelUnavailable
        );
        assert_eq!(
            classify_vendor_error(400, r#"{"error":{"message":"Invalid size"}}"#),
            VendorErrorKind::MalformedRequest
        );
    }

    #[test]
    fn server_and_other() {
        assert_eq!(classify_vendor_error(503, ""), VendorErrorKind::Server);
        assert_eq!(classify_vendor_error(418, ""), VendorErrorKind::Other);
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"Incorrect API key"}}"#),
            "Incorrect API key"
        );
        assert_eq!(
            extract_error_message(r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#),
            "Overloaded"
        );
        assert_eq!(extract_error_message(r#"{"error":"plain"}"#), "plain");
        let long = "x".repeat(500);
        assert_eq!(extract_error_message(&long).len(), BODY_PREVIEW_CHARS);
    }

    #[test]
    fn vendor_error_carries_kind() {
        let err = vendor_error("소재 분석", 401, r#"{"error":{"message":"bad key"}}"#);
        match err {
            CoreError::Vendor { kind, message } => {
                assert_eq!(kind, VendorErrorKind::Auth);
                assert!(message.contains("bad key"));
            }
            other => panic!("Vendor 기대: {other:?}"),
        }
    }
}
