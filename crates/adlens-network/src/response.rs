//! 벤더 텍스트 응답 → JSON 객체 파싱/검증.
//!
//! 모델은 JSON만 출력하라는 지시에도 코드펜스(```` ```json ... ``` ````)로 감싸는 경우가 있다.
//! 원문 파싱을 먼저 시도하고, 실패하면 펜스를 벗겨 다시 파싱한다.

use adlens_core::error::CoreError;
use serde_json::{Map, Value};
use tracing::warn;

/// 앞뒤 코드펜스 제거. 펜스가 없으면 trim만 한다
///
/// 여는 펜스 뒤의 언어 태그(`json`, `JSON` 등 한 단어)도 함께 제거한다.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = match rest.find('\n') {
        Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[idx + 1..]
        }
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        _ => rest,
    };

    let rest = rest.trim();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn as_object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// 응답 텍스트를 JSON 객체로 파싱 (원문 → 펜스 제거 순)
pub fn parse_json_object(text: &str) -> Result<Map<String, Value>, CoreError> {
    if let Some(map) = serde_json::from_str(text.trim()).ok().and_then(as_object) {
        return Ok(map);
    }

    let stripped = strip_code_fence(text);
    match serde_json::from_str::<Value>(stripped) {
        Ok(value) => as_object(value)
            .ok_or_else(|| CoreError::schema("응답이 JSON 객체가 아닙니다", text)),
        Err(e) => Err(CoreError::schema(
            format!("응답을 JSON으로 파싱할 수 없습니다: {}", e),
            text,
        )),
    }
}

/// 필수 키가 모두 있는지 검증. 값이 `"-"`여도 키만 있으면 통과
pub fn require_keys(
    object: &Map<String, Value>,
    keys: &[&str],
    raw: &str,
) -> Result<(), CoreError> {
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|k| !object.contains_key(*k))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::schema(
            format!("필수 필드가 누락되었습니다: {}", missing.join(", ")),
            raw,
        ))
    }
}

/// 파싱 + 필수 키 검증. 실패 시 원문을 경고 로그로 남긴다
pub fn parse_validated(
    operation: &str,
    text: &str,
    keys: &[&str],
) -> Result<Map<String, Value>, CoreError> {
    let result = parse_json_object(text).and_then(|object| {
        require_keys(&object, keys, text)?;
        Ok(object)
    });
    if let Err(CoreError::SchemaValidation { message, raw_response }) = &result {
        warn!(operation, "응답 검증 실패: {} / 원본: {}", message, raw_response);
    }
    result
}
