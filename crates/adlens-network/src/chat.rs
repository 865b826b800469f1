//! 텍스트 완성 API 공용 클라이언트.
//!
//! 분석/인사이트/카피 클라이언트가 공유한다. 제공자 타입에 따라:
//! - OpenAI 호환: `Authorization: Bearer`, `choices[0].message.content`
//! - Anthropic: `x-api-key` + `anthropic-version`, `content[0].text`

use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use adlens_core::config::{AiProviderType, ExternalApiEndpoint};
use adlens_core::error::CoreError;

use crate::error_mapping::{transport_error, vendor_error};

/// Anthropic API 버전 헤더 값
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// 메시지 구성 요소
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// base64 인코딩된 이미지
    Image { mime_type: String, data: String },
}

/// 요청별 생성 옵션
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// 텍스트 완성 API 클라이언트
#[derive(Debug, Clone)]
pub struct ChatClient {
    http_client: reqwest::Client,
    endpoint: String,
    /// API 키 (메모리에만 유지)
    api_key: String,
    model: String,
    provider_type: AiProviderType,
}

impl ChatClient {
    /// 새 ChatClient 생성
    ///
    /// - `default_model`: 설정에 모델이 없을 때 사용
    /// - `label`: 키 미설정 에러 메시지에 쓰는 용도명
    pub fn new(
        config: &ExternalApiEndpoint,
        default_model: &str,
        label: &str,
    ) -> Result<Self, CoreError> {
        if !config.has_usable_key() {
            return Err(CoreError::Config(format!(
                "{label} API 키 미설정. config.json 또는 OPENAI_API_KEY 환경변수를 확인하세요."
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        let model = config
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_model.to_string());

        debug!(
            endpoint = %config.endpoint,
            model = %model,
            timeout = config.timeout_secs,
            "{} 클라이언트 초기화",
            label
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model,
            provider_type: config.provider_type,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_type(&self) -> AiProviderType {
        self.provider_type
    }

    /// 제공자 형식에 맞는 요청 본문
    pub fn build_request_body(&self, parts: &[ContentPart], options: CompletionOptions) -> Value {
        match self.provider_type {
            AiProviderType::Anthropic => {
                let content: Vec<Value> = parts
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text(text) => json!({ "type": "text", "text": text }),
                        ContentPart::Image { mime_type, data } => json!({
                            "type": "image",
                            "source": { "type": "base64", "media_type": mime_type, "data": data }
                        }),
                    })
                    .collect();
                json!({
                    "model": self.model,
                    "max_tokens": options.max_tokens,
                    "temperature": options.temperature,
                    "messages": [{ "role": "user", "content": content }]
                })
            }
            AiProviderType::OpenAi => {
                let content = match parts {
                    [ContentPart::Text(text)] => Value::String(text.clone()),
                    _ => Value::Array(
                        parts
                            .iter()
                            .map(|part| match part {
                                ContentPart::Text(text) => json!({ "type": "text", "text": text }),
                                ContentPart::Image { mime_type, data } => json!({
                                    "type": "image_url",
                                    "image_url": {
                                        "url": format!("data:{};base64,{}", mime_type, data),
                                        "detail": "high"
                                    }
                                }),
                            })
                            .collect(),
                    ),
                };
                json!({
                    "model": self.model,
                    "temperature": options.temperature,
                    "max_tokens": options.max_tokens,
                    "messages": [{ "role": "user", "content": content }]
                })
            }
        }
    }

    /// 요청 1회 실행 후 응답 텍스트 반환. 재시도하지 않는다
    pub async fn complete(
        &self,
        operation: &str,
        parts: &[ContentPart],
        options: CompletionOptions,
    ) -> Result<String, CoreError> {
        let body = self.build_request_body(parts, options);

        let mut builder = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body);

        builder = match self.provider_type {
            AiProviderType::Anthropic => builder
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
            AiProviderType::OpenAi => {
                builder.header("Authorization", format!("Bearer {}", self.api_key))
            }
        };

        debug!(operation, endpoint = %self.endpoint, model = %self.model, "AI API 호출");

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(operation, e))?;

        if !status.is_success() {
            return Err(vendor_error(operation, status.as_u16(), &text));
        }

        let content = match self.provider_type {
            AiProviderType::Anthropic => extract_claude_text(&text)?,
            AiProviderType::OpenAi => extract_openai_text(&text)?,
        };
        debug!(operation, chars = content.chars().count(), "AI API 응답 수신");
        Ok(content)
    }
}

/// 완성 응답 JSON 파싱
fn parse_envelope(body: &str) -> Result<Value, CoreError> {
    serde_json::from_str(body)
        .map_err(|e| CoreError::schema(format!("API 응답 JSON 파싱 실패: {}", e), body))
}

fn non_empty(text: Option<&str>, body: &str) -> Result<String, CoreError> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::schema("AI로부터 응답 텍스트를 받지 못했습니다", body))
}

/// OpenAI 응답의 `choices[0].message.content`
pub fn extract_openai_text(body: &str) -> Result<String, CoreError> {
    let response = parse_envelope(body)?;
    let text = response
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|t| t.as_str());
    non_empty(text, body)
}

/// Claude 응답의 `content[]` 중 첫 text 블록
pub fn extract_claude_text(body: &str) -> Result<String, CoreError> {
    let response = parse_envelope(body)?;
    let text = response
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|blocks| {
            blocks
                .iter()
                .find_map(|block| block.get("text").and_then(|t| t.as_str()))
        });
    non_empty(text, body)
}
