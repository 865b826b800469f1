//! 배너 카피 생성 클라이언트.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use adlens_core::config::ExternalApiEndpoint;
use adlens_core::error::CoreError;
use adlens_core::models::generation::{BannerCopyTable, CopyGenerationRequest, BANNER_COPY_KEYS};
use adlens_core::ports::copy_generator::CopyGenerator;
use adlens_core::taxonomy::CopyType;

use crate::chat::{ChatClient, CompletionOptions, ContentPart};
use crate::prompts;
use crate::response::{parse_validated, require_keys};

const DEFAULT_MODEL: &str = "gpt-4.1";

const TABLE_KEY: &str = "bannerCopyTable";

const OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.4,
    max_tokens: 4000,
};

/// 텍스트 모델 기반 카피 생성기
pub struct RemoteCopyGenerator {
    chat: ChatClient,
}

impl RemoteCopyGenerator {
    pub fn new(config: &ExternalApiEndpoint) -> Result<Self, CoreError> {
        Ok(Self {
            chat: ChatClient::new(config, DEFAULT_MODEL, "카피 생성")?,
        })
    }
}

/// `bannerCopyTable` 배열 검증 후 변환
///
/// 각 항목은 7개 키와 알려진 copyType을 가져야 한다. 일부 유형이 빠진 표는 허용한다.
fn parse_copy_table(object: serde_json::Map<String, Value>, raw: &str) -> Result<BannerCopyTable, CoreError> {
    let entries = object
        .get(TABLE_KEY)
        .and_then(|v| v.as_array())
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| CoreError::schema("bannerCopyTable이 비어 있거나 배열이 아닙니다", raw))?;

    for (idx, entry) in entries.iter().enumerate() {
        let map = entry
            .as_object()
            .ok_or_else(|| CoreError::schema(format!("bannerCopyTable[{idx}]가 객체가 아닙니다"), raw))?;
        require_keys(map, &BANNER_COPY_KEYS, raw)?;
        let copy_type = map.get("copyType").and_then(|v| v.as_str()).unwrap_or_default();
        if !CopyType::ALL.iter().any(|t| t.key() == copy_type) {
            return Err(CoreError::schema(
                format!("알 수 없는 copyType: {copy_type}"),
                raw,
            ));
        }
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|e| CoreError::schema(format!("카피 테이블 형식 오류: {}", e), raw))
}

#[async_trait]
impl CopyGenerator for RemoteCopyGenerator {
    async fn generate_copy(
        &self,
        request: &CopyGenerationRequest,
    ) -> Result<BannerCopyTable, CoreError> {
        let analysis = request.validate()?;
        let prompt = prompts::copy_prompt(request, analysis);
        let text = self
            .chat
            .complete("카피 생성", &[ContentPart::Text(prompt)], OPTIONS)
            .await?;

        let object = parse_validated("카피 생성", &text, &[TABLE_KEY])?;
        let table = parse_copy_table(object, &text).inspect_err(|e| {
            warn!("카피 테이블 검증 실패: {}", e);
        })?;

        let missing = table.missing_types();
        if !missing.is_empty() {
            let keys: Vec<&str> = missing.iter().map(|t| t.key()).collect();
            warn!(missing = ?keys, "카피 테이블에 일부 유형 누락");
        }
        info!(entries = table.banner_copy_table.len(), "배너 카피 생성 완료");
        Ok(table)
    }

    fn provider_name(&self) -> &str {
        self.chat.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::tests::{endpoint, openai_body};
    use adlens_core::config::AiProviderType;
    use adlens_core::models::insight::InsightAnalysis;
    use serde_json::json;

    fn entry(copy_type: &str) -> Value {
        json!({
            "copyType": copy_type,
            "description": "- 혜택 인지 극대화",
            "bannerSampleCopy": "첫 달 이자 2배",
            "performanceMetricExamples": ["CTR", "CVR"],
            "abTestCopyExamples": { "optionA": "지금 가입 시", "optionB": "한정 기간" },
            "recommendedColorTone": ["네이비", "화이트"],
            "recommendedCtaCopyExamples": ["지금 가입", "혜택 보기"]
        })
    }

    fn request() -> CopyGenerationRequest {
        CopyGenerationRequest {
            analysis_result: Some(InsightAnalysis {
                ai_total_analyze: "혜택 수치 강조가 효과적".into(),
                ..Default::default()
            }),
            brand_message: "믿을 수 있는 금융".into(),
            brand_event: "봄맞이 특판".into(),
        }
    }

    fn generator(server: &mockito::Server) -> RemoteCopyGenerator {
        let url = format!("{}/v1/chat/completions", server.url());
        RemoteCopyGenerator::new(&endpoint(&url, AiProviderType::OpenAi)).unwrap()
    }

    #[tokio::test]
    async fn full_table_is_parsed() {
        let mut server = mockito::Server::new_async().await;
        let entries: Vec<Value> = CopyType::ALL.iter().map(|t| entry(t.key())).collect();
        let body = json!({ "bannerCopyTable": entries }).to_string();
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(mockito::Matcher::Regex("봄맞이 특판".into()))
            .with_status(200)
            .with_body(openai_body(&body))
            .create_async()
            .await;

        let table = generator(&server).generate_copy(&request()).await.unwrap();
        assert_eq!(table.banner_copy_table.len(), 9);
        assert!(table.missing_types().is_empty());
        let hooking = table.get(CopyType::HookingPhrase).unwrap();
        assert_eq!(hooking.ab_test_copy_examples.option_b, "한정 기간");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn partial_table_is_allowed() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({ "bannerCopyTable": [entry("emotionalEmpathy")] }).to_string();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(openai_body(&body))
            .create_async()
            .await;

        let table = generator(&server).generate_copy(&request()).await.unwrap();
        assert_eq!(table.missing_types().len(), 8);
    }

    #[tokio::test]
    async fn entry_missing_key_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let mut broken = entry("hookingPhrase");
        broken.as_object_mut().unwrap().remove("recommendedColorTone");
        let body = json!({ "bannerCopyTable": [broken] }).to_string();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(openai_body(&body))
            .create_async()
            .await;

        let err = generator(&server).generate_copy(&request()).await.unwrap_err();
        assert!(err.to_string().contains("recommendedColorTone"));
    }

    #[tokio::test]
    async fn unknown_copy_type_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({ "bannerCopyTable": [entry("mysteryType")] }).to_string();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(openai_body(&body))
            .create_async()
            .await;

        let err = generator(&server).generate_copy(&request()).await.unwrap_err();
        assert!(matches!(err, CoreError::SchemaValidation { .. }));
    }

    #[tokio::test]
    async fn invalid_request_skips_vendor_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let mut req = request();
        req.brand_message.clear();
        let err = generator(&server).generate_copy(&req).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        mock.assert_async().await;
    }
}
