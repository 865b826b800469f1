//! 상위 소재 인사이트 클라이언트.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use adlens_core::config::ExternalApiEndpoint;
use adlens_core::error::CoreError;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::models::insight::{InsightAnalysis, INSIGHT_KEYS};
use adlens_core::ports::insight_provider::InsightProvider;

use crate::chat::{ChatClient, CompletionOptions, ContentPart};
use crate::prompts;
use crate::response::parse_validated;

const DEFAULT_MODEL: &str = "gpt-4.1";

const OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.4,
    max_tokens: 2000,
};

/// 텍스트 모델 기반 인사이트 분석기
pub struct RemoteInsightProvider {
    chat: ChatClient,
}

impl RemoteInsightProvider {
    pub fn new(config: &ExternalApiEndpoint) -> Result<Self, CoreError> {
        Ok(Self {
            chat: ChatClient::new(config, DEFAULT_MODEL, "인사이트 분석")?,
        })
    }
}

#[async_trait]
impl InsightProvider for RemoteInsightProvider {
    async fn analyze_materials(
        &self,
        materials: &[CreativeRecord],
    ) -> Result<InsightAnalysis, CoreError> {
        let prompt = prompts::insight_prompt(materials);
        let text = self
            .chat
            .complete("인사이트 분석", &[ContentPart::Text(prompt)], OPTIONS)
            .await?;

        let object = parse_validated("인사이트 분석", &text, &INSIGHT_KEYS)?;
        let analysis: InsightAnalysis = serde_json::from_value(Value::Object(object))
            .map_err(|e| CoreError::schema(format!("인사이트 응답 형식 오류: {}", e), &text))?;

        info!(materials = materials.len(), "인사이트 분석 완료");
        Ok(analysis)
    }

    fn provider_name(&self) -> &str {
        self.chat.model()
    }
}
