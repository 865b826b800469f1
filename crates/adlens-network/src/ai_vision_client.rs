//! 소재 이미지 분석 클라이언트.
//!
//! 소재 이미지 한 장을 비전 모델에 보내 14개 디자인 속성을 받는다.
//! 이미지를 읽지 못하면 벤더를 호출하지 않는다.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, info};

use adlens_core::config::ExternalApiEndpoint;
use adlens_core::error::CoreError;
use adlens_core::models::analysis::{AnalysisResult, ANALYSIS_KEYS};
use adlens_core::ports::asset_store::AssetStore;
use adlens_core::ports::creative_analyzer::CreativeAnalyzer;

use crate::chat::{ChatClient, CompletionOptions, ContentPart};
use crate::prompts;
use crate::response::parse_validated;

const DEFAULT_MODEL: &str = "gpt-4.1";

const OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.4,
    max_tokens: 1000,
};

// ============================================================
// RemoteCreativeAnalyzer
// ============================================================

/// 비전 모델 기반 소재 분석기
pub struct RemoteCreativeAnalyzer {
    chat: ChatClient,
    assets: Arc<dyn AssetStore>,
    prompt: String,
}

impl RemoteCreativeAnalyzer {
    pub fn new(config: &ExternalApiEndpoint, assets: Arc<dyn AssetStore>) -> Result<Self, CoreError> {
        Ok(Self {
            chat: ChatClient::new(config, DEFAULT_MODEL, "소재 분석")?,
            assets,
            prompt: prompts::analysis_prompt(),
        })
    }
}

#[async_trait]
impl CreativeAnalyzer for RemoteCreativeAnalyzer {
    async fn analyze_creative(&self, image_ref: &str) -> Result<AnalysisResult, CoreError> {
        let asset = self.assets.load_image(image_ref).await?;
        let data = base64::engine::general_purpose::STANDARD.encode(&asset.bytes);

        debug!(
            image = image_ref,
            mime = %asset.mime_type,
            bytes = asset.bytes.len(),
            "소재 이미지 인코딩 완료"
        );

        let parts = [
            ContentPart::Text(self.prompt.clone()),
            ContentPart::Image {
                mime_type: asset.mime_type,
                data,
            },
        ];
        let text = self.chat.complete("소재 분석", &parts, OPTIONS).await?;
        let object = parse_validated("소재 분석", &text, &ANALYSIS_KEYS)?;
        let result = AnalysisResult::from_vendor_object(&object);

        info!(
            image = image_ref,
            populated = result.populated_count(),
            "소재 분석 완료"
        );
        Ok(result)
    }

    fn provider_name(&self) -> &str {
        self.chat.model()
    }
}

// ============================================================
// 테스트
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::tests::{endpoint, openai_body};
    use adlens_core::config::AiProviderType;
    use adlens_core::error::VendorErrorKind;
    use adlens_storage::assets::LocalAssetStore;
    use tempfile::TempDir;

    const FULL_RESPONSE: &str = r#"{
        "mainCopy": "연 5% 특판 적금",
        "mainCopyType": "할인 · 혜택 강조형",
        "mainCopyRatio": "30%",
        "subCopy": "-",
        "subCopyRatio": "10%",
        "ctaText": "가입하기",
        "ctaPosition": "bottomCenter",
        "ctaRatio": "8%",
        "modelRatio": "0%",
        "productRatio": "20%",
        "visualElements": "실사",
        "creativeColorTone": "비비드톤",
        "eyeFlow": "Z",
        "designAnalysis": "상단 카피에서 하단 CTA로 시선이 자연스럽게 이어진다."
    }"#;

    fn setup(url: &str) -> (TempDir, RemoteCreativeAnalyzer) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("banners")).unwrap();
        std::fs::write(dir.path().join("banners/a.png"), [0x89, b'P', b'N', b'G']).unwrap();
        let assets = Arc::new(LocalAssetStore::new(dir.path(), "generated-banners"));
        let analyzer =
            RemoteCreativeAnalyzer::new(&endpoint(url, AiProviderType::OpenAi), assets).unwrap();
        (dir, analyzer)
    }

    #[tokio::test]
    async fn analyzes_image_and_normalizes_dash() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(mockito::Matcher::Regex("data:image/png;base64,".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(openai_body(FULL_RESPONSE))
            .create_async()
            .await;

        let (_dir, analyzer) = setup(&format!("{}/v1/chat/completions", server.url()));
        let result = analyzer.analyze_creative("/banners/a.png").await.unwrap();

        assert_eq!(result.main_copy.as_deref(), Some("연 5% 특판 적금"));
        assert_eq!(result.sub_copy, None);
        assert_eq!(result.populated_count(), 13);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fenced_response_is_accepted() {
        let mut server = mockito::Server::new_async().await;
        let fenced = format!("```json\n{}\n```", FULL_RESPONSE);
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(openai_body(&fenced))
            .create_async()
            .await;

        let (_dir, analyzer) = setup(&format!("{}/v1/chat/completions", server.url()));
        let result = analyzer.analyze_creative("banners/a.png").await.unwrap();
        assert_eq!(result.eye_flow.as_deref(), Some("Z"));
    }

    #[tokio::test]
    async fn missing_key_is_schema_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(openai_body(r#"{"mainCopy": "카피"}"#))
            .create_async()
            .await;

        let (_dir, analyzer) = setup(&format!("{}/v1/chat/completions", server.url()));
        let err = analyzer.analyze_creative("banners/a.png").await.unwrap_err();
        match err {
            CoreError::SchemaValidation { message, raw_response } => {
                assert!(message.contains("designAnalysis"));
                assert!(raw_response.contains("카피"));
            }
            other => panic!("SchemaValidation 기대: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_image_skips_vendor_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let (_dir, analyzer) = setup(&format!("{}/v1/chat/completions", server.url()));
        let err = analyzer.analyze_creative("banners/none.png").await.unwrap_err();
        assert!(matches!(err, CoreError::ResourceNotFound(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn auth_failure_is_classified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let (_dir, analyzer) = setup(&format!("{}/v1/chat/completions", server.url()));
        let err = analyzer.analyze_creative("banners/a.png").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Vendor { kind: VendorErrorKind::Auth, .. }
        ));
    }
}
