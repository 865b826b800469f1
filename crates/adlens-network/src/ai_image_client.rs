//! 배너 이미지 생성 클라이언트 (OpenAI Images API).
//!
//! - 참조 이미지 없음: `POST {endpoint}/generations` (JSON)
//! - 참조 이미지 있음: `POST {endpoint}/edits` (multipart, `image[]` 최대 4장)
//!
//! 응답은 항상 base64(`b64_json`)로 받는다.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use tracing::{debug, info};

use adlens_core::config::{AiProviderType, ExternalApiEndpoint};
use adlens_core::error::CoreError;
use adlens_core::models::generation::{GeneratedImage, ImageAsset, ImagePrompt};
use adlens_core::ports::image_generator::ImageGenerator;

use crate::error_mapping::{transport_error, vendor_error};

const DEFAULT_MODEL: &str = "gpt-image-1";

/// 편집 요청에 첨부할 수 있는 최대 참조 이미지 수
pub const MAX_REFERENCE_IMAGES: usize = 4;

const OPERATION: &str = "이미지 생성";

/// OpenAI 이미지 생성 클라이언트
#[derive(Debug, Clone)]
pub struct RemoteImageGenerator {
    http_client: reqwest::Client,
    /// `/generations`, `/edits`를 붙일 기본 URL
    endpoint: String,
    api_key: String,
    model: String,
}

impl RemoteImageGenerator {
    pub fn new(config: &ExternalApiEndpoint) -> Result<Self, CoreError> {
        if config.provider_type != AiProviderType::OpenAi {
            return Err(CoreError::Config(
                "이미지 생성은 OpenAI 호환 엔드포인트만 지원합니다".into(),
            ));
        }
        if !config.has_usable_key() {
            return Err(CoreError::Config(
                "이미지 생성 API 키 미설정. config.json 또는 OPENAI_IMAGE_API_KEY 환경변수를 확인하세요."
                    .into(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        let model = config
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        debug!(
            endpoint = %config.endpoint,
            model = %model,
            timeout = config.timeout_secs,
            "이미지 생성 클라이언트 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model,
        })
    }

    fn url(&self, action: &str) -> String {
        format!("{}/{}", self.endpoint, action)
    }

    fn edit_form(&self, prompt: &ImagePrompt, references: &[ImageAsset]) -> Result<Form, CoreError> {
        let mut form = Form::new()
            .text("model", self.model.clone())
            .text("prompt", prompt.prompt.clone())
            .text("size", prompt.size.as_str());

        for asset in references.iter().take(MAX_REFERENCE_IMAGES) {
            let part = Part::bytes(asset.bytes.clone())
                .file_name(asset.file_name.clone())
                .mime_str(&asset.mime_type)
                .map_err(|e| CoreError::Validation {
                    field: "image".to_string(),
                    message: format!("잘못된 MIME 타입 {}: {}", asset.mime_type, e),
                })?;
            form = form.part("image[]", part);
        }
        Ok(form)
    }
}

/// 응답의 `data[0]`에서 이미지 추출
pub fn parse_image_response(
    body: &str,
    prompt: &ImagePrompt,
) -> Result<GeneratedImage, CoreError> {
    let response: Value = serde_json::from_str(body)
        .map_err(|e| CoreError::schema(format!("이미지 응답 JSON 파싱 실패: {}", e), body))?;
    let first = response
        .get("data")
        .and_then(|d| d.as_array())
        .and_then(|arr| arr.first())
        .ok_or_else(|| CoreError::schema("이미지 생성 응답에 데이터가 없습니다", body))?;

    let image_base64 = first
        .get("b64_json")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::schema("이미지 생성 응답에 base64 데이터가 없습니다", body))?;

    Ok(GeneratedImage {
        variant: prompt.variant,
        image_base64: image_base64.to_string(),
        revised_prompt: first
            .get("revised_prompt")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        saved_path: None,
    })
}

#[async_trait]
impl ImageGenerator for RemoteImageGenerator {
    async fn generate_image(
        &self,
        prompt: &ImagePrompt,
        references: &[ImageAsset],
    ) -> Result<GeneratedImage, CoreError> {
        let request = if references.is_empty() {
            let body = json!({
                "model": self.model,
                "prompt": prompt.prompt,
                "size": prompt.size.as_str(),
                "n": 1,
            });
            self.http_client.post(self.url("generations")).json(&body)
        } else {
            self.http_client
                .post(self.url("edits"))
                .multipart(self.edit_form(prompt, references)?)
        };

        debug!(
            variant = prompt.variant.as_str(),
            size = prompt.size.as_str(),
            references = references.len().min(MAX_REFERENCE_IMAGES),
            prompt_chars = prompt.prompt.chars().count(),
            "이미지 생성 API 호출"
        );

        let response = request
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| transport_error(OPERATION, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(OPERATION, e))?;

        if !status.is_success() {
            return Err(vendor_error(OPERATION, status.as_u16(), &text));
        }

        let image = parse_image_response(&text, prompt)?;
        info!(
            variant = prompt.variant.as_str(),
            base64_len = image.image_base64.len(),
            "이미지 생성 완료"
        );
        Ok(image)
    }

    fn provider_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_core::error::VendorErrorKind;
    use adlens_core::models::generation::ImageVariant;
    use adlens_core::taxonomy::ImageSize;
    use mockito::Matcher;

    fn config(url: &str) -> ExternalApiEndpoint {
        ExternalApiEndpoint {
            endpoint: format!("{url}/v1/images/"),
            api_key: "sk-image".into(),
            model: None,
            timeout_secs: 5,
            provider_type: AiProviderType::OpenAi,
        }
    }

    fn prompt(variant: ImageVariant) -> ImagePrompt {
        ImagePrompt {
            variant,
            prompt: "###지시사항\n배너 생성".into(),
            size: ImageSize::Portrait,
        }
    }

    fn asset(name: &str) -> ImageAsset {
        ImageAsset {
            file_name: name.into(),
            mime_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn anthropic_provider_is_rejected() {
        let mut cfg = config("http://localhost");
        cfg.provider_type = AiProviderType::Anthropic;
        assert!(matches!(
            RemoteImageGenerator::new(&cfg),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn empty_b64_is_schema_error() {
        let err = parse_image_response(r#"{"data":[{"b64_json":""}]}"#, &prompt(ImageVariant::A))
            .unwrap_err();
        assert!(matches!(err, CoreError::SchemaValidation { .. }));
        assert!(parse_image_response(r#"{"data":[]}"#, &prompt(ImageVariant::A)).is_err());
    }

    #[tokio::test]
    async fn no_references_uses_generations_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/images/generations")
            .match_header("authorization", "Bearer sk-image")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-image-1",
                "size": "1024x1536"
            })))
            .with_status(200)
            .with_body(r#"{"data":[{"b64_json":"aW1n","revised_prompt":"banner"}]}"#)
            .create_async()
            .await;

        let generator = RemoteImageGenerator::new(&config(&server.url())).unwrap();
        let image = generator
            .generate_image(&prompt(ImageVariant::B), &[])
            .await
            .unwrap();
        assert_eq!(image.variant, ImageVariant::B);
        assert_eq!(image.image_base64, "aW1n");
        assert_eq!(image.revised_prompt.as_deref(), Some("banner"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn references_use_multipart_edits_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/images/edits")
            .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
            .match_body(Matcher::Regex("image\\[\\]".into()))
            .with_status(200)
            .with_body(r#"{"data":[{"b64_json":"ZWRpdA=="}]}"#)
            .create_async()
            .await;

        let generator = RemoteImageGenerator::new(&config(&server.url())).unwrap();
        let refs: Vec<ImageAsset> = (0..6).map(|i| asset(&format!("ref{i}.png"))).collect();
        let image = generator
            .generate_image(&prompt(ImageVariant::A), &refs)
            .await
            .unwrap();
        assert_eq!(image.image_base64, "ZWRpdA==");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn quota_error_is_classified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/images/generations")
            .with_status(429)
            .with_body(r#"{"error":{"message":"You exceeded your current quota"}}"#)
            .create_async()
            .await;

        let generator = RemoteImageGenerator::new(&config(&server.url())).unwrap();
        let err = generator
            .generate_image(&prompt(ImageVariant::A), &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Vendor { kind: VendorErrorKind::QuotaExceeded, .. }
        ));
    }
}
