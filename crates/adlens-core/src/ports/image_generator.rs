//! 배너 이미지 생성 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::generation::{GeneratedImage, ImageAsset, ImagePrompt};

/// 프롬프트(+ 참조 이미지 최대 4장)로 이미지 생성
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// 참조 이미지가 있으면 편집(edit), 없으면 생성(generate) 요청
    async fn generate_image(
        &self,
        prompt: &ImagePrompt,
        references: &[ImageAsset],
    ) -> Result<GeneratedImage, CoreError>;

    fn provider_name(&self) -> &str;
}
