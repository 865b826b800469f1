//! 이미지 에셋 저장소 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::generation::ImageAsset;

/// 콘텐츠 루트 기준 이미지 읽기 + 생성 이미지 저장
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// 이미지 로드. 경로를 해석할 수 없거나 읽을 수 없으면 `CoreError::ResourceNotFound`
    async fn load_image(&self, image_ref: &str) -> Result<ImageAsset, CoreError>;

    /// base64 이미지를 저장하고 웹 경로를 반환
    async fn save_generated(&self, image_base64: &str, prefix: &str)
        -> Result<String, CoreError>;
}
