//! 콘텐츠 루트 이미지 에셋 저장소.
//!
//! `creativeContent` 경로(앞 `/` 허용)를 콘텐츠 루트 기준으로 해석한다.
//! 루트 밖을 가리키는 경로(`..`, 절대 경로 prefix)는 존재하지 않는 것으로 취급한다.

use async_trait::async_trait;
use base64::Engine;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use adlens_core::error::CoreError;
use adlens_core::models::generation::ImageAsset;
use adlens_core::ports::asset_store::AssetStore;

/// 벤더가 받는 이미지 MIME: 그 외는 jpeg로 보낸다
const SUPPORTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 확장자로 이미지 MIME 추정
pub fn image_mime_type(path: &Path) -> &'static str {
    let guessed = mime_guess::from_path(path).first();
    guessed
        .and_then(|mime| {
            SUPPORTED_MIME_TYPES
                .iter()
                .copied()
                .find(|supported| *supported == mime.essence_str())
        })
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// 로컬 파일 시스템 에셋 저장소
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    content_root: PathBuf,
    generated_dir: String,
}

impl LocalAssetStore {
    pub fn new(content_root: impl Into<PathBuf>, generated_dir: impl Into<String>) -> Self {
        Self {
            content_root: content_root.into(),
            generated_dir: generated_dir.into().trim_matches('/').to_string(),
        }
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// 콘텐츠 루트 기준 절대 경로. 루트 밖으로 나가는 경로는 `None`
    pub fn resolve(&self, image_ref: &str) -> Option<PathBuf> {
        let clean = image_ref.trim().trim_start_matches('/');
        if clean.is_empty() || clean.contains("://") {
            return None;
        }
        let relative = Path::new(clean);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return None;
        }
        Some(self.content_root.join(relative))
    }

    fn generated_root(&self) -> PathBuf {
        self.content_root.join(&self.generated_dir)
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn load_image(&self, image_ref: &str) -> Result<ImageAsset, CoreError> {
        let path = self
            .resolve(image_ref)
            .ok_or_else(|| CoreError::ResourceNotFound(image_ref.to_string()))?;

        let bytes = fs::read(&path).await.map_err(|e| {
            debug!("이미지 읽기 실패: {}: {}", path.display(), e);
            CoreError::ResourceNotFound(path.display().to_string())
        })?;
        if bytes.is_empty() {
            return Err(CoreError::ResourceNotFound(format!(
                "{} (빈 파일)",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(ImageAsset {
            file_name,
            mime_type: image_mime_type(&path).to_string(),
            bytes,
        })
    }

    async fn save_generated(
        &self,
        image_base64: &str,
        prefix: &str,
    ) -> Result<String, CoreError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(image_base64.trim())
            .map_err(|e| CoreError::Validation {
                field: "imageBase64".to_string(),
                message: format!("base64 디코딩 실패: {}", e),
            })?;

        let dir = self.generated_root();
        fs::create_dir_all(&dir).await?;

        let file_name = format!("{}-{}.png", prefix, uuid::Uuid::new_v4());
        let path = dir.join(&file_name);
        fs::write(&path, &bytes).await?;

        info!("생성 이미지 저장: {} ({} bytes)", path.display(), bytes.len());
        Ok(format!("/{}/{}", self.generated_dir, file_name))
    }
}
