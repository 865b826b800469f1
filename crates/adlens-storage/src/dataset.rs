//! 소재 데이터셋 JSON 파일 저장소.
//!
//! 파일은 `CreativeRecord` 배열. 로드 시 순서와 알 수 없는 필드를 보존하고,
//! 저장은 임시 파일에 쓴 뒤 rename 하여 중간에 깨진 파일이 남지 않게 한다.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use adlens_core::error::CoreError;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::ports::dataset::DatasetStore;

/// JSON 파일 기반 데이터셋 저장소
#[derive(Debug, Clone)]
pub struct JsonDatasetStore {
    path: PathBuf,
}

impl JsonDatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "dataset.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// 중복 creativeId 경고 (로드는 계속)
fn warn_duplicate_ids(records: &[CreativeRecord]) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.creative_id.as_str()) {
            warn!(creative_id = %record.creative_id, "데이터셋에 중복 creativeId 존재");
        }
    }
}

#[async_trait]
impl DatasetStore for JsonDatasetStore {
    async fn load(&self) -> Result<Vec<CreativeRecord>, CoreError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            CoreError::Config(format!(
                "데이터셋 파일 읽기 실패: {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let records: Vec<CreativeRecord> = serde_json::from_str(&content)?;
        warn_duplicate_ids(&records);

        info!(
            "데이터셋 로드 완료: {} ({}건)",
            self.path.display(),
            records.len()
        );
        Ok(records)
    }

    async fn save(&self, records: &[CreativeRecord]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(records)?;
        let tmp = self.temp_path();
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(
            "데이터셋 저장 완료: {} ({}건)",
            self.path.display(),
            records.len()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
