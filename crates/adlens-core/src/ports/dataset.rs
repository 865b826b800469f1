//! 소재 데이터셋 저장소 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::creative::CreativeRecord;

/// 순서가 있는 소재 목록의 로드/저장
///
/// 저장은 명시적 호출로만 일어난다.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// 전체 로드 (순서 보존)
    async fn load(&self) -> Result<Vec<CreativeRecord>, CoreError>;

    /// 전체 덮어쓰기
    async fn save(&self, records: &[CreativeRecord]) -> Result<(), CoreError>;

    /// 저장 위치 (표시용)
    fn location(&self) -> String;
}
