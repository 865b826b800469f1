//! 배너 카피 생성 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::generation::{BannerCopyTable, CopyGenerationRequest};

/// 인사이트 + 브랜드 입력으로 카피 유형별 배너 카피 생성
#[async_trait]
pub trait CopyGenerator: Send + Sync {
    /// 요청은 `validate()`를 통과한 상태여야 한다.
    async fn generate_copy(
        &self,
        request: &CopyGenerationRequest,
    ) -> Result<BannerCopyTable, CoreError>;

    fn provider_name(&self) -> &str;
}
