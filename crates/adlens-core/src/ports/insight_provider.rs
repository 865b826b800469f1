//! 상위 소재 인사이트 분석 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::creative::CreativeRecord;
use crate::models::insight::InsightAnalysis;

/// 상위 소재 묶음을 텍스트 LLM으로 분석
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn analyze_materials(
        &self,
        materials: &[CreativeRecord],
    ) -> Result<InsightAnalysis, CoreError>;

    fn provider_name(&self) -> &str;
}
