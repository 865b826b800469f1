//! 소재 이미지 분석 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::analysis::AnalysisResult;

/// 소재 이미지 한 장을 분석해 디자인 속성을 추출
///
/// 구현체: `RemoteCreativeAnalyzer` (OpenAI/Claude 비전)
#[async_trait]
pub trait CreativeAnalyzer: Send + Sync {
    /// `image_ref`는 콘텐츠 루트 기준 경로.
    ///
    /// 이미지를 찾지 못하면 벤더 호출 없이 `CoreError::ResourceNotFound`.
    /// 재시도하지 않는다.
    async fn analyze_creative(&self, image_ref: &str) -> Result<AnalysisResult, CoreError>;

    /// 제공자 이름 (로그용)
    fn provider_name(&self) -> &str;
}
