//! AI 소재 분석 서비스.
//!
//! 카테고리 내 상위 20% 소재 → 평균 지표 + 텍스트 모델 인사이트.

use std::sync::Arc;

use tracing::info;

use adlens_core::error::CoreError;
use adlens_core::models::category::CategoryFilter;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::models::insight::MaterialAnalysis;
use adlens_core::ports::insight_provider::InsightProvider;

use crate::metrics::compute_aggregate;
use crate::selection::{select_top_performers, TOP_20_PERCENT};

pub struct InsightService {
    provider: Arc<dyn InsightProvider>,
}

impl InsightService {
    pub fn new(provider: Arc<dyn InsightProvider>) -> Self {
        Self { provider }
    }

    /// 카테고리 분석. 해당 소재가 없으면 벤더 호출 없이 `EmptySelection`
    pub async fn analyze_category(
        &self,
        records: &[CreativeRecord],
        filter: &CategoryFilter,
    ) -> Result<MaterialAnalysis, CoreError> {
        let top_materials = select_top_performers(records, filter, TOP_20_PERCENT)?;
        let metrics = compute_aggregate(&top_materials);
        let ai_analysis = self.provider.analyze_materials(&top_materials).await?;

        info!(
            main_category = %filter.main_category,
            sub_category = %filter.sub_category,
            selected = top_materials.len(),
            provider = self.provider.provider_name(),
            "AI 소재 분석 완료"
        );

        Ok(MaterialAnalysis {
            metrics,
            top_materials,
            ai_analysis,
            filter: filter.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_core::models::insight::InsightAnalysis;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct RecordingProvider {
        received: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InsightProvider for RecordingProvider {
        async fn analyze_materials(
            &self,
            materials: &[CreativeRecord],
        ) -> Result<InsightAnalysis, CoreError> {
            *self.received.lock() = materials.iter().map(|m| m.creative_id.clone()).collect();
            Ok(InsightAnalysis {
                ai_total_analyze: "종합".into(),
                ..Default::default()
            })
        }

        fn provider_name(&self) -> &str {
            "recording"
        }
    }

    fn record(id: &str, category: &str, impressions: u64, clicks: u64) -> CreativeRecord {
        let mut r = CreativeRecord::new(id);
        r.category = category.into();
        r.impressions = impressions;
        r.clicks = clicks;
        r
    }

    #[tokio::test]
    async fn metrics_are_computed_over_selection_only() {
        let provider = Arc::new(RecordingProvider {
            received: Mutex::new(Vec::new()),
        });
        let service = InsightService::new(provider.clone());
        let records = vec![
            record("a", "금융", 1000, 10),
            record("b", "금융", 1000, 90),
            record("c", "금융", 1000, 20),
            record("d", "금융", 1000, 30),
            record("e", "금융", 1000, 40),
            record("f", "식음료", 1000, 999),
        ];

        let analysis = service
            .analyze_category(&records, &CategoryFilter::new("금융", ""))
            .await
            .unwrap();

        // 5건 → 지표별 1건. CTR 1위 b, CVR/ROAS는 모두 0 → 입력 첫 번째 a
        assert_eq!(*provider.received.lock(), vec!["a", "b"]);
        // (10 + 90) / 2000 = 5%
        assert_eq!(analysis.metrics.avg_ctr, "5%");
        assert_eq!(analysis.ai_analysis.ai_total_analyze, "종합");
    }

    #[tokio::test]
    async fn empty_category_does_not_call_provider() {
        let provider = Arc::new(RecordingProvider {
            received: Mutex::new(vec!["untouched".into()]),
        });
        let service = InsightService::new(provider.clone());

        let err = service
            .analyze_category(&[record("a", "금융", 1, 1)], &CategoryFilter::new("패션", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::EmptySelection { .. }));
        assert_eq!(*provider.received.lock(), vec!["untouched"]);
    }
}
