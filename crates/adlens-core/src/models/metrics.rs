//! 집계 지표 모델.

use serde::{Deserialize, Serialize};

/// 소재 집합의 평균 지표. 각 값은 정수 백분율 문자열 (예: `"42%"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    #[serde(rename = "avgCTR")]
    pub avg_ctr: String,
    #[serde(rename = "avgCVR")]
    pub avg_cvr: String,
    #[serde(rename = "avgROAS")]
    pub avg_roas: String,
}

impl AggregateMetrics {
    /// 모든 값이 `"0%"`
    pub fn zero() -> Self {
        Self {
            avg_ctr: "0%".to_string(),
            avg_cvr: "0%".to_string(),
            avg_roas: "0%".to_string(),
        }
    }
}

/// 원시 합계 + 반올림 전 전체 비율 (목록 화면 합계 행)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTotals {
    pub count: usize,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub ad_cost: f64,
    pub revenue: f64,
    pub total_ctr: f64,
    pub total_cvr: f64,
    pub total_roas: f64,
}
