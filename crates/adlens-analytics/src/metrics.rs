//! 성과 지표 집계.
//!
//! 레코드별 비율의 평균이 아니라 원시 합계로 비율을 다시 계산한다.
//! 금액 합계는 정렬 후 더해 입력 순서와 무관하게 같은 값을 낸다.

use adlens_core::models::creative::CreativeRecord;
use adlens_core::models::metrics::{AggregateMetrics, MetricTotals};

/// 정렬 후 합산 (부동소수 합의 순서 의존 제거)
fn ordered_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// 원시 합계 + 전체 CTR/CVR/ROAS (반올림 없음)
pub fn compute_totals(records: &[CreativeRecord]) -> MetricTotals {
    let impressions: u64 = records.iter().map(|r| r.impressions).sum();
    let clicks: u64 = records.iter().map(|r| r.clicks).sum();
    let conversions: u64 = records.iter().map(|r| r.conversions).sum();
    let ad_cost = ordered_sum(records.iter().map(|r| r.ad_cost).collect());
    let revenue = ordered_sum(records.iter().map(|r| r.revenue).collect());

    let total_ctr = if impressions > 0 && clicks > 0 {
        ratio_percent(clicks as f64, impressions as f64)
    } else {
        0.0
    };

    MetricTotals {
        count: records.len(),
        impressions,
        clicks,
        conversions,
        ad_cost,
        revenue,
        total_ctr,
        total_cvr: ratio_percent(conversions as f64, clicks as f64),
        total_roas: ratio_percent(revenue, ad_cost),
    }
}

/// 평균 CTR/CVR/ROAS를 `"<정수>%"`로. 빈 입력은 모두 `"0%"`
pub fn compute_aggregate(records: &[CreativeRecord]) -> AggregateMetrics {
    if records.is_empty() {
        return AggregateMetrics::zero();
    }
    let totals = compute_totals(records);
    AggregateMetrics {
        avg_ctr: format_percent(totals.total_ctr),
        avg_cvr: format_percent(totals.total_cvr),
        avg_roas: format_percent(totals.total_roas),
    }
}
