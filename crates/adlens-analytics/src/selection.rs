//! 카테고리 필터 + 상위 소재 선정.
//!
//! CTR·CVR·ROAS 각각의 순위에서 상위 N개를 뽑아 합집합을 만든다.
//! 정렬은 안정 정렬이므로 동점이면 입력 순서가 앞선 소재가 먼저 뽑힌다.

use std::collections::HashSet;

use tracing::debug;

use adlens_core::error::CoreError;
use adlens_core::models::category::CategoryFilter;
use adlens_core::models::creative::CreativeRecord;

/// 지표별 선정 방식
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionMode {
    /// 지표별 상위 `ceil(n × 비율)`개
    Percentile(f64),
    /// 지표별 고정 개수, 합집합은 `cap`개로 자름
    FixedCount {
        ctr: usize,
        cvr: usize,
        roas: usize,
        cap: usize,
    },
}

/// 인사이트 분석용 상위 20%
pub const TOP_20_PERCENT: SelectionMode = SelectionMode::Percentile(0.2);

/// 이미지 생성 참조용 (CTR 2 + CVR 1 + ROAS 1, 최대 4)
pub const REFERENCE_SET: SelectionMode = SelectionMode::FixedCount {
    ctr: 2,
    cvr: 1,
    roas: 1,
    cap: 4,
};

impl SelectionMode {
    /// (CTR, CVR, ROAS) 지표별 선정 개수
    fn counts(&self, n: usize) -> (usize, usize, usize) {
        match *self {
            Self::Percentile(fraction) => {
                let k = (n as f64 * fraction.clamp(0.0, 1.0)).ceil() as usize;
                (k, k, k)
            }
            Self::FixedCount { ctr, cvr, roas, .. } => (ctr, cvr, roas),
        }
    }

    fn cap(&self) -> Option<usize> {
        match *self {
            Self::Percentile(_) => None,
            Self::FixedCount { cap, .. } => Some(cap),
        }
    }
}

/// 필터에 맞는 레코드 (입력 순서 유지)
pub fn filter_by_category<'a>(
    records: &'a [CreativeRecord],
    filter: &CategoryFilter,
) -> Vec<&'a CreativeRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// 지표 내림차순 상위 `k`개의 ID
fn top_ids<'a>(
    records: &[&'a CreativeRecord],
    k: usize,
    metric: fn(&CreativeRecord) -> f64,
) -> Vec<&'a str> {
    let mut ranked: Vec<&CreativeRecord> = records.to_vec();
    ranked.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
    ranked
        .into_iter()
        .take(k)
        .map(|r| r.creative_id.as_str())
        .collect()
}

/// 상위 소재 선정.
///
/// 결과는 필터링된 입력 순서를 따르며 `creativeId` 기준으로 중복이 없다.
/// 필터 결과가 비면 `CoreError::EmptySelection`.
pub fn select_top_performers(
    records: &[CreativeRecord],
    filter: &CategoryFilter,
    mode: SelectionMode,
) -> Result<Vec<CreativeRecord>, CoreError> {
    let filtered = filter_by_category(records, filter);
    if filtered.is_empty() {
        return Err(CoreError::EmptySelection {
            main_category: filter.main_category.clone(),
            sub_category: filter.sub_category.clone(),
        });
    }

    let (ctr_k, cvr_k, roas_k) = mode.counts(filtered.len());
    let chosen: HashSet<&str> = top_ids(&filtered, ctr_k, CreativeRecord::ctr)
        .into_iter()
        .chain(top_ids(&filtered, cvr_k, CreativeRecord::cvr))
        .chain(top_ids(&filtered, roas_k, CreativeRecord::roas))
        .collect();

    let mut emitted: HashSet<&str> = HashSet::with_capacity(chosen.len());
    let mut selected: Vec<CreativeRecord> = Vec::with_capacity(chosen.len());
    for record in filtered.iter().copied() {
        let id = record.creative_id.as_str();
        if chosen.contains(id) && emitted.insert(id) {
            selected.push(record.clone());
        }
    }

    if let Some(cap) = mode.cap() {
        selected.truncate(cap);
    }

    debug!(
        filtered = filtered.len(),
        selected = selected.len(),
        mode = ?mode,
        "상위 소재 선정"
    );
    Ok(selected)
}
