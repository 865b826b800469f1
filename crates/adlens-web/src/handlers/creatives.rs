//! 소재 목록/상세 조회 핸들러.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use adlens_analytics::metrics::compute_totals;
use adlens_analytics::selection::filter_by_category;
use adlens_core::error::CoreError;
use adlens_core::models::category::CategoryFilter;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::models::metrics::MetricTotals;

use super::PaginationMeta;
use crate::error::ApiError;
use crate::AppState;

/// 기본 페이지 크기
const DEFAULT_PER_PAGE: usize = 30;

/// 최대 페이지 크기
const MAX_PER_PAGE: usize = 500;

/// 목록 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct CreativeQuery {
    /// 페이지 (1부터, 기본: 1)
    pub page: Option<usize>,
    /// 페이지 크기 (기본: 30)
    pub per_page: Option<usize>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
}

impl CreativeQuery {
    fn filter(&self) -> CategoryFilter {
        CategoryFilter::new(
            self.main_category.clone().unwrap_or_default(),
            self.sub_category.clone().unwrap_or_default(),
        )
    }

    fn page_or_default(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    fn per_page_or_default(&self) -> usize {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }
}

/// 목록 응답. `totals`는 페이지가 아닌 필터 결과 전체 기준
#[derive(Debug, Serialize)]
pub struct CreativeListResponse {
    pub data: Vec<CreativeRecord>,
    pub pagination: PaginationMeta,
    pub totals: MetricTotals,
}

/// GET /api/creatives
pub async fn list_creatives(
    State(state): State<AppState>,
    query: Result<Query<CreativeQuery>, QueryRejection>,
) -> Result<Json<CreativeListResponse>, ApiError> {
    let Query(query) = query?;
    let filter = query.filter();

    let records = state.records.read().await;
    let filtered: Vec<CreativeRecord> = filter_by_category(&records, &filter)
        .into_iter()
        .cloned()
        .collect();
    drop(records);

    let totals = compute_totals(&filtered);
    let pagination = PaginationMeta::new(
        filtered.len(),
        query.page_or_default(),
        query.per_page_or_default(),
    );
    let data = filtered
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.per_page)
        .collect();

    Ok(Json(CreativeListResponse {
        data,
        pagination,
        totals,
    }))
}

/// GET /api/creatives/{id}
pub async fn get_creative(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CreativeRecord>, ApiError> {
    let records = state.records.read().await;
    records
        .iter()
        .find(|r| r.creative_id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            CoreError::NotFound {
                resource_type: "Creative".to_string(),
                id,
            }
            .into()
        })
}
