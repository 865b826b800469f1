//! API 핸들러 모듈.

pub mod analysis;
pub mod categories;
pub mod creatives;
pub mod dataset;
pub mod generation;
pub mod health;
pub mod insight;
pub mod stream;

use std::sync::Arc;

use serde::Serialize;

use adlens_core::error::CoreError;

use crate::error::ApiError;

/// 페이지네이션 메타데이터
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// 전체 항목 수
    pub total: usize,
    /// 현재 페이지 (1부터)
    pub page: usize,
    /// 페이지 크기
    pub per_page: usize,
    /// 전체 페이지 수
    pub total_pages: usize,
    /// 다음 페이지 존재 여부
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: usize, page: usize, per_page: usize) -> Self {
        let total_pages = total.div_ceil(per_page.max(1));
        Self {
            total,
            page,
            per_page,
            total_pages,
            has_more: page < total_pages,
        }
    }

    /// 현재 페이지의 시작 오프셋
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1)).saturating_mul(self.per_page)
    }
}

/// `{success: true, data}` 응답
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 주입되지 않은 AI 어댑터 → 503
pub(crate) fn require<T: ?Sized>(adapter: &Option<Arc<T>>, purpose: &str) -> Result<Arc<T>, ApiError> {
    adapter.clone().ok_or_else(|| {
        ApiError::from(CoreError::Config(format!(
            "{purpose} API 키가 설정되지 않았습니다. OPENAI_API_KEY를 설정해주세요."
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_pages() {
        let meta = PaginationMeta::new(61, 1, 30);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_more);
        assert_eq!(meta.offset(), 0);

        let last = PaginationMeta::new(61, 3, 30);
        assert!(!last.has_more);
        assert_eq!(last.offset(), 60);
    }

    #[test]
    fn pagination_empty() {
        let meta = PaginationMeta::new(0, 1, 30);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_more);
    }

    #[test]
    fn missing_adapter_is_service_unavailable() {
        let none: Option<Arc<str>> = None;
        let err = require(&none, "분석").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
