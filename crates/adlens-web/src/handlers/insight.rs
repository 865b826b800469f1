//! AI 소재 분석 (카테고리 인사이트) 핸들러.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use adlens_analytics::InsightService;
use adlens_core::models::category::CategoryFilter;
use adlens_core::models::insight::MaterialAnalysis;

use super::{require, DataResponse};
use crate::error::ApiError;
use crate::AppState;

/// POST /api/ai-material-analysis
///
/// 본문: `{selectedMainCategory, selectedSubCategory}`. 해당 소재가 없으면 404.
pub async fn analyze_materials(
    State(state): State<AppState>,
    payload: Result<Json<CategoryFilter>, JsonRejection>,
) -> Result<Json<DataResponse<MaterialAnalysis>>, ApiError> {
    let Json(filter) = payload?;
    let provider = require(&state.insight_provider, "소재 인사이트")?;

    let records = state.records.read().await.clone();
    let analysis = InsightService::new(provider)
        .analyze_category(&records, &filter)
        .await?;

    Ok(Json(DataResponse::ok(analysis)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::test_support::{app, post_json, record, send, state_with, StubInsight};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn returns_metrics_and_ai_analysis() {
        let (state, _dir) = state_with(vec![
            record("b1", "금융", 40, true),
            record("b2", "금융", 20, true),
            record("t1", "통신", 90, true),
        ]);
        let state = state.with_insight_provider(Arc::new(StubInsight));

        let (status, body) = send(
            app(state),
            post_json(
                "/ai-material-analysis",
                json!({"selectedMainCategory": "금융", "selectedSubCategory": ""}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let ids: Vec<&str> = body["data"]["topMaterials"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["creativeId"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["b1"]);
        assert_eq!(body["data"]["avgCTR"], "4%");
        assert_eq!(body["data"]["aiAnalysis"]["aiTotalAnalyze"], "1건 분석");
    }

    #[tokio::test]
    async fn empty_category_is_404() {
        let (state, _dir) = state_with(vec![record("b1", "금융", 40, true)]);
        let state = state.with_insight_provider(Arc::new(StubInsight));

        let (status, body) = send(
            app(state),
            post_json("/ai-material-analysis", json!({"selectedMainCategory": "자동차"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "선택한 카테고리에 해당하는 소재가 없습니다.");
    }
}
