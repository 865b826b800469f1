//! 소재 이미지 분석 핸들러 (단건 / 일괄).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use adlens_analytics::pipeline::{BatchPipeline, ItemFailure, ProgressFn};
use adlens_core::error::CoreError;
use adlens_core::models::creative::CreativeRecord;

use super::require;
use super::stream::{BatchCompleted, BatchEvent, BatchProgress, BatchStarted};
use crate::error::ApiError;
use crate::AppState;

/// 분석 요청
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// `"single"` 또는 `"batch"`
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub creative_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalysisResponse {
    pub success: bool,
    pub message: String,
    pub analyzed_count: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub failures: Vec<ItemFailure>,
    /// 병합된 전체 레코드
    pub data: Vec<CreativeRecord>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Single {
        success: bool,
        data: Box<CreativeRecord>,
    },
    Batch(BatchAnalysisResponse),
}

/// 일괄 분석 실행 표시. 해제는 drop 시점
struct BatchGuard(Arc<AtomicBool>);

impl BatchGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for BatchGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// POST /api/analyze-images
pub async fn analyze_images(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;

    match request.action.as_str() {
        "single" => {
            let creative_id = request
                .creative_id
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| CoreError::Validation {
                    field: "creativeId".to_string(),
                    message: "필수 입력값입니다".to_string(),
                })?;
            analyze_single(&state, &creative_id).await
        }
        "batch" => analyze_batch(&state).await,
        _ => Err(ApiError::BadRequest("유효하지 않은 액션입니다.".to_string())),
    }
}

async fn analyze_single(state: &AppState, creative_id: &str) -> Result<Json<AnalyzeResponse>, ApiError> {
    let analyzer = require(&state.analyzer, "소재 분석")?;
    let pipeline = BatchPipeline::new(analyzer, state.config.batch.clone());

    let snapshot = state.records.read().await.clone();
    let updated = pipeline.analyze_single(&snapshot, creative_id).await?;

    let mut records = state.records.write().await;
    if let Some(slot) = records.iter_mut().find(|r| r.creative_id == creative_id) {
        *slot = updated.clone();
    }

    Ok(Json(AnalyzeResponse::Single {
        success: true,
        data: Box::new(updated),
    }))
}

async fn analyze_batch(state: &AppState) -> Result<Json<AnalyzeResponse>, ApiError> {
    let analyzer = require(&state.analyzer, "소재 분석")?;
    let _guard = BatchGuard::acquire(&state.batch_running)
        .ok_or_else(|| CoreError::Conflict("일괄 분석이 이미 실행 중입니다.".to_string()))?;

    let snapshot = state.records.read().await.clone();
    let total = BatchPipeline::targets(&snapshot).len();
    if total == 0 {
        return Ok(Json(AnalyzeResponse::Batch(BatchAnalysisResponse {
            success: true,
            message: "분석이 필요한 항목이 없습니다.".to_string(),
            analyzed_count: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            failures: Vec::new(),
            data: snapshot,
        })));
    }

    info!(total, "일괄 분석 시작");
    // 구독자가 없으면 send가 실패하지만 무시한다
    let _ = state.event_tx.send(BatchEvent::Started(BatchStarted { total }));

    let event_tx = state.event_tx.clone();
    let progress: ProgressFn<'_> = &move |current: usize, total: usize, label: &str| {
        let _ = event_tx.send(BatchEvent::Progress(BatchProgress {
            current,
            total,
            label: label.to_string(),
        }));
    };

    let pipeline = BatchPipeline::new(analyzer, state.config.batch.clone());
    let report = pipeline
        .run(snapshot.clone(), Some(progress), state.shutdown_rx.clone())
        .await;

    // 배치가 바꾼 레코드만 creativeId 기준으로 현재 작업 세트에 반영
    let data = {
        let mut records = state.records.write().await;
        let changed = snapshot
            .iter()
            .zip(&report.records)
            .filter(|(before, after)| before != after)
            .map(|(_, after)| after);
        for updated in changed {
            if let Some(slot) = records
                .iter_mut()
                .find(|r| r.creative_id == updated.creative_id)
            {
                *slot = updated.clone();
            }
        }
        records.clone()
    };

    let _ = state.event_tx.send(BatchEvent::Completed(BatchCompleted {
        analyzed: report.analyzed,
        succeeded: report.succeeded,
        failed: report.failed,
        skipped: report.skipped,
    }));

    Ok(Json(AnalyzeResponse::Batch(BatchAnalysisResponse {
        success: true,
        message: format!("{}개 항목 분석 완료", report.analyzed),
        analyzed_count: report.analyzed,
        succeeded: report.succeeded,
        failed: report.failed,
        skipped: report.skipped,
        failures: report.failures,
        data,
    })))
}
