//! 데이터셋 저장 핸들러.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub saved_count: usize,
    pub path: String,
}

/// POST /api/dataset/save
///
/// 메모리의 작업 레코드(분석 결과 포함)를 데이터셋 파일에 덮어쓴다.
pub async fn save_dataset(State(state): State<AppState>) -> Result<Json<SaveResponse>, ApiError> {
    let records = state.records.read().await.clone();
    state.dataset.save(&records).await?;

    let path = state.dataset.location();
    info!(count = records.len(), path = %path, "데이터셋 저장 완료");

    Ok(Json(SaveResponse {
        success: true,
        saved_count: records.len(),
        path,
    }))
}
