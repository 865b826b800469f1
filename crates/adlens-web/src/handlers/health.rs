//! 헬스 체크 핸들러.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use adlens_core::config::ApiKeyStatus;

use crate::AppState;

/// 서버/설정 상태
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// 분석/카피용 키 상태
    pub api_key: ApiKeyStatus,
    /// 이미지 생성용 키 상태
    pub image_api_key: ApiKeyStatus,
    /// 메모리에 로드된 레코드 수
    pub records: usize,
    /// 데이터셋 저장 위치
    pub dataset: String,
    /// 일괄 분석 실행 중 여부
    pub batch_running: bool,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let providers = &state.config.ai_provider;
    Json(HealthResponse {
        status: "healthy",
        api_key: providers.vision_api.key_status(),
        image_api_key: providers.image_api.key_status(),
        records: state.records.read().await.len(),
        dataset: state.dataset.location(),
        batch_running: state
            .batch_running
            .load(std::sync::atomic::Ordering::SeqCst),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, get, record, send, state_with};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn health_reports_key_status_and_records() {
        let (state, _dir) = state_with(vec![record("c1", "금융", 10, false)]);
        let (status, body) = send(app(state), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["apiKey"], "missing");
        assert_eq!(body["imageApiKey"], "missing");
        assert_eq!(body["records"], 1);
        assert_eq!(body["batchRunning"], false);
    }
}
