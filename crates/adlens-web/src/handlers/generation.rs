//! 배너 카피/이미지 생성 핸들러.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use adlens_analytics::BannerStudio;
use adlens_core::models::generation::{
    BannerCopyTable, BannerGenerationOutcome, CopyGenerationRequest, ImageGenerationRequest,
};

use super::{require, DataResponse};
use crate::error::ApiError;
use crate::AppState;

/// POST /api/banner-copy-generation
///
/// 필수 입력 검증이 키 확인보다 먼저다 (누락 필드는 항상 400).
pub async fn generate_copy(
    State(state): State<AppState>,
    payload: Result<Json<CopyGenerationRequest>, JsonRejection>,
) -> Result<Json<DataResponse<BannerCopyTable>>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let generator = require(&state.copy_generator, "카피 생성")?;

    let table = generator.generate_copy(&request).await?;
    info!(
        rows = table.banner_copy_table.len(),
        provider = generator.provider_name(),
        "배너 카피 생성 완료"
    );

    Ok(Json(DataResponse::ok(table)))
}

/// POST /api/generate-ai-image
pub async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<ImageGenerationRequest>, JsonRejection>,
) -> Result<Json<DataResponse<BannerGenerationOutcome>>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let generator = require(&state.image_generator, "이미지 생성")?;

    let records = state.records.read().await.clone();
    let outcome = BannerStudio::new(generator, state.assets.clone())
        .generate(&records, &request)
        .await?;

    Ok(Json(DataResponse::ok(outcome)))
}
