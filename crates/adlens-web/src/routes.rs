//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성 (`/api` 아래에 중첩)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 상태
        .route("/health", get(handlers::health::health))
        .route("/categories", get(handlers::categories::get_categories))
        // 소재
        .route("/creatives", get(handlers::creatives::list_creatives))
        .route("/creatives/{id}", get(handlers::creatives::get_creative))
        // 이미지 분석
        .route("/analyze-images", post(handlers::analysis::analyze_images))
        .route(
            "/analyze-images/stream",
            get(handlers::stream::batch_stream),
        )
        // 인사이트 + 생성
        .route(
            "/ai-material-analysis",
            post(handlers::insight::analyze_materials),
        )
        .route(
            "/banner-copy-generation",
            post(handlers::generation::generate_copy),
        )
        .route(
            "/generate-ai-image",
            post(handlers::generation::generate_image),
        )
        // 데이터셋
        .route("/dataset/save", post(handlers::dataset::save_dataset))
}
