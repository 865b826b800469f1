//! 라우터 테스트용 스텁 어댑터와 상태 빌더.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use adlens_core::config::AppConfig;
use adlens_core::error::CoreError;
use adlens_core::models::analysis::AnalysisResult;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::models::generation::{
    AbTestCopy, BannerCopy, BannerCopyTable, CopyGenerationRequest, GeneratedImage, ImageAsset,
    ImagePrompt,
};
use adlens_core::models::insight::InsightAnalysis;
use adlens_core::ports::copy_generator::CopyGenerator;
use adlens_core::ports::creative_analyzer::CreativeAnalyzer;
use adlens_core::ports::image_generator::ImageGenerator;
use adlens_core::ports::insight_provider::InsightProvider;
use adlens_core::taxonomy::CopyType;
use adlens_storage::assets::LocalAssetStore;
use adlens_storage::dataset::JsonDatasetStore;

use crate::routes::api_routes;
use crate::AppState;

/// 호출 수를 세는 분석기. `/slow` 경로는 `slow_delay`만큼 늦게 응답
#[derive(Default)]
pub struct StubAnalyzer {
    pub calls: AtomicUsize,
    pub slow_delay: Duration,
}

impl StubAnalyzer {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CreativeAnalyzer for StubAnalyzer {
    async fn analyze_creative(&self, image_ref: &str) -> Result<AnalysisResult, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if image_ref.starts_with("/slow") {
            tokio::time::sleep(self.slow_delay).await;
        }
        if image_ref.starts_with("/missing") {
            return Err(CoreError::ResourceNotFound(image_ref.to_string()));
        }
        Ok(AnalysisResult {
            main_copy: Some("첫 달 무료".into()),
            main_copy_type: Some("할인 · 혜택 강조형".into()),
            sub_copy: Some("지금 가입하세요".into()),
            cta_text: Some("가입하기".into()),
            cta_position: Some("bottomCenter".into()),
            visual_elements: Some("실사".into()),
            creative_color_tone: Some("비비드톤".into()),
            eye_flow: Some("Z".into()),
            design_analysis: Some("상단 카피 → 하단 CTA".into()),
            ..Default::default()
        })
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

pub struct StubInsight;

#[async_trait]
impl InsightProvider for StubInsight {
    async fn analyze_materials(
        &self,
        materials: &[CreativeRecord],
    ) -> Result<InsightAnalysis, CoreError> {
        Ok(InsightAnalysis {
            message_type_analyze: vec!["할인 · 혜택 강조형: 반응 우수 → 유지".into()],
            ai_total_analyze: format!("{}건 분석", materials.len()),
            ..Default::default()
        })
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

pub struct StubCopy;

#[async_trait]
impl CopyGenerator for StubCopy {
    async fn generate_copy(
        &self,
        request: &CopyGenerationRequest,
    ) -> Result<BannerCopyTable, CoreError> {
        Ok(BannerCopyTable {
            banner_copy_table: vec![BannerCopy {
                copy_type: CopyType::ALL[0],
                description: "설명".into(),
                banner_sample_copy: request.brand_message.clone(),
                performance_metric_examples: vec!["CTR 3.2%".into()],
                ab_test_copy_examples: AbTestCopy {
                    option_a: "A안".into(),
                    option_b: "B안".into(),
                },
                recommended_color_tone: vec!["파스텔톤".into()],
                recommended_cta_copy_examples: vec!["지금 받기".into()],
            }],
        })
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

pub struct StubImages;

#[async_trait]
impl ImageGenerator for StubImages {
    async fn generate_image(
        &self,
        prompt: &ImagePrompt,
        _references: &[ImageAsset],
    ) -> Result<GeneratedImage, CoreError> {
        Ok(GeneratedImage {
            variant: prompt.variant,
            image_base64: "aW1n".into(),
            revised_prompt: None,
            saved_path: None,
        })
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

/// 임시 디렉토리 기반 상태 (AI 어댑터 없음)
pub fn state_with(records: Vec<CreativeRecord>) -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let dataset = Arc::new(JsonDatasetStore::new(dir.path().join("creatives.json")));
    let assets = Arc::new(LocalAssetStore::new(dir.path(), "generated-banners"));
    let state = AppState::new(records, dataset, assets, AppConfig::default_config());
    (state, dir)
}

pub fn record(id: &str, category: &str, clicks: u64, complete: bool) -> CreativeRecord {
    let mut r = CreativeRecord::new(id);
    r.creative_name = format!("소재 {id}");
    r.category = category.to_string();
    r.sub_category = "은행".to_string();
    r.impressions = 1000;
    r.clicks = clicks;
    r.conversions = clicks / 10;
    r.ad_cost = 10_000.0;
    r.revenue = 30_000.0;
    r.creative_content = format!("/creatives/{id}.png");
    if complete {
        r.main_copy = "완료".into();
        r.main_copy_type = "할인 · 혜택 강조형".into();
        r.sub_copy = "서브".into();
        r.cta_text = "CTA".into();
        r.cta_position = "bottomCenter".into();
        r.visual_elements = "실사".into();
        r.creative_color_tone = "비비드톤".into();
        r.eye_flow = "Z".into();
        r.design_analysis = "분석".into();
    }
    r
}

pub fn app(state: AppState) -> Router {
    api_routes().with_state(state)
}

/// 요청 전송 후 (상태, JSON 본문) 반환
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
