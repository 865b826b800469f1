//! 설정 → 어댑터 생성 (DI).
//!
//! AI 어댑터는 API 키가 없으면 만들지 않는다. 웹 서버는 해당 기능만 503으로 응답하고
//! 나머지 기능(조회, 저장)은 정상 동작한다.

use std::sync::Arc;

use tracing::{info, warn};

use adlens_core::config::AppConfig;
use adlens_core::error::CoreError;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::ports::copy_generator::CopyGenerator;
use adlens_core::ports::creative_analyzer::CreativeAnalyzer;
use adlens_core::ports::image_generator::ImageGenerator;
use adlens_core::ports::insight_provider::InsightProvider;
use adlens_network::{
    RemoteCopyGenerator, RemoteCreativeAnalyzer, RemoteImageGenerator, RemoteInsightProvider,
};
use adlens_storage::assets::LocalAssetStore;
use adlens_storage::dataset::JsonDatasetStore;
use adlens_web::AppState;

/// 설정에서 만든 어댑터 묶음
pub struct Adapters {
    pub dataset: Arc<JsonDatasetStore>,
    pub assets: Arc<LocalAssetStore>,
    pub analyzer: Option<Arc<dyn CreativeAnalyzer>>,
    pub insight_provider: Option<Arc<dyn InsightProvider>>,
    pub copy_generator: Option<Arc<dyn CopyGenerator>>,
    pub image_generator: Option<Arc<dyn ImageGenerator>>,
}

impl Adapters {
    /// 유효 설정(환경변수 반영 후)으로 어댑터 생성
    pub fn from_config(config: &AppConfig) -> Self {
        let dataset = Arc::new(JsonDatasetStore::new(config.dataset.path.clone()));
        let assets = Arc::new(LocalAssetStore::new(
            config.dataset.content_root.clone(),
            config.dataset.generated_dir.clone(),
        ));
        let providers = &config.ai_provider;

        let analyzer = enabled(
            "소재 분석",
            RemoteCreativeAnalyzer::new(&providers.vision_api, assets.clone()),
        )
        .map(|a| a as Arc<dyn CreativeAnalyzer>);
        let insight_provider = enabled(
            "소재 인사이트",
            RemoteInsightProvider::new(&providers.text_api),
        )
        .map(|p| p as Arc<dyn InsightProvider>);
        let copy_generator = enabled("카피 생성", RemoteCopyGenerator::new(&providers.text_api))
            .map(|g| g as Arc<dyn CopyGenerator>);
        let image_generator = enabled(
            "이미지 생성",
            RemoteImageGenerator::new(&providers.image_api),
        )
        .map(|g| g as Arc<dyn ImageGenerator>);

        Self {
            dataset,
            assets,
            analyzer,
            insight_provider,
            copy_generator,
            image_generator,
        }
    }

    /// 웹 서버 상태 구성
    pub fn into_state(self, records: Vec<CreativeRecord>, config: AppConfig) -> AppState {
        let mut state = AppState::new(records, self.dataset, self.assets, config);
        state.analyzer = self.analyzer;
        state.insight_provider = self.insight_provider;
        state.copy_generator = self.copy_generator;
        state.image_generator = self.image_generator;
        state
    }
}

fn enabled<T>(purpose: &str, built: Result<T, CoreError>) -> Option<Arc<T>> {
    match built {
        Ok(adapter) => {
            info!("{} 어댑터 활성화", purpose);
            Some(Arc::new(adapter))
        }
        Err(e) => {
            warn!("{} 비활성화: {}", purpose, e);
            None
        }
    }
}
