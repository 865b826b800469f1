//! # adlens-web
//!
//! 마케팅 운영 API 서버.
//! Axum 기반 REST API + 배치 진행 SSE.
//!
//! ## 기능
//! - 소재 목록/상세 조회 (카테고리 필터, 합계)
//! - 소재 이미지 단건/일괄 분석
//! - 카테고리별 AI 소재 인사이트
//! - 배너 카피/이미지 생성
//! - 데이터셋 저장
//! - 콘텐츠 루트 정적 파일 서빙 (소재/생성 이미지)

pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use adlens_core::config::{AppConfig, WebConfig};
use adlens_core::models::creative::CreativeRecord;
use adlens_core::ports::asset_store::AssetStore;
use adlens_core::ports::copy_generator::CopyGenerator;
use adlens_core::ports::creative_analyzer::CreativeAnalyzer;
use adlens_core::ports::dataset::DatasetStore;
use adlens_core::ports::image_generator::ImageGenerator;
use adlens_core::ports::insight_provider::InsightProvider;

pub use handlers::stream::BatchEvent;

/// 배치 진행 이벤트 브로드캐스트 채널 용량
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
///
/// AI 어댑터는 API 키가 없으면 `None`이며, 해당 엔드포인트는 503을 반환한다.
#[derive(Clone)]
pub struct AppState {
    /// 작업 중인 소재 레코드 (메모리)
    pub records: Arc<RwLock<Vec<CreativeRecord>>>,
    /// 데이터셋 저장소
    pub dataset: Arc<dyn DatasetStore>,
    /// 소재/생성 이미지 저장소
    pub assets: Arc<dyn AssetStore>,
    /// 유효 설정 스냅샷 (환경변수 반영)
    pub config: Arc<AppConfig>,
    /// 소재 이미지 분석기
    pub analyzer: Option<Arc<dyn CreativeAnalyzer>>,
    /// 인사이트 분석기
    pub insight_provider: Option<Arc<dyn InsightProvider>>,
    /// 배너 카피 생성기
    pub copy_generator: Option<Arc<dyn CopyGenerator>>,
    /// 배너 이미지 생성기
    pub image_generator: Option<Arc<dyn ImageGenerator>>,
    /// 배치 진행 이벤트 송신 채널
    pub event_tx: broadcast::Sender<BatchEvent>,
    /// 일괄 분석 실행 중 여부
    pub batch_running: Arc<AtomicBool>,
    /// 서버 종료 신호 (진행 중 배치 취소용)
    pub shutdown_rx: Option<watch::Receiver<bool>>,
}

impl AppState {
    /// 새 상태 생성. AI 어댑터는 `with_*`로 주입한다.
    pub fn new(
        records: Vec<CreativeRecord>,
        dataset: Arc<dyn DatasetStore>,
        assets: Arc<dyn AssetStore>,
        config: AppConfig,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            records: Arc::new(RwLock::new(records)),
            dataset,
            assets,
            config: Arc::new(config),
            analyzer: None,
            insight_provider: None,
            copy_generator: None,
            image_generator: None,
            event_tx,
            batch_running: Arc::new(AtomicBool::new(false)),
            shutdown_rx: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn CreativeAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_insight_provider(mut self, provider: Arc<dyn InsightProvider>) -> Self {
        self.insight_provider = Some(provider);
        self
    }

    pub fn with_copy_generator(mut self, generator: Arc<dyn CopyGenerator>) -> Self {
        self.copy_generator = Some(generator);
        self
    }

    pub fn with_image_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.image_generator = Some(generator);
        self
    }
}

/// 마케팅 운영 API 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
    static_dir: Option<PathBuf>,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(state: AppState, config: WebConfig) -> Self {
        Self {
            config,
            state,
            static_dir: None,
        }
    }

    /// 정적 파일 디렉토리 설정 (콘텐츠 루트)
    ///
    /// `/creatives/...`, `/generated-banners/...` 같은 이미지 경로를 그대로 서빙한다.
    pub fn with_static_dir(mut self, dir: PathBuf) -> Self {
        self.static_dir = Some(dir);
        self
    }

    /// 라우터 구성 (CORS + 요청 트레이싱)
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let mut router = Router::new().nest("/api", routes::api_routes());
        if let Some(dir) = &self.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        router
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 기본 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도합니다.
    /// 최대 10개 포트를 시도한 후 실패하면 에러를 반환합니다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널. 진행 중인 일괄 분석도 이 신호로 취소된다.
    pub async fn run(
        mut self,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        self.state.shutdown_rx = Some(shutdown_rx.clone());
        let app = self.router();

        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);

            // 포트 오버플로우 체크
            if port < base_port && attempt > 0 {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{}: {}", host, port, e);
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    info!("API 서버 시작: http://{}", addr);

                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("API 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("API 서버 종료");
                    return Ok(());
                }
                Err(e) => {
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::state_with;

    #[test]
    fn web_server_url() {
        let (state, _dir) = state_with(Vec::new());
        let server = WebServer::new(state, WebConfig::default());
        assert_eq!(server.url(), "http://localhost:9090");
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn max_port_attempts_is_reasonable() {
        assert!(MAX_PORT_ATTEMPTS >= 1);
        assert!(MAX_PORT_ATTEMPTS <= 100);
    }

    #[test]
    fn port_overflow_protection() {
        let base_port: u16 = 65530;
        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);
            assert!(port >= base_port || port == u16::MAX);
        }
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let (state, _dir) = state_with(Vec::new());
        let config = WebConfig {
            port: 0,
            ..WebConfig::default()
        };
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(WebServer::new(state, config).run(rx));

        tx.send(true).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("종료 시간 초과")
            .unwrap();
        assert!(result.is_ok());
    }
}
