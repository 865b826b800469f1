//! 애플리케이션 설정 구조체.
//!
//! AI 벤더 엔드포인트, 웹 서버, 데이터셋 경로, 배치 파이프라인 설정을 정의한다.
//! [`crate::config_manager::ConfigManager`]가 JSON 파일에서 로드하고,
//! API 키는 환경변수로 덮어쓸 수 있다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 환경변수: 분석/카피 생성용 API 키
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// 환경변수: 이미지 생성용 API 키 (없으면 `OPENAI_API_KEY` 사용)
pub const ENV_IMAGE_API_KEY: &str = "OPENAI_IMAGE_API_KEY";

/// 예시 설정 파일에 들어 있는 자리표시 키: 미설정으로 취급
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// AI 제공자 설정 (비전/텍스트/이미지)
    #[serde(default)]
    pub ai_provider: AiProviderConfig,
    /// 웹 API 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 데이터셋/콘텐츠 경로 설정
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// 배치 분석 설정
    #[serde(default)]
    pub batch: BatchConfig,
}

// ============================================================
// AI 제공자 설정
// ============================================================

/// AI API 제공자 타입: 요청/응답 형식과 인증 헤더를 결정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderType {
    /// Anthropic Claude API: `x-api-key` 헤더 + `/v1/messages` 형식
    Anthropic,
    /// OpenAI 호환 API: `Authorization: Bearer` 헤더 + `/v1/chat/completions` 형식
    #[default]
    OpenAi,
}

/// 외부 AI API 엔드포인트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalApiEndpoint {
    /// API URL (예: "https://api.openai.com/v1/chat/completions")
    pub endpoint: String,
    /// API 키 (config.json 또는 환경변수)
    #[serde(default)]
    pub api_key: String,
    /// 모델 이름 (None이면 클라이언트 기본값)
    #[serde(default)]
    pub model: Option<String>,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
    /// AI 제공자 타입
    #[serde(default)]
    pub provider_type: AiProviderType,
}

/// API 키 상태: 헬스 체크 응답용
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyStatus {
    /// 키 없음
    Missing,
    /// 예시 자리표시 키 그대로
    Placeholder,
    /// 설정됨
    Configured,
}

impl ExternalApiEndpoint {
    fn openai(endpoint: &str, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: String::new(),
            model: None,
            timeout_secs,
            provider_type: AiProviderType::OpenAi,
        }
    }

    /// API 키 상태 판별
    pub fn key_status(&self) -> ApiKeyStatus {
        let key = self.api_key.trim();
        if key.is_empty() {
            ApiKeyStatus::Missing
        } else if key == PLACEHOLDER_API_KEY {
            ApiKeyStatus::Placeholder
        } else {
            ApiKeyStatus::Configured
        }
    }

    /// 실제 사용 가능한 키가 있는지
    pub fn has_usable_key(&self) -> bool {
        self.key_status() == ApiKeyStatus::Configured
    }
}

/// AI 제공자 설정 묶음
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiProviderConfig {
    /// 소재 이미지 분석 (비전)
    #[serde(default = "default_vision_api")]
    pub vision_api: ExternalApiEndpoint,
    /// 인사이트 분석 + 카피 생성 (텍스트)
    #[serde(default = "default_text_api")]
    pub text_api: ExternalApiEndpoint,
    /// 배너 이미지 생성/편집. endpoint는 `/generations`, `/edits`의 상위 경로
    #[serde(default = "default_image_api")]
    pub image_api: ExternalApiEndpoint,
}

impl Default for AiProviderConfig {
    fn default() -> Self {
        Self {
            vision_api: default_vision_api(),
            text_api: default_text_api(),
            image_api: default_image_api(),
        }
    }
}

// ============================================================
// 웹/데이터셋/배치 설정
// ============================================================

/// 웹 API 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 서버 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 포트 번호
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 (false면 127.0.0.1만)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_web_port(),
            allow_external: false,
        }
    }
}

/// 데이터셋/콘텐츠 경로 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// 소재 데이터셋 JSON 파일
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    /// 소재 이미지 콘텐츠 루트 (`creativeContent`는 이 경로 기준)
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,
    /// 생성 이미지 저장 디렉토리 (콘텐츠 루트 하위)
    #[serde(default = "default_generated_dir")]
    pub generated_dir: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            content_root: default_content_root(),
            generated_dir: default_generated_dir(),
        }
    }
}

/// 배치 분석 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// 항목 간 고정 지연 (밀리초)
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
    /// 동시 분석 수 (1이면 순차)
    #[serde(default = "default_batch_concurrency")]
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_batch_delay_ms(),
            concurrency: default_batch_concurrency(),
        }
    }
}

impl BatchConfig {
    /// 항목 간 지연을 Duration으로 반환
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// 0은 1로 보정한 동시 실행 수
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            ai_provider: AiProviderConfig::default(),
            web: WebConfig::default(),
            dataset: DatasetConfig::default(),
            batch: BatchConfig::default(),
        }
    }

    /// 프로세스 환경변수로 API 키 덮어쓰기
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// 주어진 조회 함수로 API 키 덮어쓰기.
    ///
    /// - `OPENAI_API_KEY` → 비전/텍스트 키
    /// - `OPENAI_IMAGE_API_KEY` → 이미지 키 (없으면 `OPENAI_API_KEY`)
    ///
    /// 빈 값은 무시한다.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let text_key = non_empty(ENV_API_KEY);
        if let Some(key) = &text_key {
            self.ai_provider.vision_api.api_key = key.clone();
            self.ai_provider.text_api.api_key = key.clone();
        }
        if let Some(key) = non_empty(ENV_IMAGE_API_KEY).or(text_key) {
            self.ai_provider.image_api.api_key = key;
        }
    }

    /// 생성 이미지 저장 절대 경로
    pub fn generated_dir_path(&self) -> PathBuf {
        self.dataset
            .content_root
            .join(self.dataset.generated_dir.trim_matches('/'))
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}
fn default_api_timeout_secs() -> u64 {
    60
}
fn default_vision_api() -> ExternalApiEndpoint {
    ExternalApiEndpoint::openai("https://api.openai.com/v1/chat/completions", 60)
}
fn default_text_api() -> ExternalApiEndpoint {
    ExternalApiEndpoint::openai("https://api.openai.com/v1/chat/completions", 120)
}
fn default_image_api() -> ExternalApiEndpoint {
    ExternalApiEndpoint::openai("https://api.openai.com/v1/images", 180)
}
fn default_web_port() -> u16 {
    9090
}
fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/creatives.json")
}
fn default_content_root() -> PathBuf {
    PathBuf::from("public")
}
fn default_generated_dir() -> String {
    "generated-banners".to_string()
}
fn default_batch_delay_ms() -> u64 {
    1_000
}
fn default_batch_concurrency() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_values() {
        let config = AppConfig::default_config();
        assert_eq!(config.web.port, 9090);
        assert!(!config.web.allow_external);
        assert_eq!(config.batch.delay_ms, 1000);
        assert_eq!(config.batch.concurrency, 1);
        assert_eq!(config.dataset.content_root, PathBuf::from("public"));
        assert_eq!(
            config.ai_provider.vision_api.provider_type,
            AiProviderType::OpenAi
        );
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.batch.delay(), Duration::from_secs(1));
        assert_eq!(config.ai_provider.image_api.timeout_secs, 180);
    }

    #[test]
    fn partial_endpoint_fills_defaults() {
        let json = r#"{"ai_provider":{"vision_api":{"endpoint":"http://localhost:1234","provider_type":"anthropic"}}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        let vision = &config.ai_provider.vision_api;
        assert_eq!(vision.endpoint, "http://localhost:1234");
        assert_eq!(vision.provider_type, AiProviderType::Anthropic);
        assert_eq!(vision.timeout_secs, 60);
        assert!(vision.model.is_none());
        // 나머지 엔드포인트는 기본값
        assert!(config.ai_provider.text_api.endpoint.contains("openai.com"));
    }

    #[test]
    fn key_status_detection() {
        let mut ep = default_vision_api();
        assert_eq!(ep.key_status(), ApiKeyStatus::Missing);
        ep.api_key = PLACEHOLDER_API_KEY.into();
        assert_eq!(ep.key_status(), ApiKeyStatus::Placeholder);
        assert!(!ep.has_usable_key());
        ep.api_key = "sk-test".into();
        assert_eq!(ep.key_status(), ApiKeyStatus::Configured);
    }

    #[test]
    fn env_overrides_image_key_falls_back() {
        let env: HashMap<&str, &str> = [(ENV_API_KEY, "sk-text")].into_iter().collect();
        let mut config = AppConfig::default_config();
        config.apply_env_overrides_from(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.ai_provider.vision_api.api_key, "sk-text");
        assert_eq!(config.ai_provider.text_api.api_key, "sk-text");
        assert_eq!(config.ai_provider.image_api.api_key, "sk-text");
    }

    #[test]
    fn env_overrides_dedicated_image_key() {
        let env: HashMap<&str, &str> = [(ENV_API_KEY, "sk-text"), (ENV_IMAGE_API_KEY, "sk-img")]
            .into_iter()
            .collect();
        let mut config = AppConfig::default_config();
        config.apply_env_overrides_from(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.ai_provider.image_api.api_key, "sk-img");
    }

    #[test]
    fn env_overrides_ignore_blank() {
        let mut config = AppConfig::default_config();
        config.ai_provider.text_api.api_key = "from-file".into();
        config.apply_env_overrides_from(|_| Some("  ".into()));
        assert_eq!(config.ai_provider.text_api.api_key, "from-file");
    }

    #[test]
    fn zero_concurrency_is_sequential() {
        let batch = BatchConfig {
            delay_ms: 0,
            concurrency: 0,
        };
        assert_eq!(batch.effective_concurrency(), 1);
    }

    #[test]
    fn generated_dir_under_content_root() {
        let config = AppConfig::default_config();
        assert_eq!(
            config.generated_dir_path(),
            PathBuf::from("public").join("generated-banners")
        );
    }
}
