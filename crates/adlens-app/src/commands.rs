//! CLI 서브커맨드 실행.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use adlens_analytics::pipeline::ProgressFn;
use adlens_analytics::{BatchPipeline, BatchReport};
use adlens_core::config::{AppConfig, ApiKeyStatus};
use adlens_core::ports::dataset::DatasetStore;
use adlens_web::WebServer;

use crate::lifecycle::LifecycleManager;
use crate::wiring::Adapters;

// ============================================================
// serve
// ============================================================

/// API 서버 실행 (SIGINT/SIGTERM까지)
pub async fn serve(mut config: AppConfig, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.web.port = port;
    }

    let adapters = Adapters::from_config(&config);
    let records = adapters
        .dataset
        .load()
        .await
        .with_context(|| format!("데이터셋 로드 실패: {}", config.dataset.path.display()))?;

    let web_config = config.web.clone();
    let static_dir = config.dataset.content_root.clone();
    let state = adapters.into_state(records, config);
    let server = WebServer::new(state, web_config).with_static_dir(static_dir);
    info!("API 서버 URL: {}", server.url());

    let lifecycle = Arc::new(LifecycleManager::new());
    let shutdown_rx = lifecycle.subscribe();
    let signal_waiter = lifecycle.clone();
    tokio::spawn(async move { signal_waiter.wait_for_signal().await });

    server.run(shutdown_rx).await.context("API 서버 실행 실패")?;
    Ok(())
}

// ============================================================
// analyze
// ============================================================

/// 일괄 분석 옵션
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// 결과를 데이터셋 파일에 저장
    pub write: bool,
    pub concurrency: Option<usize>,
    pub delay_ms: Option<u64>,
}

/// 데이터셋의 미완성 소재를 일괄 분석.
///
/// Ctrl+C를 받으면 남은 항목은 건너뛰고 그때까지의 결과를 반환한다.
pub async fn analyze(mut config: AppConfig, options: AnalyzeOptions) -> Result<BatchReport> {
    if let Some(concurrency) = options.concurrency {
        config.batch.concurrency = concurrency;
    }
    if let Some(delay_ms) = options.delay_ms {
        config.batch.delay_ms = delay_ms;
    }

    let adapters = Adapters::from_config(&config);
    let analyzer = adapters.analyzer.clone().ok_or_else(|| {
        anyhow!("소재 분석 API 키가 설정되지 않았습니다. OPENAI_API_KEY를 설정해주세요.")
    })?;
    let records = adapters
        .dataset
        .load()
        .await
        .with_context(|| format!("데이터셋 로드 실패: {}", config.dataset.path.display()))?;

    let lifecycle = Arc::new(LifecycleManager::new());
    let cancel = lifecycle.subscribe();
    let signal_waiter = lifecycle.clone();
    let signal_task = tokio::spawn(async move { signal_waiter.wait_for_signal().await });

    let progress: ProgressFn<'_> = &|current: usize, total: usize, label: &str| {
        info!("[{}/{}] {}", current, total, label);
    };
    let report = BatchPipeline::new(analyzer, config.batch.clone())
        .run(records, Some(progress), Some(cancel))
        .await;
    signal_task.abort();

    if options.write && report.succeeded > 0 {
        adapters
            .dataset
            .save(&report.records)
            .await
            .context("데이터셋 저장 실패")?;
        info!("분석 결과 저장: {}", adapters.dataset.location());
    } else if options.write {
        warn!("성공한 분석이 없어 데이터셋을 저장하지 않습니다");
    }

    Ok(report)
}

/// 사람이 읽는 배치 요약
pub fn summarize(report: &BatchReport) -> String {
    if !report.had_targets() {
        return "분석이 필요한 항목이 없습니다.".to_string();
    }

    let mut lines = vec![format!(
        "{}개 항목 분석 완료 (성공 {}, 실패 {}, 건너뜀 {})",
        report.analyzed, report.succeeded, report.failed, report.skipped
    )];
    lines.extend(
        report
            .failures
            .iter()
            .map(|f| format!("  ✗ {}: {}", f.creative_id, f.message)),
    );
    lines.join("\n")
}

// ============================================================
// check
// ============================================================

/// 설정 경로와 API 키 상태
pub fn check_report(config_path: &Path, config: &AppConfig) -> String {
    let status = |s: ApiKeyStatus| match s {
        ApiKeyStatus::Configured => "configured",
        ApiKeyStatus::Placeholder => "placeholder (미설정으로 취급)",
        ApiKeyStatus::Missing => "missing",
    };
    let providers = &config.ai_provider;

    [
        format!("설정 파일: {}", config_path.display()),
        format!("데이터셋: {}", config.dataset.path.display()),
        format!("콘텐츠 루트: {}", config.dataset.content_root.display()),
        format!(
            "비전 API 키: {} ({})",
            status(providers.vision_api.key_status()),
            providers.vision_api.endpoint
        ),
        format!(
            "텍스트 API 키: {} ({})",
            status(providers.text_api.key_status()),
            providers.text_api.endpoint
        ),
        format!(
            "이미지 API 키: {} ({})",
            status(providers.image_api.key_status()),
            providers.image_api.endpoint
        ),
        format!("웹 포트: {}", config.web.port),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_analytics::pipeline::ItemFailure;

    #[test]
    fn summary_without_targets() {
        assert_eq!(summarize(&BatchReport::default()), "분석이 필요한 항목이 없습니다.");
    }

    #[test]
    fn summary_lists_failures() {
        let report = BatchReport {
            analyzed: 2,
            succeeded: 1,
            failed: 1,
            failures: vec![ItemFailure {
                creative_id: "c9".to_string(),
                message: "콘텐츠를 찾을 수 없음: /x.png".to_string(),
            }],
            ..Default::default()
        };
        let text = summarize(&report);
        assert!(text.starts_with("2개 항목 분석 완료"));
        assert!(text.contains("c9"));
    }

    #[test]
    fn check_report_hides_key_values() {
        let mut config = AppConfig::default_config();
        config.ai_provider.vision_api.api_key = "sk-secret".to_string();
        let text = check_report(Path::new("/tmp/config.json"), &config);
        assert!(text.contains("비전 API 키: configured"));
        assert!(text.contains("이미지 API 키: missing"));
        assert!(!text.contains("sk-secret"));
    }
}
