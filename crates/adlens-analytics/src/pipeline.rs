//! 배치 분석 파이프라인.
//!
//! 미완성 소재만 분석 대상으로 삼고, 결과를 원래 순서대로 다시 조립한다.
//! 항목 하나의 실패는 배치 전체를 멈추지 않는다.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use adlens_core::config::BatchConfig;
use adlens_core::error::CoreError;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::ports::creative_analyzer::CreativeAnalyzer;

/// 진행 콜백 `(현재 순번(1부터), 전체, 소재명)`
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize, &str) + Send + Sync);

/// 실패 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    pub creative_id: String,
    pub message: String,
}

/// 배치 실행 결과
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// 입력과 같은 길이/순서의 전체 레코드
    pub records: Vec<CreativeRecord>,
    /// 분석 시도 수 (성공 + 실패)
    pub analyzed: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// 취소로 건너뛴 수
    pub skipped: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    /// 분석 대상이 하나라도 있었는지
    pub fn had_targets(&self) -> bool {
        self.analyzed + self.skipped > 0
    }
}

/// 항목별 처리 결과
enum ItemOutcome {
    Merged(Box<CreativeRecord>),
    Failed(CoreError),
    Skipped,
}

/// 배치 분석기
pub struct BatchPipeline {
    analyzer: Arc<dyn CreativeAnalyzer>,
    config: BatchConfig,
}

impl BatchPipeline {
    pub fn new(analyzer: Arc<dyn CreativeAnalyzer>, config: BatchConfig) -> Self {
        Self { analyzer, config }
    }

    /// 분석 대상(미완성) 레코드 인덱스
    pub fn targets(records: &[CreativeRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_complete())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// 배치 실행.
    ///
    /// - 완성 레코드는 그대로 통과
    /// - 실패 항목은 원본 유지 + `failures`에 기록
    /// - `cancel`이 `true`가 되면 남은 항목은 `skipped`
    pub async fn run(
        &self,
        records: Vec<CreativeRecord>,
        progress: Option<ProgressFn<'_>>,
        cancel: Option<watch::Receiver<bool>>,
    ) -> BatchReport {
        let targets = Self::targets(&records);
        let total = targets.len();
        if total == 0 {
            debug!("배치 분석 대상 없음");
            return BatchReport {
                records,
                ..Default::default()
            };
        }

        let concurrency = self.config.effective_concurrency();
        let delay = self.config.delay();
        info!(total, concurrency, delay_ms = self.config.delay_ms, "배치 분석 시작");

        let outcomes: Vec<(usize, ItemOutcome)> = {
            let records = &records;
            stream::iter(targets.into_iter().enumerate())
                .map(|(position, idx)| {
                    let cancel = cancel.clone();
                    async move {
                        if cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
                            return (idx, ItemOutcome::Skipped);
                        }

                        let record = &records[idx];
                        notify_progress(progress, position + 1, total, record.label());

                        let outcome = match self
                            .analyzer
                            .analyze_creative(&record.creative_content)
                            .await
                        {
                            Ok(analysis) => {
                                ItemOutcome::Merged(Box::new(record.merged_with(&analysis, Utc::now())))
                            }
                            Err(e) => ItemOutcome::Failed(e),
                        };

                        if position + 1 < total && !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        (idx, outcome)
                    }
                })
                .buffered(concurrency)
                .collect()
                .await
        };

        let mut report = BatchReport {
            records,
            ..Default::default()
        };
        for (idx, outcome) in outcomes {
            match outcome {
                ItemOutcome::Merged(merged) => {
                    report.records[idx] = *merged;
                    report.succeeded += 1;
                }
                ItemOutcome::Failed(e) => {
                    let creative_id = report.records[idx].creative_id.clone();
                    warn!(creative_id = %creative_id, "소재 분석 실패: {}", e);
                    report.failures.push(ItemFailure {
                        creative_id,
                        message: e.user_message(),
                    });
                    report.failed += 1;
                }
                ItemOutcome::Skipped => report.skipped += 1,
            }
        }
        report.analyzed = report.succeeded + report.failed;

        info!(
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            "배치 분석 완료"
        );
        report
    }

    /// 소재 하나를 ID로 찾아 분석 후 병합된 레코드 반환
    pub async fn analyze_single(
        &self,
        records: &[CreativeRecord],
        creative_id: &str,
    ) -> Result<CreativeRecord, CoreError> {
        let record = records
            .iter()
            .find(|r| r.creative_id == creative_id)
            .ok_or_else(|| CoreError::NotFound {
                resource_type: "Creative".to_string(),
                id: creative_id.to_string(),
            })?;

        let analysis = self.analyzer.analyze_creative(&record.creative_content).await?;
        info!(creative_id, provider = self.analyzer.provider_name(), "단일 소재 분석 완료");
        Ok(record.merged_with(&analysis, Utc::now()))
    }
}

/// 진행 콜백 호출. 콜백 패닉은 로그만 남긴다
fn notify_progress(progress: Option<ProgressFn<'_>>, current: usize, total: usize, label: &str) {
    debug!("분석 중 {}/{}: {}", current, total, label);
    if let Some(callback) = progress {
        if catch_unwind(AssertUnwindSafe(|| callback(current, total, label))).is_err() {
            warn!(current, total, "진행 콜백 패닉, 무시하고 계속");
        }
    }
}
