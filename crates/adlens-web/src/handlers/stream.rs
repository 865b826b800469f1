//! 배치 분석 진행 SSE 스트림.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde::Serialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::AppState;

/// 배치 진행 이벤트
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum BatchEvent {
    /// 일괄 분석 시작
    #[serde(rename = "started")]
    Started(BatchStarted),
    /// 항목 분석 시작
    #[serde(rename = "progress")]
    Progress(BatchProgress),
    /// 일괄 분석 종료
    #[serde(rename = "completed")]
    Completed(BatchCompleted),
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchStarted {
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchProgress {
    /// 1부터 시작하는 순번
    pub current: usize,
    pub total: usize,
    /// 소재명 (없으면 ID)
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchCompleted {
    pub analyzed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// SSE 스트림 엔드포인트
///
/// GET /api/analyze-images/stream
///
/// 구독 이후 발생한 배치 이벤트만 전달한다.
pub async fn batch_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_tx.subscribe();

    let sse_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => {
            let json = serde_json::to_string(&event).ok()?;
            Some(Ok(Event::default().event(event_type_name(&event)).data(json)))
        }
        Err(_) => None, // 수신 지연(lagged) 시 스킵
    });

    Sse::new(sse_stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn event_type_name(event: &BatchEvent) -> &'static str {
    match event {
        BatchEvent::Started(_) => "started",
        BatchEvent::Progress(_) => "progress",
        BatchEvent::Completed(_) => "completed",
    }
}
