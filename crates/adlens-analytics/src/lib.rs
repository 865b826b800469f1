//! # adlens-analytics
//!
//! 포트(trait)만 의존하는 도메인 서비스 계층.
//!
//! - [`metrics`]: 성과 지표 집계
//! - [`selection`]: 카테고리 필터 + 상위 소재 선정
//! - [`pipeline`]: 미완성 소재 배치 분석
//! - [`insight`]: 상위 20% 소재 인사이트 분석
//! - [`banner`]: A/B 배너 이미지 생성

pub mod banner;
pub mod insight;
pub mod metrics;
pub mod pipeline;
pub mod selection;

pub use banner::BannerStudio;
pub use insight::InsightService;
pub use pipeline::{BatchPipeline, BatchReport};
pub use selection::{select_top_performers, SelectionMode};
