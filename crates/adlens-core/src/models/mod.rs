//! AdLens 도메인 모델.
//!
//! 데이터셋 JSON과 웹 API가 공유하는 구조체. 모든 필드는 camelCase로 직렬화된다.

pub mod analysis;
pub mod category;
pub mod creative;
pub mod generation;
pub mod insight;
pub mod metrics;
