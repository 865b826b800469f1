//! # adlens-network
//!
//! 외부 AI 벤더 HTTP 어댑터.
//!
//! | 모듈 | 포트 | 용도 |
//! |------|------|------|
//! | [`ai_vision_client`] | `CreativeAnalyzer` | 소재 이미지 → 14개 디자인 속성 |
//! | [`ai_insight_client`] | `InsightProvider` | 상위 소재 묶음 → 인사이트 |
//! | [`ai_copy_client`] | `CopyGenerator` | 인사이트 + 브랜드 → 카피 테이블 |
//! | [`ai_image_client`] | `ImageGenerator` | 프롬프트 (+ 참조 이미지) → 배너 이미지 |
//!
//! 텍스트 계열 클라이언트는 [`chat::ChatClient`]를 공유하며, 제공자 타입(OpenAI/Anthropic)에 따라
//! 요청 형식과 인증 헤더가 갈린다. 응답 JSON은 [`response`]에서 코드펜스 제거 + 필수 키 검증을 거친다.

pub mod ai_copy_client;
pub mod ai_image_client;
pub mod ai_insight_client;
pub mod ai_vision_client;
pub mod chat;
pub mod error_mapping;
pub mod prompts;
pub mod response;

pub use ai_copy_client::RemoteCopyGenerator;
pub use ai_image_client::RemoteImageGenerator;
pub use ai_insight_client::RemoteInsightProvider;
pub use ai_vision_client::RemoteCreativeAnalyzer;
