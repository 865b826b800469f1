//! # adlens-core
//!
//! AdLens 도메인 모델, 포트 인터페이스, 에러 타입, 설정.
//! 모든 어댑터 crate가 이 crate에 의존하며, 이 crate는 다른 내부 crate에 의존하지 않는다.
//!
//! ## 모듈 구성
//! - [`models`]: 소재 레코드, 분석 결과, 인사이트, 생성 요청/응답
//! - [`ports`]: 어댑터가 구현하는 async trait
//! - [`taxonomy`]: 카테고리 맵, 카피 유형/CTA 위치 등 고정 분류 체계
//! - [`config`] / [`config_manager`]: JSON 설정과 런타임 관리
//! - [`error`]: [`error::CoreError`]

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
pub mod taxonomy;
