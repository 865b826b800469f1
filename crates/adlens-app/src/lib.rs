//! # adlens-app
//!
//! AdLens 바이너리 지원 모듈.
//! 어댑터 생성(DI), 라이프사이클, CLI 서브커맨드 실행.

pub mod commands;
pub mod lifecycle;
pub mod wiring;
