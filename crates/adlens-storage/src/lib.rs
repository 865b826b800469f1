//! # adlens-storage
//!
//! 파일 시스템 어댑터.
//! - [`dataset::JsonDatasetStore`]: 소재 데이터셋 JSON 로드/저장 (`DatasetStore` 구현)
//! - [`assets::LocalAssetStore`]: 콘텐츠 루트 이미지 로드, 생성 이미지 저장 (`AssetStore` 구현)

pub mod assets;
pub mod dataset;
