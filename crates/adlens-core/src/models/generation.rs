//! 배너 카피/이미지 생성 모델.

use serde::{Deserialize, Serialize};

use super::category::CategoryFilter;
use super::creative::StringOrList;
use super::insight::InsightAnalysis;
use crate::error::CoreError;
use crate::taxonomy::{CopyType, ImageSize};

/// 카피 항목 필수 키
pub const BANNER_COPY_KEYS: [&str; 7] = [
    "copyType",
    "description",
    "bannerSampleCopy",
    "performanceMetricExamples",
    "abTestCopyExamples",
    "recommendedColorTone",
    "recommendedCtaCopyExamples",
];

fn required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation {
            field: field.to_string(),
            message: "필수 입력값입니다".to_string(),
        });
    }
    Ok(())
}

// ============================================================
// 카피 생성
// ============================================================

/// 카피 생성 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyGenerationRequest {
    #[serde(default)]
    pub analysis_result: Option<InsightAnalysis>,
    #[serde(default)]
    pub brand_message: String,
    #[serde(default)]
    pub brand_event: String,
}

impl CopyGenerationRequest {
    /// 필수값 검증 후 분석 결과 반환
    pub fn validate(&self) -> Result<&InsightAnalysis, CoreError> {
        let analysis = self
            .analysis_result
            .as_ref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| CoreError::Validation {
                field: "analysisResult".to_string(),
                message: "필수 입력값입니다".to_string(),
            })?;
        required("brandMessage", &self.brand_message)?;
        required("brandEvent", &self.brand_event)?;
        Ok(analysis)
    }
}

/// A/B 테스트용 서브 카피
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTestCopy {
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
}

/// 카피 유형별 생성 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerCopy {
    pub copy_type: CopyType,
    pub description: String,
    pub banner_sample_copy: String,
    pub performance_metric_examples: Vec<String>,
    pub ab_test_copy_examples: AbTestCopy,
    pub recommended_color_tone: Vec<String>,
    pub recommended_cta_copy_examples: Vec<String>,
}

/// 카피 생성 결과 테이블
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerCopyTable {
    pub banner_copy_table: Vec<BannerCopy>,
}

impl BannerCopyTable {
    pub fn get(&self, copy_type: CopyType) -> Option<&BannerCopy> {
        self.banner_copy_table
            .iter()
            .find(|c| c.copy_type == copy_type)
    }

    /// 응답에 빠진 카피 유형
    pub fn missing_types(&self) -> Vec<CopyType> {
        CopyType::ALL
            .iter()
            .copied()
            .filter(|t| self.get(*t).is_none())
            .collect()
    }
}

// ============================================================
// 이미지 생성
// ============================================================

/// 이미지 생성 요청 (웹 API 입력)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationRequest {
    #[serde(default)]
    pub message_type_analyze: StringOrList,
    #[serde(default)]
    pub cta_analyze: StringOrList,
    #[serde(default)]
    pub design_analyze: StringOrList,
    #[serde(default)]
    pub copy_type: String,
    #[serde(default)]
    pub banner_sample_copy: String,
    #[serde(default)]
    pub ab_test_copy_examples: AbTestCopy,
    #[serde(default)]
    pub recommended_color_tone: StringOrList,
    #[serde(default)]
    pub recommended_cta_copy_examples: StringOrList,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub selected_main_category: String,
    #[serde(default)]
    pub selected_sub_category: String,
    /// 생성 이미지를 콘텐츠 루트에 저장할지
    #[serde(default)]
    pub save: bool,
}

impl ImageGenerationRequest {
    /// 필수값 검증 후 이미지 크기 반환
    pub fn validate(&self) -> Result<ImageSize, CoreError> {
        required("messageTypeAnalyze", &self.message_type_analyze.to_string())?;
        required("ctaAnalyze", &self.cta_analyze.to_string())?;
        required("designAnalyze", &self.design_analyze.to_string())?;
        required("copyType", &self.copy_type)?;
        required("bannerSampleCopy", &self.banner_sample_copy)?;
        required("size", &self.size)?;
        ImageSize::parse(&self.size).ok_or_else(|| CoreError::Validation {
            field: "size".to_string(),
            message: format!(
                "지원하지 않는 크기: {} (1024x1024, 1024x1536, 1536x1024)",
                self.size
            ),
        })
    }

    /// 참조 소재 선택용 필터
    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::new(&self.selected_main_category, &self.selected_sub_category)
    }

    /// 표시용 카피 유형: 키면 한글 라벨로 변환
    pub fn copy_type_label(&self) -> String {
        CopyType::parse(&self.copy_type)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| self.copy_type.trim().to_string())
    }
}

/// A/B 변형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageVariant {
    A,
    B,
}

impl ImageVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

/// 벤더에 보낼 이미지 프롬프트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    pub variant: ImageVariant,
    pub prompt: String,
    pub size: ImageSize,
}

/// 로드된 이미지 파일 (분석 대상 또는 참조 이미지)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// 파일 이름 (multipart 업로드용)
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 생성된 이미지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub variant: ImageVariant,
    pub image_base64: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
    /// 저장된 경우 웹 경로 (예: `/generated-banners/<uuid>.png`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_path: Option<String>,
}

/// A/B 생성 결과. B 실패는 치명적이지 않다
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerGenerationOutcome {
    pub variant_a: GeneratedImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_b: Option<GeneratedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_b_error: Option<String>,
    pub reference_ids: Vec<String>,
    pub reference_count: usize,
}
