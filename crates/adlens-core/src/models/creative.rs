//! 소재(크리에이티브) 레코드.
//!
//! 데이터셋의 한 행. 성과 지표 + 디자인 속성을 담는다.
//! 모르는 필드는 `extra`에 보존되어 load → save 왕복 시 손실되지 않는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::analysis::AnalysisResult;

/// 문자열 하나 또는 문자열 목록 (매체/타깃/연령 필드)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl Default for StringOrList {
    fn default() -> Self {
        Self::One(String::new())
    }
}

impl StringOrList {
    /// 목록 형태로 반환 (빈 문자열은 제외)
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::One(s) if s.trim().is_empty() => Vec::new(),
            Self::One(s) => vec![s.clone()],
            Self::Many(items) => items.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_list().is_empty()
    }
}

impl fmt::Display for StringOrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(s) => f.write_str(s),
            Self::Many(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// 값이 비어 있거나 벤더 미확인 표기("-")인지
pub fn is_unset(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == "-"
}

/// 분모가 0이면 0을 돌려주는 백분율
fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// 소재 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeRecord {
    // --- 식별/분류 ---
    pub creative_id: String,
    #[serde(default)]
    pub creative_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub campaign_period: String,
    #[serde(default)]
    pub ad_platform: StringOrList,
    #[serde(default)]
    pub ad_target: StringOrList,
    #[serde(default)]
    pub target_age: StringOrList,

    // --- 성과 ---
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
    #[serde(default)]
    pub ad_cost: f64,
    #[serde(default)]
    pub revenue: f64,
    /// 데이터셋에 기록된 CTR(%). 없으면 원시 지표로 계산
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roas: Option<f64>,

    /// 소재 이미지 경로 (콘텐츠 루트 기준, 앞 `/` 허용)
    #[serde(default)]
    pub creative_content: String,

    // --- 디자인 속성 ---
    #[serde(default)]
    pub main_copy: String,
    #[serde(default)]
    pub main_copy_type: String,
    #[serde(default)]
    pub main_copy_ratio: String,
    #[serde(default)]
    pub sub_copy: String,
    #[serde(default)]
    pub sub_copy_ratio: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub cta_position: String,
    #[serde(default)]
    pub cta_ratio: String,
    #[serde(default)]
    pub model_ratio: String,
    #[serde(default)]
    pub product_ratio: String,
    #[serde(default)]
    pub visual_elements: String,
    #[serde(default)]
    pub creative_color_tone: String,
    #[serde(default)]
    pub eye_flow: String,
    #[serde(default)]
    pub design_analysis: String,

    /// 마지막 분석 병합 시각. 분석 결과가 비어 있어도 "분석됨"을 구분하는 용도
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<DateTime<Utc>>,

    /// 알 수 없는 필드 (왕복 보존)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreativeRecord {
    /// 식별자만 채운 빈 레코드
    pub fn new(creative_id: impl Into<String>) -> Self {
        Self {
            creative_id: creative_id.into(),
            creative_name: String::new(),
            category: String::new(),
            sub_category: String::new(),
            brand_name: String::new(),
            campaign_name: String::new(),
            campaign_period: String::new(),
            ad_platform: StringOrList::default(),
            ad_target: StringOrList::default(),
            target_age: StringOrList::default(),
            impressions: 0,
            clicks: 0,
            conversions: 0,
            ad_cost: 0.0,
            revenue: 0.0,
            ctr: None,
            cvr: None,
            roas: None,
            creative_content: String::new(),
            main_copy: String::new(),
            main_copy_type: String::new(),
            main_copy_ratio: String::new(),
            sub_copy: String::new(),
            sub_copy_ratio: String::new(),
            cta_text: String::new(),
            cta_position: String::new(),
            cta_ratio: String::new(),
            model_ratio: String::new(),
            product_ratio: String::new(),
            visual_elements: String::new(),
            creative_color_tone: String::new(),
            eye_flow: String::new(),
            design_analysis: String::new(),
            analyzed_at: None,
            extra: serde_json::Map::new(),
        }
    }

    /// CTR(%): 기록값 우선, 없으면 clicks / impressions
    pub fn ctr(&self) -> f64 {
        self.ctr
            .unwrap_or_else(|| percent(self.clicks as f64, self.impressions as f64))
    }

    /// CVR(%): 기록값 우선, 없으면 conversions / clicks
    pub fn cvr(&self) -> f64 {
        self.cvr
            .unwrap_or_else(|| percent(self.conversions as f64, self.clicks as f64))
    }

    /// ROAS(%): 기록값 우선, 없으면 revenue / adCost
    pub fn roas(&self) -> f64 {
        self.roas.unwrap_or_else(|| percent(self.revenue, self.ad_cost))
    }

    /// 진행 표시용 이름 (소재명 없으면 ID)
    pub fn label(&self) -> &str {
        if self.creative_name.trim().is_empty() {
            &self.creative_id
        } else {
            &self.creative_name
        }
    }

    /// 완성 여부: 핵심 디자인 속성 9개가 모두 채워져 있는지
    ///
    /// 미완성 레코드가 배치 분석 대상이 된다.
    pub fn is_complete(&self) -> bool {
        [
            &self.main_copy,
            &self.main_copy_type,
            &self.sub_copy,
            &self.cta_text,
            &self.cta_position,
            &self.visual_elements,
            &self.creative_color_tone,
            &self.eye_flow,
            &self.design_analysis,
        ]
        .iter()
        .all(|value| !is_unset(value))
    }

    /// 분석 결과를 병합한 새 레코드.
    ///
    /// 14개 디자인 속성을 모두 덮어쓰며, 값이 없는(`None`) 속성은 빈 문자열이 된다.
    /// 원본은 변경하지 않는다.
    pub fn merged_with(&self, analysis: &AnalysisResult, analyzed_at: DateTime<Utc>) -> Self {
        let take = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            main_copy: take(&analysis.main_copy),
            main_copy_type: take(&analysis.main_copy_type),
            main_copy_ratio: take(&analysis.main_copy_ratio),
            sub_copy: take(&analysis.sub_copy),
            sub_copy_ratio: take(&analysis.sub_copy_ratio),
            cta_text: take(&analysis.cta_text),
            cta_position: take(&analysis.cta_position),
            cta_ratio: take(&analysis.cta_ratio),
            model_ratio: take(&analysis.model_ratio),
            product_ratio: take(&analysis.product_ratio),
            visual_elements: take(&analysis.visual_elements),
            creative_color_tone: take(&analysis.creative_color_tone),
            eye_flow: take(&analysis.eye_flow),
            design_analysis: take(&analysis.design_analysis),
            analyzed_at: Some(analyzed_at),
            ..self.clone()
        }
    }
}
