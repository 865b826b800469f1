//! 소재 이미지 분석 결과.
//!
//! 벤더는 14개 키를 모두 채우고 모르는 값은 `"-"`로 보낸다.
//! 경계에서 `"-"`를 `None`으로 바꾸므로 도메인 코드는 센티널 문자열을 보지 않는다.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{ColorTone, CtaPosition, EyeFlow, MainCopyType, VisualElements};

/// 분석 응답 필수 키 (순서는 프롬프트 출력 형태와 동일)
pub const ANALYSIS_KEYS: [&str; 14] = [
    "mainCopy",
    "mainCopyType",
    "mainCopyRatio",
    "subCopy",
    "subCopyRatio",
    "ctaText",
    "ctaPosition",
    "ctaRatio",
    "modelRatio",
    "productRatio",
    "visualElements",
    "creativeColorTone",
    "eyeFlow",
    "designAnalysis",
];

/// 검증된 분석 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub main_copy: Option<String>,
    pub main_copy_type: Option<String>,
    pub main_copy_ratio: Option<String>,
    pub sub_copy: Option<String>,
    pub sub_copy_ratio: Option<String>,
    pub cta_text: Option<String>,
    pub cta_position: Option<String>,
    pub cta_ratio: Option<String>,
    pub model_ratio: Option<String>,
    pub product_ratio: Option<String>,
    pub visual_elements: Option<String>,
    pub creative_color_tone: Option<String>,
    pub eye_flow: Option<String>,
    pub design_analysis: Option<String>,
}

/// 면적 비중 (%) 묶음
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRatios {
    pub main_copy: Option<f64>,
    pub sub_copy: Option<f64>,
    pub cta: Option<f64>,
    pub model: Option<f64>,
    pub product: Option<f64>,
}

/// `"35%"`, `"35"`, `" 12.5 % "` → 숫자. 해석 불가면 `None`
pub fn parse_percent(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 벤더 값 정규화: 공백 제거, `"-"`/빈 값은 `None`
fn normalize_value(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Null => return None,
        other => other.to_string(),
    };
    if text.is_empty() || text == "-" {
        None
    } else {
        Some(text)
    }
}

impl AnalysisResult {
    /// 키 검증을 통과한 벤더 JSON 객체에서 생성.
    ///
    /// 누락 키는 호출 측에서 이미 걸러졌다고 가정하며, 여기서는 `None`으로 둔다.
    pub fn from_vendor_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let get = |key: &str| object.get(key).and_then(normalize_value);
        Self {
            main_copy: get("mainCopy"),
            main_copy_type: get("mainCopyType"),
            main_copy_ratio: get("mainCopyRatio"),
            sub_copy: get("subCopy"),
            sub_copy_ratio: get("subCopyRatio"),
            cta_text: get("ctaText"),
            cta_position: get("ctaPosition"),
            cta_ratio: get("ctaRatio"),
            model_ratio: get("modelRatio"),
            product_ratio: get("productRatio"),
            visual_elements: get("visualElements"),
            creative_color_tone: get("creativeColorTone"),
            eye_flow: get("eyeFlow"),
            design_analysis: get("designAnalysis"),
        }
    }

    pub fn main_copy_type_kind(&self) -> Option<MainCopyType> {
        self.main_copy_type.as_deref().and_then(MainCopyType::from_label)
    }

    pub fn cta_position_kind(&self) -> Option<CtaPosition> {
        self.cta_position.as_deref().and_then(CtaPosition::parse)
    }

    pub fn visual_elements_kind(&self) -> Option<VisualElements> {
        self.visual_elements
            .as_deref()
            .and_then(VisualElements::from_label)
    }

    pub fn color_tone_kind(&self) -> Option<ColorTone> {
        self.creative_color_tone
            .as_deref()
            .and_then(ColorTone::from_label)
    }

    pub fn eye_flow_kind(&self) -> Option<EyeFlow> {
        self.eye_flow.as_deref().and_then(EyeFlow::from_label)
    }

    /// 5개 면적 비중 필드의 숫자값
    pub fn ratios(&self) -> DesignRatios {
        let pct = |v: &Option<String>| v.as_deref().and_then(parse_percent);
        DesignRatios {
            main_copy: pct(&self.main_copy_ratio),
            sub_copy: pct(&self.sub_copy_ratio),
            cta: pct(&self.cta_ratio),
            model: pct(&self.model_ratio),
            product: pct(&self.product_ratio),
        }
    }

    /// 값이 채워진 필드 수
    pub fn populated_count(&self) -> usize {
        [
            &self.main_copy,
            &self.main_copy_type,
            &self.main_copy_ratio,
            &self.sub_copy,
            &self.sub_copy_ratio,
            &self.cta_text,
            &self.cta_position,
            &self.cta_ratio,
            &self.model_ratio,
            &self.product_ratio,
            &self.visual_elements,
            &self.creative_color_tone,
            &self.eye_flow,
            &self.design_analysis,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vendor_object() -> serde_json::Map<String, serde_json::Value> {
        let value = json!({
            "mainCopy": " 지금 바로 혜택 받기 ",
            "mainCopyType": "할인·혜택 강조형",
            "mainCopyRatio": "35%",
            "subCopy": "-",
            "subCopyRatio": "-",
            "ctaText": "신청하기",
            "ctaPosition": "bottomRight",
            "ctaRatio": "8%",
            "modelRatio": "0%",
            "productRatio": "-",
            "visualElements": "실사",
            "creativeColorTone": "브라이트톤",
            "eyeFlow": "F",
            "designAnalysis": "굵은 산세리프 카피가 시선을 먼저 잡는다."
        });
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn dash_becomes_none_and_values_are_trimmed() {
        let result = AnalysisResult::from_vendor_object(&vendor_object());
        assert_eq!(result.main_copy.as_deref(), Some("지금 바로 혜택 받기"));
        assert!(result.sub_copy.is_none());
        assert!(result.product_ratio.is_none());
        assert_eq!(result.populated_count(), 11);
    }

    #[test]
    fn typed_accessors() {
        let result = AnalysisResult::from_vendor_object(&vendor_object());
        assert_eq!(result.main_copy_type_kind(), Some(MainCopyType::DiscountBenefit));
        assert_eq!(result.cta_position_kind(), Some(CtaPosition::BottomRight));
        assert_eq!(result.visual_elements_kind(), Some(VisualElements::Photo));
        assert_eq!(result.color_tone_kind(), Some(ColorTone::Bright));
        assert_eq!(result.eye_flow_kind(), Some(EyeFlow::F));
    }

    #[test]
    fn ratio_parsing() {
        let ratios = AnalysisResult::from_vendor_object(&vendor_object()).ratios();
        assert_eq!(ratios.main_copy, Some(35.0));
        assert_eq!(ratios.cta, Some(8.0));
        assert_eq!(ratios.model, Some(0.0));
        assert_eq!(ratios.product, None);
    }

    #[test]
    fn parse_percent_edge_cases() {
        assert_eq!(parse_percent(" 12.5 % "), Some(12.5));
        assert_eq!(parse_percent("40"), Some(40.0));
        assert_eq!(parse_percent("%"), None);
        assert_eq!(parse_percent("약 30%"), None);
    }

    #[test]
    fn numeric_vendor_values_are_stringified() {
        let mut object = vendor_object();
        object.insert("ctaRatio".into(), json!(12));
        object.insert("eyeFlow".into(), serde_json::Value::Null);
        let result = AnalysisResult::from_vendor_object(&object);
        assert_eq!(result.cta_ratio.as_deref(), Some("12"));
        assert!(result.eye_flow.is_none());
    }
}
