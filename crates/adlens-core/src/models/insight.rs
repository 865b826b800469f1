//! AI 소재 인사이트 분석 모델.

use serde::{Deserialize, Serialize};

use super::category::CategoryFilter;
use super::creative::CreativeRecord;
use super::metrics::AggregateMetrics;

/// 인사이트 응답 필수 키
pub const INSIGHT_KEYS: [&str; 4] = [
    "messageTypeAnalyze",
    "ctaAnalyze",
    "designAnalyze",
    "aiTotalAnalyze",
];

/// 상위 소재 묶음에 대한 AI 분석
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightAnalysis {
    /// `"<카피 유형>: <분석> → <결론>"` 형식 항목들
    #[serde(default)]
    pub message_type_analyze: Vec<String>,
    /// CTA 카피 / 위치·비중 / 결론 (3개)
    #[serde(default)]
    pub cta_analyze: Vec<String>,
    /// 비주얼 / 컬러톤 / 시선흐름 / 디자인 분석 (4개)
    #[serde(default)]
    pub design_analyze: Vec<String>,
    #[serde(default)]
    pub ai_total_analyze: String,
}

impl InsightAnalysis {
    /// 카피 생성 프롬프트에 넣을 분석 텍스트
    pub fn to_prompt_text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        lines.push("메시지 유형분석:");
        lines.extend(self.message_type_analyze.iter().map(String::as_str));
        lines.push("");
        lines.push("CTA 분석:");
        lines.extend(self.cta_analyze.iter().map(String::as_str));
        lines.push("");
        lines.push("디자인 분석:");
        lines.extend(self.design_analyze.iter().map(String::as_str));
        lines.push("");
        lines.push("AI 종합분석:");
        lines.push(&self.ai_total_analyze);
        lines.join("\n")
    }

    /// 모든 섹션이 비어 있는지
    pub fn is_empty(&self) -> bool {
        self.message_type_analyze.is_empty()
            && self.cta_analyze.is_empty()
            && self.design_analyze.is_empty()
            && self.ai_total_analyze.trim().is_empty()
    }
}

/// 카테고리 인사이트 분석 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialAnalysis {
    #[serde(flatten)]
    pub metrics: AggregateMetrics,
    pub top_materials: Vec<CreativeRecord>,
    pub ai_analysis: InsightAnalysis,
    pub filter: CategoryFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_text_has_section_headers_in_order() {
        let insight = InsightAnalysis {
            message_type_analyze: vec!["할인 · 혜택 강조형: 할인율 강조 → 효과적".into()],
            cta_analyze: vec!["a".into(), "b".into(), "c".into()],
            design_analyze: vec!["d1".into(), "d2".into(), "d3".into(), "d4".into()],
            ai_total_analyze: "종합".into(),
        };
        let text = insight.to_prompt_text();
        let msg = text.find("메시지 유형분석:").unwrap();
        let cta = text.find("CTA 분석:").unwrap();
        let design = text.find("디자인 분석:").unwrap();
        let total = text.find("AI 종합분석:").unwrap();
        assert!(msg < cta && cta < design && design < total);
        assert!(text.ends_with("AI 종합분석:\n종합"));
    }

    #[test]
    fn empty_detection() {
        assert!(InsightAnalysis::default().is_empty());
    }

    #[test]
    fn material_analysis_flattens_metrics() {
        let analysis = MaterialAnalysis {
            metrics: AggregateMetrics::zero(),
            top_materials: Vec::new(),
            ai_analysis: InsightAnalysis::default(),
            filter: CategoryFilter::new("금융", ""),
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["avgCVR"], "0%");
        assert!(json["topMaterials"].as_array().unwrap().is_empty());
        assert_eq!(json["filter"]["mainCategory"], "금융");
    }
}
