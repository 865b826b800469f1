//! 벤더 요청 프롬프트.
//!
//! 허용 값 목록은 `adlens_core::taxonomy`에서 생성하므로 분류 체계와 항상 일치한다.

use serde_json::{json, Map, Value};

use adlens_core::models::analysis::ANALYSIS_KEYS;
use adlens_core::models::creative::{is_unset, CreativeRecord};
use adlens_core::models::generation::CopyGenerationRequest;
use adlens_core::models::insight::InsightAnalysis;
use adlens_core::taxonomy::{ColorTone, CopyType, CtaPosition, EyeFlow, MainCopyType, VisualElements};

/// 인사이트 프롬프트의 데이터 자리표시자
pub const INSIGHT_DATA_PLACEHOLDER: &str = "{{배너광고데이터}}";

/// 카피 생성 시 예상 성과 지표 후보
const PERFORMANCE_METRICS: [&str; 8] = [
    "ROAS", "CTR", "CVR", "노출수", "클릭수", "전환수", "광고비", "매출액",
];

/// 공통 출력 규칙 블록
fn output_rules(key_count: usize) -> String {
    format!(
        "###출력 규칙\n\
         - 응답은 JSON 객체 하나만 출력합니다. 코드 블록(```)이나 설명 문장을 덧붙이지 마십시오.\n\
         - 첫 글자는 '{{', 마지막 글자는 '}}' 입니다.\n\
         - 최상위 키 {key_count}개를 빠짐없이 출력합니다.\n\
         - 값을 알 수 없으면 문자열 \"-\" 를 넣습니다.\n\
         - 문자열 앞뒤 공백과 줄바꿈을 넣지 마십시오.\n"
    )
}

fn quoted_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.into_iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}

// ============================================================
// 소재 이미지 분석
// ============================================================

/// 소재 이미지 분석 프롬프트 (이미지와 함께 전송)
pub fn analysis_prompt() -> String {
    let skeleton: Map<String, Value> = ANALYSIS_KEYS
        .iter()
        .map(|k| (k.to_string(), Value::String("-".into())))
        .collect();
    let skeleton = serde_json::to_string_pretty(&Value::Object(skeleton)).unwrap_or_default();

    format!(
        "###지시사항\n\
         첨부된 배너광고 이미지를 보고 아래 항목을 채우십시오.\n\n\
         {rules}\n\
         ###항목별 기준\n\
         - mainCopy: 가장 크게 강조된 메인 카피 문구\n\
         - mainCopyType: 메인 카피의 의도. 다음 중 정확히 하나 {main_types}\n\
         - mainCopyRatio: 배너 전체 면적 대비 메인 카피 영역 비중 (정수+\"%\")\n\
         - subCopy: 보조 설명 문구\n\
         - subCopyRatio: 서브 카피 영역 비중 (정수+\"%\")\n\
         - ctaText: CTA 버튼의 문구\n\
         - ctaPosition: CTA 위치. 다음 중 하나 {positions}\n\
         - ctaRatio: CTA 요소 영역 비중 (정수+\"%\")\n\
         - modelRatio: 인물(얼굴·손 포함) 영역 비중 (정수+\"%\")\n\
         - productRatio: 제품·패키지 영역 비중 (정수+\"%\")\n\
         - visualElements: 지배적인 표현 방식. 다음 중 하나 {visuals}\n\
         - creativeColorTone: 색조. 다음 중 하나 {tones}\n\
         - eyeFlow: 시선 흐름. 다음 중 하나 {flows}\n\
         - designAnalysis: 레이아웃·타이포·컬러·균형을 구체적으로 언급한 1~2문장 (120자 이내). 단순한 호불호 평가는 쓰지 마십시오.\n\n\
         ###출력 형태\n\
         {skeleton}",
        rules = output_rules(ANALYSIS_KEYS.len()),
        main_types = quoted_list(MainCopyType::ALL.iter().map(|t| t.label())),
        positions = quoted_list(CtaPosition::ALL.iter().map(|p| p.key())),
        visuals = quoted_list(VisualElements::ALL.iter().map(|v| v.label())),
        tones = quoted_list(ColorTone::ALL.iter().map(|t| t.label())),
        flows = quoted_list(EyeFlow::ALL.iter().map(|f| f.label())),
    )
}

// ============================================================
// 상위 소재 인사이트
// ============================================================

fn or_dash(value: &str) -> &str {
    if is_unset(value) {
        "-"
    } else {
        value
    }
}

/// 소재 한 건의 프롬프트용 요약 (한글 키)
pub fn material_summary(record: &CreativeRecord) -> Value {
    json!({
        "소재명": record.creative_name,
        "메인카피": or_dash(&record.main_copy),
        "메인카피유형": or_dash(&record.main_copy_type),
        "서브카피": or_dash(&record.sub_copy),
        "CTA문구": or_dash(&record.cta_text),
        "CTA위치": or_dash(&record.cta_position),
        "비주얼요소": or_dash(&record.visual_elements),
        "소재칼라톤": or_dash(&record.creative_color_tone),
        "시선흐름": or_dash(&record.eye_flow),
        "디자인분석": or_dash(&record.design_analysis),
        "CTR": format!("{:.2}%", record.ctr()),
        "CVR": format!("{:.2}%", record.cvr()),
        "ROAS": format!("{:.2}%", record.roas()),
    })
}

/// 인사이트 프롬프트 템플릿 (자리표시자 포함)
pub fn insight_template() -> String {
    format!(
        "###지시사항\n\
         아래 배너광고 데이터는 성과 상위 소재입니다. 공통점을 분석하여 항목을 채우십시오.\n\n\
         {rules}\
         - 카피 원문에 ':' 또는 '→' 가 들어 있으면 각각 '\\:' '\\→' 로 이스케이프합니다.\n\n\
         ###항목별 기준\n\
         - messageTypeAnalyze: 문자열 리스트. 각 항목은 \"<메인카피유형>: <메인·서브 카피 분석> → <결론>\" 형식\n\
         - ctaAnalyze: 문자열 3개 리스트 (CTA 문구 분석, CTA 유형·위치·비중 분석, CTA 결론)\n\
         - designAnalyze: 문자열 4개 리스트 (비주얼 요소, 칼라톤, 시선 흐름, 디자인 평가 각각의 분석)\n\
         - aiTotalAnalyze: 위 세 항목을 종합한 결론 문자열\n\n\
         ###출력 형태\n\
         {{\n  \"messageTypeAnalyze\": [\"<유형>: <분석> → <결론>\"],\n  \
         \"ctaAnalyze\": [\"<문구>\", \"<유형·위치·비중>\", \"<결론>\"],\n  \
         \"designAnalyze\": [\"<비주얼>\", \"<칼라톤>\", \"<시선흐름>\", \"<디자인>\"],\n  \
         \"aiTotalAnalyze\": \"<종합 결론>\"\n}}\n\n\
         ###배너광고데이터\n\
         {INSIGHT_DATA_PLACEHOLDER}",
        rules = output_rules(4),
    )
}

/// 상위 소재 목록을 채운 인사이트 프롬프트
pub fn insight_prompt(materials: &[CreativeRecord]) -> String {
    let data = Value::Array(materials.iter().map(material_summary).collect());
    let data = serde_json::to_string_pretty(&data).unwrap_or_default();
    insight_template().replacen(INSIGHT_DATA_PLACEHOLDER, &data, 1)
}

// ============================================================
// 배너 카피 생성
// ============================================================

/// 카피 생성 프롬프트
pub fn copy_prompt(request: &CopyGenerationRequest, analysis: &InsightAnalysis) -> String {
    let copy_types = quoted_list(CopyType::ALL.iter().map(|t| t.key()));
    format!(
        "###지시사항\n\
         아래 분석 결과와 브랜드 정보를 바탕으로 카피 유형별 배너광고 카피를 작성하십시오.\n\n\
         {rules}\n\
         ###항목별 기준 (bannerCopyTable 각 항목)\n\
         - copyType: {copy_types} 중 하나. 목록의 모든 유형을 한 번씩 작성합니다.\n\
         - description: 해당 유형의 마케팅 목표를 개조식으로\n\
         - bannerSampleCopy: 목표에 맞는 메인 카피\n\
         - performanceMetricExamples: 개선이 기대되는 지표 리스트. 후보 {metrics}\n\
         - abTestCopyExamples: 메인 카피와 함께 쓸 A/B 테스트용 서브 카피 {{\"optionA\": ..., \"optionB\": ...}}\n\
         - recommendedColorTone: 추천 색상 리스트\n\
         - recommendedCtaCopyExamples: CTA 버튼 문구 리스트\n\n\
         ###출력 형태\n\
         {{\"bannerCopyTable\": [{{\"copyType\": \"discountBenefitEmphasis\", \"description\": \"...\", \
         \"bannerSampleCopy\": \"...\", \"performanceMetricExamples\": [\"CTR\"], \
         \"abTestCopyExamples\": {{\"optionA\": \"...\", \"optionB\": \"...\"}}, \
         \"recommendedColorTone\": [\"...\"], \"recommendedCtaCopyExamples\": [\"...\"]}}, ...]}}\n\n\
         ###배너광고분석결과\n\
         {analysis}\n\n\
         ###브랜드메시지\n\
         {brand_message}\n\n\
         ###브랜드이벤트\n\
         {brand_event}",
        rules = output_rules(1),
        metrics = quoted_list(PERFORMANCE_METRICS),
        analysis = analysis.to_prompt_text(),
        brand_message = request.brand_message.trim(),
        brand_event = request.brand_event.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_lists_every_key_and_vocabulary() {
        let prompt = analysis_prompt();
        for key in ANALYSIS_KEYS {
            assert!(prompt.contains(&format!("\"{key}\"")), "{key} 누락");
        }
        assert!(prompt.contains("'후기성 문구형'"));
        assert!(prompt.contains("'bottomRight'"));
        assert!(prompt.contains("'네온톤'"));
    }

    #[test]
    fn insight_prompt_embeds_materials_with_dash_for_missing() {
        let mut record = CreativeRecord::new("c-1");
        record.creative_name = "봄 적금".into();
        record.main_copy = "연 5% 적금".into();
        record.impressions = 1000;
        record.clicks = 25;

        let prompt = insight_prompt(&[record]);
        assert!(!prompt.contains(INSIGHT_DATA_PLACEHOLDER));
        assert!(prompt.contains("\"소재명\": \"봄 적금\""));
        assert!(prompt.contains("\"서브카피\": \"-\""));
        assert!(prompt.contains("\"CTR\": \"2.50%\""));
    }

    #[test]
    fn copy_prompt_includes_analysis_and_brand() {
        let analysis = InsightAnalysis {
            message_type_analyze: vec!["혜택 강조".into()],
            ai_total_analyze: "종합".into(),
            ..Default::default()
        };
        let request = CopyGenerationRequest {
            analysis_result: Some(analysis.clone()),
            brand_message: " 믿을 수 있는 금융 ".into(),
            brand_event: "봄맞이 이벤트".into(),
        };
        let prompt = copy_prompt(&request, &analysis);
        assert!(prompt.contains("###브랜드메시지\n믿을 수 있는 금융\n"));
        assert!(prompt.contains("AI 종합분석:\n종합"));
        for copy_type in CopyType::ALL {
            assert!(prompt.contains(copy_type.key()));
        }
    }
}
