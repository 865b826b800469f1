//! 분류 체계 조회 핸들러.

use axum::Json;
use serde::Serialize;

use adlens_core::taxonomy::{
    ColorTone, CopyType, CtaPosition, EyeFlow, ImageSize, MainCopyType, VisualElements,
    CATEGORY_MAP,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub main_category: &'static str,
    pub sub_categories: &'static [&'static str],
}

/// 키 + 표시 라벨
#[derive(Debug, Serialize)]
pub struct KeyLabel {
    pub key: &'static str,
    pub label: &'static str,
}

/// 카테고리 맵 + 디자인 속성 열거값
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyResponse {
    pub categories: Vec<CategoryEntry>,
    pub main_copy_types: Vec<&'static str>,
    pub cta_positions: Vec<KeyLabel>,
    pub visual_elements: Vec<&'static str>,
    pub color_tones: Vec<&'static str>,
    pub eye_flows: Vec<&'static str>,
    pub copy_types: Vec<KeyLabel>,
    pub image_sizes: Vec<&'static str>,
}

/// GET /api/categories
pub async fn get_categories() -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        categories: CATEGORY_MAP
            .iter()
            .map(|&(main_category, sub_categories)| CategoryEntry {
                main_category,
                sub_categories,
            })
            .collect(),
        main_copy_types: MainCopyType::ALL.iter().map(|t| t.label()).collect(),
        cta_positions: CtaPosition::ALL
            .iter()
            .map(|p| KeyLabel {
                key: p.key(),
                label: p.label(),
            })
            .collect(),
        visual_elements: VisualElements::ALL.iter().map(|v| v.label()).collect(),
        color_tones: ColorTone::ALL.iter().map(|c| c.label()).collect(),
        eye_flows: EyeFlow::ALL.iter().map(|e| e.label()).collect(),
        copy_types: CopyType::ALL
            .iter()
            .map(|t| KeyLabel {
                key: t.key(),
                label: t.label(),
            })
            .collect(),
        image_sizes: ImageSize::ALL.iter().map(|s| s.as_str()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_lists_every_enumeration() {
        let Json(body) = tokio_test::block_on(get_categories());

        assert_eq!(body.categories.len(), CATEGORY_MAP.len());
        assert_eq!(body.categories[0].main_category, "금융");
        assert!(body.categories[0].sub_categories.contains(&"은행"));
        assert_eq!(body.main_copy_types.len(), 9);
        assert_eq!(body.cta_positions.len(), 9);
        assert_eq!(body.copy_types.len(), 9);
        assert_eq!(body.image_sizes, vec!["1024x1024", "1024x1536", "1536x1024"]);
    }
}
