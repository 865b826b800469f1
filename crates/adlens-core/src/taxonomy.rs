//! 고정 분류 체계.
//!
//! 광고주 카테고리 맵과 소재 디자인 속성 열거형. 모두 정적 상수이며 런타임에 바뀌지 않는다.
//! 라벨 파싱은 관대하게 동작한다: 공백 차이는 무시하고, 모르는 값은 `None`.

use serde::{Deserialize, Serialize};

// ============================================================
// 카테고리 맵
// ============================================================

/// 대분류 → 소분류 목록 (20개 대분류)
pub const CATEGORY_MAP: &[(&str, &[&str])] = &[
    ("금융", &["은행", "보험", "증권", "카드", "저축은행", "캐피탈", "핀테크"]),
    ("통신", &["이동통신사", "알뜰폰", "인터넷", "IPTV", "통신유통"]),
    (
        "유통·쇼핑",
        &["백화점", "마트", "편의점", "홈쇼핑", "이커머스", "리테일 전문몰"],
    ),
    (
        "식음료",
        &["F&B브랜드", "외식프랜차이즈", "배달", "가공식품", "음료", "주류"],
    ),
    (
        "패션·뷰티",
        &["패션(의류/잡화)", "뷰티(화장품/스킨케어)", "온라인 쇼핑몰"],
    ),
    (
        "자동차·모빌리티",
        &["완성차", "수입차", "중고차", "렌터카", "리스", "내비게이션", "EV"],
    ),
    (
        "건설·부동산",
        &["시행사", "시공사", "분양대행", "부동산중개", "도시개발", "오피스텔"],
    ),
    (
        "교육",
        &["입시", "초중고 교육", "성인교육", "외국어", "온라인 클래스", "학습지"],
    ),
    (
        "여행·레저",
        &["OTA", "호텔", "항공", "렌터카", "놀이공원", "레저시설"],
    ),
    (
        "공공·기관",
        &["지자체", "정부부처", "공공기관", "협회", "공익캠페인"],
    ),
    (
        "IT·전자",
        &["가전", "모바일기기", "B2B솔루션", "SaaS", "보안", "클라우드"],
    ),
    (
        "헬스케어",
        &["병원", "의원", "제약", "건강식품", "바이오", "의료기기"],
    ),
    (
        "생활용품",
        &["주방", "욕실", "청소", "위생", "인테리어", "반려동물용품"],
    ),
    (
        "엔터테인먼트",
        &["OTT", "영화", "방송", "공연", "음반", "팬 플랫폼"],
    ),
    (
        "게임·e스포츠",
        &["모바일게임", "콘솔", "PC게임", "게임사", "플랫폼", "스트리밍"],
    ),
    ("물류·운송", &["택배", "물류", "퀵서비스", "창고", "배송대행"]),
    (
        "제조·산업체",
        &["중공업", "기계", "부품", "화학", "철강", "B2B생산재"],
    ),
    (
        "스타트업·기타",
        &["테크 스타트업", "플랫폼", "O2O", "커머스", "공유경제"],
    ),
    (
        "프랜차이즈",
        &["카페", "음식점", "교육", "피트니스", "기타 생활 서비스"],
    ),
    ("기타", &["분류되지 않는 기타 광고주"]),
];

/// 대분류의 소분류 목록. 모르는 대분류면 `None`
pub fn sub_categories(main_category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_MAP
        .iter()
        .find(|(main, _)| *main == main_category)
        .map(|(_, subs)| *subs)
}

/// 대분류/소분류 조합이 분류 체계에 존재하는지
pub fn is_known_category(main_category: &str, sub_category: &str) -> bool {
    sub_categories(main_category)
        .map(|subs| sub_category.is_empty() || subs.contains(&sub_category))
        .unwrap_or(false)
}

/// 공백 제거 후 비교용 키
fn normalize(label: &str) -> String {
    label.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 라벨 목록에서 정규화 비교로 변형 검색
fn find_by_label<T: Copy>(all: &[T], label: &str, label_of: impl Fn(&T) -> &'static str) -> Option<T> {
    let key = normalize(label);
    if key.is_empty() || key == "-" {
        return None;
    }
    all.iter().copied().find(|v| normalize(label_of(v)) == key)
}

// ============================================================
// 메인 카피 유형
// ============================================================

/// 메인 카피 전달 의도 (9종)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainCopyType {
    #[serde(rename = "할인 · 혜택 강조형")]
    DiscountBenefit,
    #[serde(rename = "한정 · 긴급성 강조형")]
    ScarcityUrgency,
    #[serde(rename = "고객후기 · 신뢰 강조형")]
    CustomerReviewTrust,
    #[serde(rename = "키워드 · 짧은 강조형")]
    KeywordShort,
    #[serde(rename = "실적 · 성과 강조형")]
    PerformanceResult,
    #[serde(rename = "감성 · 공감형")]
    EmotionalEmpathy,
    #[serde(rename = "도전 · 참여 유도형")]
    ChallengeParticipation,
    #[serde(rename = "후기성 문구형")]
    TestimonialPhrase,
    #[serde(rename = "비교 · 대조형")]
    ComparisonContrast,
}

impl MainCopyType {
    pub const ALL: [MainCopyType; 9] = [
        Self::DiscountBenefit,
        Self::ScarcityUrgency,
        Self::CustomerReviewTrust,
        Self::KeywordShort,
        Self::PerformanceResult,
        Self::EmotionalEmpathy,
        Self::ChallengeParticipation,
        Self::TestimonialPhrase,
        Self::ComparisonContrast,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DiscountBenefit => "할인 · 혜택 강조형",
            Self::ScarcityUrgency => "한정 · 긴급성 강조형",
            Self::CustomerReviewTrust => "고객후기 · 신뢰 강조형",
            Self::KeywordShort => "키워드 · 짧은 강조형",
            Self::PerformanceResult => "실적 · 성과 강조형",
            Self::EmotionalEmpathy => "감성 · 공감형",
            Self::ChallengeParticipation => "도전 · 참여 유도형",
            Self::TestimonialPhrase => "후기성 문구형",
            Self::ComparisonContrast => "비교 · 대조형",
        }
    }

    /// "할인·혜택 강조형"처럼 공백이 달라도 인식
    pub fn from_label(label: &str) -> Option<Self> {
        find_by_label(&Self::ALL, label, Self::label)
    }
}

// ============================================================
// CTA 위치
// ============================================================

/// CTA 위치 (3x3 화면 구역)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CtaPosition {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl CtaPosition {
    pub const ALL: [CtaPosition; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// 데이터셋/벤더 응답에서 쓰는 camelCase 키
    pub fn key(&self) -> &'static str {
        match self {
            Self::TopLeft => "topLeft",
            Self::TopCenter => "topCenter",
            Self::TopRight => "topRight",
            Self::CenterLeft => "centerLeft",
            Self::Center => "center",
            Self::CenterRight => "centerRight",
            Self::BottomLeft => "bottomLeft",
            Self::BottomCenter => "bottomCenter",
            Self::BottomRight => "bottomRight",
        }
    }

    /// 화면 표시용 한글 라벨
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopLeft => "좌측 상단",
            Self::TopCenter => "중앙 상단",
            Self::TopRight => "우측 상단",
            Self::CenterLeft => "좌측 중앙",
            Self::Center => "정중앙",
            Self::CenterRight => "우측 중앙",
            Self::BottomLeft => "좌측 하단",
            Self::BottomCenter => "중앙 하단",
            Self::BottomRight => "우측 하단",
        }
    }

    /// camelCase 키 (대소문자 무시) 또는 한글 라벨로 파싱
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(trimmed))
            .or_else(|| find_by_label(&Self::ALL, trimmed, Self::label))
    }
}

// ============================================================
// 비주얼/컬러톤/시선흐름
// ============================================================

/// 주된 비주얼 표현 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualElements {
    #[serde(rename = "일러스트")]
    Illustration,
    #[serde(rename = "실사")]
    Photo,
    #[serde(rename = "3D")]
    ThreeD,
}

impl VisualElements {
    pub const ALL: [VisualElements; 3] = [Self::Illustration, Self::Photo, Self::ThreeD];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Illustration => "일러스트",
            Self::Photo => "실사",
            Self::ThreeD => "3D",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        find_by_label(&Self::ALL, &label.to_uppercase(), Self::label)
    }
}

/// 소재 컬러톤 (10종)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTone {
    #[serde(rename = "비비드톤")]
    Vivid,
    #[serde(rename = "라이트톤")]
    Light,
    #[serde(rename = "소프트톤")]
    Soft,
    #[serde(rename = "다크톤")]
    Dark,
    #[serde(rename = "페일톤")]
    Pale,
    #[serde(rename = "브라이트톤")]
    Bright,
    #[serde(rename = "그레이시톤")]
    Grayish,
    #[serde(rename = "딥톤")]
    Deep,
    #[serde(rename = "파스텔톤")]
    Pastel,
    #[serde(rename = "네온톤")]
    Neon,
}

impl ColorTone {
    pub const ALL: [ColorTone; 10] = [
        Self::Vivid,
        Self::Light,
        Self::Soft,
        Self::Dark,
        Self::Pale,
        Self::Bright,
        Self::Grayish,
        Self::Deep,
        Self::Pastel,
        Self::Neon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vivid => "비비드톤",
            Self::Light => "라이트톤",
            Self::Soft => "소프트톤",
            Self::Dark => "다크톤",
            Self::Pale => "페일톤",
            Self::Bright => "브라이트톤",
            Self::Grayish => "그레이시톤",
            Self::Deep => "딥톤",
            Self::Pastel => "파스텔톤",
            Self::Neon => "네온톤",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        find_by_label(&Self::ALL, label, Self::label)
    }
}

/// 시선 흐름 패턴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EyeFlow {
    Z,
    F,
    O,
}

impl EyeFlow {
    pub const ALL: [EyeFlow; 3] = [Self::Z, Self::F, Self::O];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Z => "Z",
            Self::F => "F",
            Self::O => "O",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        find_by_label(&Self::ALL, &label.to_uppercase(), Self::label)
    }
}

// ============================================================
// 생성용 카피 유형 / 이미지 크기
// ============================================================

/// 배너 카피 생성 유형 (9종, camelCase 키)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CopyType {
    DiscountBenefitEmphasis,
    ScarcityUrgencyEmphasis,
    CustomerReviewTrustEmphasis,
    KeywordShortEmphasis,
    PerformanceResultEmphasis,
    EmotionalEmpathy,
    ChallengeParticipationInducement,
    HookingPhrase,
    ComparisonContrast,
}

impl CopyType {
    pub const ALL: [CopyType; 9] = [
        Self::DiscountBenefitEmphasis,
        Self::ScarcityUrgencyEmphasis,
        Self::CustomerReviewTrustEmphasis,
        Self::KeywordShortEmphasis,
        Self::PerformanceResultEmphasis,
        Self::EmotionalEmpathy,
        Self::ChallengeParticipationInducement,
        Self::HookingPhrase,
        Self::ComparisonContrast,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::DiscountBenefitEmphasis => "discountBenefitEmphasis",
            Self::ScarcityUrgencyEmphasis => "scarcityUrgencyEmphasis",
            Self::CustomerReviewTrustEmphasis => "customerReviewTrustEmphasis",
            Self::KeywordShortEmphasis => "keywordShortEmphasis",
            Self::PerformanceResultEmphasis => "performanceResultEmphasis",
            Self::EmotionalEmpathy => "emotionalEmpathy",
            Self::ChallengeParticipationInducement => "challengeParticipationInducement",
            Self::HookingPhrase => "hookingPhrase",
            Self::ComparisonContrast => "comparisonContrast",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DiscountBenefitEmphasis => "할인·혜택 강조형",
            Self::ScarcityUrgencyEmphasis => "한정·긴급성 강조형",
            Self::CustomerReviewTrustEmphasis => "고객후기·신뢰 강조형",
            Self::KeywordShortEmphasis => "키워드·짧은 강조형",
            Self::PerformanceResultEmphasis => "실적·성과 강조형",
            Self::EmotionalEmpathy => "감성·공감형",
            Self::ChallengeParticipationInducement => "도전·참여 유도형",
            Self::HookingPhrase => "후킹성 문구형",
            Self::ComparisonContrast => "비교·대조형",
        }
    }

    /// camelCase 키 또는 한글 라벨로 파싱
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == trimmed)
            .or_else(|| find_by_label(&Self::ALL, trimmed, Self::label))
    }
}

/// 생성 이미지 크기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1536")]
    Portrait,
    #[serde(rename = "1536x1024")]
    Landscape,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [Self::Square, Self::Portrait, Self::Landscape];

    /// 벤더 API 파라미터 값
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Portrait => "1024x1536",
            Self::Landscape => "1536x1024",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.iter().copied().find(|s| s.as_str() == trimmed)
    }
}
