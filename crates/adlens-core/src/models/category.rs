//! 카테고리 필터.

use serde::{Deserialize, Serialize};

use super::creative::CreativeRecord;

/// 대분류/소분류 필터. 빈 값은 "제한 없음"
///
/// 소분류는 대분류가 지정된 경우에만 적용된다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    #[serde(default, alias = "selectedMainCategory")]
    pub main_category: String,
    #[serde(default, alias = "selectedSubCategory")]
    pub sub_category: String,
}

impl CategoryFilter {
    pub fn new(main_category: impl Into<String>, sub_category: impl Into<String>) -> Self {
        Self {
            main_category: main_category.into(),
            sub_category: sub_category.into(),
        }
    }

    /// 제한 없는 필터
    pub fn all() -> Self {
        Self::default()
    }

    fn main(&self) -> Option<&str> {
        Some(self.main_category.trim()).filter(|s| !s.is_empty())
    }

    fn sub(&self) -> Option<&str> {
        self.main()?;
        Some(self.sub_category.trim()).filter(|s| !s.is_empty())
    }

    /// 레코드가 필터 조건에 맞는지
    pub fn matches(&self, record: &CreativeRecord) -> bool {
        if let Some(main) = self.main() {
            if record.category != main {
                return false;
            }
        }
        if let Some(sub) = self.sub() {
            if record.sub_category != sub {
                return false;
            }
        }
        true
    }
}
