//! A/B 배너 이미지 생성.
//!
//! - A안: `optionA` 서브 카피 + 첫 번째 CTA, 성과 상위 소재 이미지를 참조
//! - B안: `optionB` 서브 카피 + CTA 전체, 참조 없이 생성
//!
//! 두 요청은 동시에 보낸다. A안 실패는 전체 실패, B안 실패는 결과에 기록만 한다.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use adlens_core::error::CoreError;
use adlens_core::models::creative::CreativeRecord;
use adlens_core::models::generation::{
    BannerGenerationOutcome, GeneratedImage, ImageAsset, ImageGenerationRequest, ImagePrompt,
    ImageVariant,
};
use adlens_core::ports::asset_store::AssetStore;
use adlens_core::ports::image_generator::ImageGenerator;
use adlens_core::taxonomy::ImageSize;

use crate::selection::{select_top_performers, REFERENCE_SET};

/// CTA 예시 목록 (쉼표 구분 문자열도 분해)
fn cta_examples(request: &ImageGenerationRequest) -> Vec<String> {
    request
        .recommended_cta_copy_examples
        .to_list()
        .iter()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 변형별 이미지 프롬프트
pub fn build_image_prompt(
    request: &ImageGenerationRequest,
    variant: ImageVariant,
    size: ImageSize,
    with_references: bool,
) -> ImagePrompt {
    let ab = &request.ab_test_copy_examples;
    let (preferred, fallback) = match variant {
        ImageVariant::A => (&ab.option_a, &ab.option_b),
        ImageVariant::B => (&ab.option_b, &ab.option_a),
    };
    let sub_copy = if preferred.trim().is_empty() {
        fallback
    } else {
        preferred
    };

    let ctas = cta_examples(request);
    let cta = match variant {
        ImageVariant::A => ctas.first().cloned().unwrap_or_default(),
        ImageVariant::B => ctas.join(", "),
    };

    let mut prompt = String::from(
        "###지시사항\n\
         성과가 우수한 배너광고 정보를 분석한 뒤, '제작 요청 배너광고'의 내용으로 배너 이미지를 생성하십시오.\n",
    );
    if with_references {
        prompt.push_str("첨부한 실제 운영 배너광고 이미지를 참고하여 생성하십시오.\n");
    }
    prompt.push_str(&format!(
        "\n###성과가 우수한 배너광고 정보\n{}\n{}\n{}\n\n\
         ###제작 요청 배너광고\n\
         카피 유형 : {}\n\
         배너 카피 : {}\n\
         배너 서브 카피 : {}\n\
         배너 색상 : {}\n\
         CTA 문구 : {}",
        request.message_type_analyze.to_list().join("\n"),
        request.cta_analyze.to_list().join("\n"),
        request.design_analyze.to_list().join("\n"),
        request.copy_type_label(),
        request.banner_sample_copy.trim(),
        sub_copy.trim(),
        request.recommended_color_tone,
        cta,
    ));

    ImagePrompt {
        variant,
        prompt,
        size,
    }
}

/// 배너 이미지 생성 서비스
pub struct BannerStudio {
    generator: Arc<dyn ImageGenerator>,
    assets: Arc<dyn AssetStore>,
}

impl BannerStudio {
    pub fn new(generator: Arc<dyn ImageGenerator>, assets: Arc<dyn AssetStore>) -> Self {
        Self { generator, assets }
    }

    /// 참조 소재 선정 + 이미지 로드. 읽지 못한 이미지는 건너뛴다
    async fn load_references(
        &self,
        records: &[CreativeRecord],
        request: &ImageGenerationRequest,
    ) -> Result<(Vec<String>, Vec<ImageAsset>), CoreError> {
        let references = match select_top_performers(records, &request.filter(), REFERENCE_SET) {
            Ok(selected) => selected,
            Err(CoreError::EmptySelection { .. }) => Vec::new(),
            Err(e) => return Err(e),
        };

        let loads = references
            .iter()
            .map(|r| self.assets.load_image(&r.creative_content));
        let mut ids = Vec::with_capacity(references.len());
        let mut assets = Vec::with_capacity(references.len());
        for (record, loaded) in references.iter().zip(join_all(loads).await) {
            match loaded {
                Ok(asset) => {
                    ids.push(record.creative_id.clone());
                    assets.push(asset);
                }
                Err(e) => warn!(creative_id = %record.creative_id, "참조 이미지 로드 실패: {}", e),
            }
        }
        Ok((ids, assets))
    }

    async fn save(&self, image: &mut GeneratedImage) -> Result<(), CoreError> {
        let prefix = format!("banner-{}", image.variant.as_str().to_lowercase());
        let path = self.assets.save_generated(&image.image_base64, &prefix).await?;
        image.saved_path = Some(path);
        Ok(())
    }

    /// A/B 배너 생성
    pub async fn generate(
        &self,
        records: &[CreativeRecord],
        request: &ImageGenerationRequest,
    ) -> Result<BannerGenerationOutcome, CoreError> {
        let size = request.validate()?;
        let (reference_ids, references) = self.load_references(records, request).await?;

        let prompt_a = build_image_prompt(request, ImageVariant::A, size, !references.is_empty());
        let prompt_b = build_image_prompt(request, ImageVariant::B, size, false);

        info!(
            copy_type = %request.copy_type,
            size = size.as_str(),
            references = references.len(),
            "배너 A/B 이미지 생성 시작"
        );

        let (result_a, result_b) = tokio::join!(
            self.generator.generate_image(&prompt_a, &references),
            self.generator.generate_image(&prompt_b, &[])
        );

        let mut variant_a = result_a?;
        let (mut variant_b, variant_b_error) = match result_b {
            Ok(image) => (Some(image), None),
            Err(e) => {
                warn!("B안 이미지 생성 실패: {}", e);
                (None, Some(e.user_message()))
            }
        };

        if request.save {
            self.save(&mut variant_a).await?;
            if let Some(image) = variant_b.as_mut() {
                if let Err(e) = self.save(image).await {
                    warn!("B안 이미지 저장 실패: {}", e);
                }
            }
        }

        Ok(BannerGenerationOutcome {
            variant_a,
            variant_b,
            variant_b_error,
            reference_count: reference_ids.len(),
            reference_ids,
        })
    }
}
