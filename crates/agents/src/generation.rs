//! Image generation sub-agent: brand-aware prompt enhancement, synthesis and
//! storage.

use crate::persist::{persist_image, sanitize_prompt};
use crate::prompts::enhancement_prompt;
use crate::tools::ImageToolOutput;
use marketing_cache::{ArtifactStore, ImageCache};
use marketing_core::config::ImageConfig;
use marketing_core::{BrandProfile, MarketingError, MarketingResult, VisualIdentity};
use marketing_genai::{ImageGenerationRequest, ImageGenerator, TextGenerator};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ImageGenerationAgent {
    enhancer: Arc<dyn TextGenerator>,
    generator: Arc<dyn ImageGenerator>,
    cache: ImageCache,
    artifacts: ArtifactStore,
    brand: BrandProfile,
    visual: VisualIdentity,
    number_of_images: u32,
    aspect_ratio: String,
}

impl ImageGenerationAgent {
    pub fn new(
        enhancer: Arc<dyn TextGenerator>,
        generator: Arc<dyn ImageGenerator>,
        cache: ImageCache,
        artifacts: ArtifactStore,
    ) -> Self {
        let images = ImageConfig::default();
        Self {
            enhancer,
            generator,
            cache,
            artifacts,
            brand: BrandProfile::default(),
            visual: VisualIdentity::default(),
            number_of_images: images.number_of_images,
            aspect_ratio: images.aspect_ratio,
        }
    }

    pub fn with_brand(mut self, brand: BrandProfile, visual: VisualIdentity) -> Self {
        self.brand = brand;
        self.visual = visual;
        self
    }

    pub fn with_image_config(mut self, images: &ImageConfig) -> Self {
        self.number_of_images = images.number_of_images;
        self.aspect_ratio = images.aspect_ratio.clone();
        self
    }

    /// Rewrite the request into a detailed, on-brand prompt. Falls back to
    /// the original prompt when enhancement fails or comes back empty.
    pub async fn enhance(&self, prompt: &str) -> String {
        let request = enhancement_prompt(&self.brand, &self.visual, prompt);
        match self.enhancer.generate_text(&request).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(original = %prompt, "Prompt enhanced");
                text.trim().to_string()
            }
            Ok(_) => prompt.to_string(),
            Err(e) => {
                warn!(error = %e, "Prompt enhancement failed, using original prompt");
                prompt.to_string()
            }
        }
    }

    /// Generate an image for `prompt` and store the first result.
    pub async fn generate(&self, prompt: &str) -> MarketingResult<ImageToolOutput> {
        let enhanced = self.enhance(prompt).await;
        let request = ImageGenerationRequest {
            prompt: enhanced,
            number_of_images: self.number_of_images,
            aspect_ratio: self.aspect_ratio.clone(),
            enhance_prompt: true,
        };
        let images = self.generator.generate_images(&request).await?;
        let image = images.into_iter().next().ok_or_else(|| {
            MarketingError::GenerationFailed("image generation returned no images".into())
        })?;

        metrics::counter!("images.generated").increment(1);
        let filename = format!("generated_image_{}.png", sanitize_prompt(prompt));
        info!(filename = %filename, size = image.bytes.len(), "Image generated");

        Ok(persist_image(&self.cache, &self.artifacts, &image, filename, prompt).await)
    }
}
