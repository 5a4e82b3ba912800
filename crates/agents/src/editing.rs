//! Image editing sub-agent: masked object edits and free whole-image edits
//! of a previously generated image.

use crate::persist::{persist_image, sanitize_prompt};
use crate::tools::ImageToolOutput;
use bytes::Bytes;
use marketing_cache::{ArtifactStore, ImageCache};
use marketing_core::{MarketingError, MarketingResult};
use marketing_genai::{EditMode, ImageEditRequest, ImageEditor};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ImageEditingAgent {
    editor: Arc<dyn ImageEditor>,
    cache: ImageCache,
    artifacts: ArtifactStore,
}

fn filename_prefix(mode: EditMode) -> &'static str {
    match mode {
        EditMode::Masked => "edited_image_",
        EditMode::Free => "free_edit_",
    }
}

impl ImageEditingAgent {
    pub fn new(editor: Arc<dyn ImageEditor>, cache: ImageCache, artifacts: ArtifactStore) -> Self {
        Self {
            editor,
            cache,
            artifacts,
        }
    }

    /// Latest artifact version first, then the image cache.
    async fn source_image(&self, filename: &str) -> MarketingResult<Option<Bytes>> {
        if let Some(artifact) = self.artifacts.load(filename, None) {
            debug!(filename, version = artifact.version, "Editing from artifact");
            return Ok(Some(artifact.data));
        }
        self.cache.load(filename).await
    }

    pub async fn edit(
        &self,
        image_filename: &str,
        prompt: &str,
        mode: Option<EditMode>,
    ) -> MarketingResult<ImageToolOutput> {
        let mode = mode.unwrap_or_else(|| EditMode::select(prompt));

        let source = match self.source_image(image_filename).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                warn!(image = %image_filename, "Image to edit not found");
                return Ok(self.annotate(
                    ImageToolOutput::failed(prompt, format!("Image '{image_filename}' not found")),
                    image_filename,
                    mode,
                ));
            }
            Err(e) => {
                warn!(image = %image_filename, error = %e, "Could not read image to edit");
                return Ok(self.annotate(
                    ImageToolOutput::failed(prompt, e.to_string()),
                    image_filename,
                    mode,
                ));
            }
        };

        let request = ImageEditRequest {
            prompt: prompt.to_string(),
            source,
            mode,
        };
        let edited = self.editor.edit_image(&request).await?;
        let image = edited.into_iter().next().ok_or_else(|| {
            MarketingError::GenerationFailed("image editing returned no images".into())
        })?;

        metrics::counter!("images.edited").increment(1);
        let filename = format!("{}{}.png", filename_prefix(mode), sanitize_prompt(prompt));
        info!(
            source = %image_filename,
            filename = %filename,
            edit_mode = mode.api_edit_mode(),
            "Image edited"
        );

        let output = persist_image(&self.cache, &self.artifacts, &image, filename, prompt).await;
        Ok(self.annotate(output, image_filename, mode))
    }

    fn annotate(&self, mut output: ImageToolOutput, requested: &str, mode: EditMode) -> ImageToolOutput {
        output.requested_image = Some(requested.to_string());
        output.edit_mode = Some(mode.api_edit_mode().to_string());
        output.mask_mode = mode.mask_mode().map(str::to_string);
        output
    }
}
