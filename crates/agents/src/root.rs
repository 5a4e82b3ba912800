//! Root agent: routes tool calls to the image sub-agents and the copy
//! pipeline, recording outputs in the caller's session.

use crate::editing::ImageEditingAgent;
use crate::generation::ImageGenerationAgent;
use crate::session::{
    SessionState, AD_COPY_OUTPUT, IMAGE_EDITING_OUTPUT, IMAGE_EDITING_REQUEST,
    IMAGE_GENERATION_OUTPUT,
};
use crate::tools::{AgentReply, AgentTool};
use chrono::Local;
use marketing_cache::{ArtifactStore, ImageCache};
use marketing_copy::{CopyComposer, CopyService};
use marketing_core::{AppConfig, MarketingResult};
use marketing_genai::{ImageEditor, ImageGenerator, TextGenerator};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// The generation backends an agent tree runs on.
#[derive(Clone)]
pub struct Backends {
    pub text: Arc<dyn TextGenerator>,
    pub images: Arc<dyn ImageGenerator>,
    pub editor: Arc<dyn ImageEditor>,
}

pub struct RootAgent {
    generation: ImageGenerationAgent,
    editing: ImageEditingAgent,
    copy: CopyService,
    artifacts: ArtifactStore,
}

impl RootAgent {
    pub fn new(
        generation: ImageGenerationAgent,
        editing: ImageEditingAgent,
        copy: CopyService,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            generation,
            editing,
            copy,
            artifacts,
        }
    }

    /// Wire the sub-agents from configuration. Both image agents share one
    /// cache directory and one artifact store.
    pub fn from_config(config: &AppConfig, backends: Backends) -> Self {
        let cache = ImageCache::new(&config.images.cache_dir);
        let artifacts = ArtifactStore::new();

        let generation = ImageGenerationAgent::new(
            backends.text.clone(),
            backends.images,
            cache.clone(),
            artifacts.clone(),
        )
        .with_brand(config.brand.clone(), config.visual.clone())
        .with_image_config(&config.images);

        let editing = ImageEditingAgent::new(backends.editor, cache, artifacts.clone());

        let composer = CopyComposer::new(backends.text, config.brand.clone())
            .with_max_regenerations(config.copy.max_regenerations)
            .with_temperature(config.genai.temperature);

        info!(
            cache_dir = %config.images.cache_dir,
            max_regenerations = config.copy.max_regenerations,
            "Root agent ready"
        );
        Self::new(generation, editing, CopyService::new(composer), artifacts)
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub async fn dispatch(
        &self,
        tool: AgentTool,
        session: &mut SessionState,
    ) -> MarketingResult<AgentReply> {
        metrics::counter!("agent.tool_calls", "tool" => tool.name()).increment(1);
        debug!(session = %session.id(), tool = tool.name(), "Dispatching tool call");

        match tool {
            AgentTool::GenerateImage { prompt } => {
                let output = self.generation.generate(&prompt).await?;
                session.set_json(IMAGE_GENERATION_OUTPUT, &output)?;
                Ok(AgentReply::Image(output))
            }
            AgentTool::EditImage {
                image_filename,
                prompt,
                mode,
            } => {
                let request =
                    format!("Edit image '{image_filename}' with the following prompt: {prompt}.");
                session.set(IMAGE_EDITING_REQUEST, Value::String(request));
                let output = self.editing.edit(&image_filename, &prompt, mode).await?;
                session.set_json(IMAGE_EDITING_OUTPUT, &output)?;
                Ok(AgentReply::Image(output))
            }
            AgentTool::WriteAdCopy(request) => {
                let request = session.merge_request(request);
                let outcome = self.copy.write(&request).await?;
                session.set_json(AD_COPY_OUTPUT, &outcome)?;
                Ok(AgentReply::Copy(outcome))
            }
            AgentTool::ListArtifacts => Ok(AgentReply::Artifacts(self.artifacts.list())),
            AgentTool::CurrentDate => Ok(AgentReply::Date(
                Local::now().date_naive().format("%B %d, %Y").to_string(),
            )),
        }
    }
}
