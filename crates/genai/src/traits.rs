use async_trait::async_trait;
use bytes::Bytes;
use marketing_core::MarketingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Empty response: {0}")]
    EmptyResponse(String),
    #[error("Client configuration error: {0}")]
    Config(String),
}

pub type GenAiResult<T> = Result<T, GenAiError>;

impl From<GenAiError> for MarketingError {
    fn from(err: GenAiError) -> Self {
        MarketingError::GenerationFailed(err.to_string())
    }
}

/// A text generation call: ordered content parts sent as one user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrompt {
    pub parts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl TextPrompt {
    pub fn new(parts: Vec<String>) -> Self {
        Self {
            parts,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// All parts joined, for logging and assertions.
    pub fn text(&self) -> String {
        self.parts.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub number_of_images: u32,
    pub aspect_ratio: String,
    pub enhance_prompt: bool,
}

/// How an edit is applied to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Foreground-masked inpainting: replaces or enhances specific objects.
    Masked,
    /// Unmasked edit of the whole image: style, background, mood.
    Free,
}

impl EditMode {
    /// Edit mode identifier on the wire.
    pub fn api_edit_mode(&self) -> &'static str {
        match self {
            EditMode::Masked => "EDIT_MODE_INPAINT_INSERTION",
            EditMode::Free => "EDIT_MODE_DEFAULT",
        }
    }

    pub fn mask_mode(&self) -> Option<&'static str> {
        match self {
            EditMode::Masked => Some("MASK_MODE_FOREGROUND"),
            EditMode::Free => None,
        }
    }

    /// Pick a mode from the wording of an edit prompt: whole-image changes go
    /// to [`EditMode::Free`], everything else is a masked object edit.
    pub fn select(prompt: &str) -> Self {
        const GLOBAL_TERMS: &[&str] = &[
            "background",
            "style",
            "atmosphere",
            "mood",
            "colour",
            "color",
            "lighting",
            "overall",
            "entire",
            "whole",
        ];
        let prompt = prompt.to_lowercase();
        if GLOBAL_TERMS.iter().any(|term| prompt.contains(term)) {
            EditMode::Free
        } else {
            EditMode::Masked
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageEditRequest {
    pub prompt: String,
    pub source: Bytes,
    pub mode: EditMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub bytes: Bytes,
    pub mime_type: String,
}

/// Free-text generation (ad copy, prompt enhancement).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &TextPrompt) -> GenAiResult<String>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Text-to-image synthesis.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> GenAiResult<Vec<GeneratedImage>>;
}

/// Prompt-driven editing of an existing image.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    async fn edit_image(&self, request: &ImageEditRequest) -> GenAiResult<Vec<GeneratedImage>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mode_selection() {
        assert_eq!(EditMode::select("Change the background to a beach"), EditMode::Free);
        assert_eq!(EditMode::select("Warmer LIGHTING please"), EditMode::Free);
        assert_eq!(EditMode::select("Replace the mug with a teapot"), EditMode::Masked);
    }

    #[test]
    fn test_wire_identifiers() {
        assert_eq!(EditMode::Masked.api_edit_mode(), "EDIT_MODE_INPAINT_INSERTION");
        assert_eq!(EditMode::Free.api_edit_mode(), "EDIT_MODE_DEFAULT");
        assert_eq!(EditMode::Free.mask_mode(), None);
    }

    #[test]
    fn test_genai_error_converts_to_generation_failed() {
        let err: MarketingError = GenAiError::EmptyResponse("SAFETY".into()).into();
        assert!(matches!(err, MarketingError::GenerationFailed(msg) if msg.contains("SAFETY")));
    }
}
