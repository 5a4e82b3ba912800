use crate::models::GeminiModel;
use crate::traits::*;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use marketing_core::config::GenAiConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Where requests go and how they authenticate.
#[derive(Debug, Clone)]
enum Endpoint {
    /// Gemini Developer API keyed by `x-goog-api-key`.
    ApiKey { base_url: String, api_key: String },
    /// Vertex AI publisher models with an OAuth bearer token.
    Vertex {
        base_url: String,
        project: String,
        location: String,
        access_token: String,
    },
}

/// Client for Gemini text generation and Imagen image generation/editing.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Endpoint,
    text_model: GeminiModel,
    image_model: GeminiModel,
    edit_model: GeminiModel,
    temperature: f32,
}

// Gemini generateContent request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    /// Parts may be missing if the response was truncated (e.g., MAX_TOKENS)
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

// Imagen predict request format
#[derive(Debug, Serialize)]
struct PredictRequest<I, P> {
    instances: Vec<I>,
    parameters: P,
}

#[derive(Debug, Serialize)]
struct GenerateInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateParameters {
    sample_count: u32,
    aspect_ratio: String,
    enhance_prompt: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditInstance {
    prompt: String,
    reference_images: Vec<ReferenceImage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceImage {
    reference_type: &'static str,
    reference_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_image: Option<InlineImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mask_image_config: Option<MaskImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineImage {
    bytes_base64_encoded: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MaskImageConfig {
    mask_mode: &'static str,
    dilation: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditParameters {
    edit_mode: &'static str,
    sample_count: u32,
    include_rai_reason: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    safety_setting: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    person_generation: Option<&'static str>,
    output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    rai_filtered_reason: Option<String>,
}

fn parse_model(name: &str) -> GenAiResult<GeminiModel> {
    name.parse::<GeminiModel>().map_err(GenAiError::Config)
}

impl GeminiClient {
    /// Build a client from the `genai` configuration section.
    pub fn from_config(config: &GenAiConfig) -> GenAiResult<Self> {
        let endpoint = if config.use_vertexai {
            let project = config
                .project
                .clone()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| GenAiError::Config("Vertex AI requires a project".to_string()))?;
            let access_token = config
                .access_token
                .clone()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    GenAiError::Config("Vertex AI requires an access token".to_string())
                })?;
            Endpoint::Vertex {
                base_url: config.base_url.clone().unwrap_or_else(|| {
                    format!("https://{}-aiplatform.googleapis.com/v1", config.location)
                }),
                project,
                location: config.location.clone(),
                access_token,
            }
        } else {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    GenAiError::Config("an API key is required without Vertex AI".to_string())
                })?;
            Endpoint::ApiKey {
                base_url: config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                api_key,
            }
        };

        parse_model(&config.agent_model)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GenAiError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            text_model: parse_model(&config.text_model)?,
            image_model: parse_model(&config.image_model)?,
            edit_model: parse_model(&config.edit_model)?,
            temperature: config.temperature,
        })
    }

    pub fn text_model(&self) -> GeminiModel {
        self.text_model
    }

    fn method_url(&self, model: GeminiModel, method: &str) -> String {
        match &self.endpoint {
            Endpoint::ApiKey { base_url, .. } => {
                format!("{}/models/{}:{}", base_url, model, method)
            }
            Endpoint::Vertex {
                base_url,
                project,
                location,
                ..
            } => format!(
                "{}/projects/{}/locations/{}/publishers/google/models/{}:{}",
                base_url, project, location, model, method
            ),
        }
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> GenAiResult<R> {
        let request = self.client.post(url).json(body);
        let request = match &self.endpoint {
            Endpoint::ApiKey { api_key, .. } => request.header("x-goog-api-key", api_key),
            Endpoint::Vertex { access_token, .. } => request.bearer_auth(access_token),
        };

        let response = request
            .send()
            .await
            .map_err(|e| GenAiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| GenAiError::InvalidResponse(e.to_string()))
    }

    fn decode_predictions(response: PredictResponse) -> GenAiResult<Vec<GeneratedImage>> {
        let mut images = Vec::new();
        for prediction in response.predictions {
            let Some(encoded) = prediction.bytes_base64_encoded else {
                if let Some(reason) = prediction.rai_filtered_reason {
                    debug!(reason = %reason, "prediction filtered");
                }
                continue;
            };
            let bytes = BASE64
                .decode(encoded.as_bytes())
                .map_err(|e| GenAiError::InvalidResponse(format!("bad image payload: {e}")))?;
            images.push(GeneratedImage {
                bytes: Bytes::from(bytes),
                mime_type: prediction
                    .mime_type
                    .unwrap_or_else(|| "image/png".to_string()),
            });
        }
        Ok(images)
    }
}

fn candidate_text(response: GeminiResponse) -> GenAiResult<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenAiError::EmptyResponse("no candidates returned".to_string()))?;

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "no text".to_string());
        return Err(GenAiError::EmptyResponse(reason));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &TextPrompt) -> GenAiResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: prompt
                    .parts
                    .iter()
                    .map(|text| GeminiPart { text: text.clone() })
                    .collect(),
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: prompt.temperature.unwrap_or(self.temperature),
            }),
        };

        let url = self.method_url(self.text_model, "generateContent");
        debug!(model = %self.text_model, parts = prompt.parts.len(), "generateContent");
        let response: GeminiResponse = self.post_json(&url, &request).await?;
        candidate_text(response)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> GenAiResult<Vec<GeneratedImage>> {
        let body = PredictRequest {
            instances: vec![GenerateInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: GenerateParameters {
                sample_count: request.number_of_images,
                aspect_ratio: request.aspect_ratio.clone(),
                enhance_prompt: request.enhance_prompt,
            },
        };

        let url = self.method_url(self.image_model, "predict");
        debug!(model = %self.image_model, count = request.number_of_images, "imagen generate");
        let response: PredictResponse = self.post_json(&url, &body).await?;
        Self::decode_predictions(response)
    }
}

#[async_trait]
impl ImageEditor for GeminiClient {
    async fn edit_image(&self, request: &ImageEditRequest) -> GenAiResult<Vec<GeneratedImage>> {
        if !matches!(self.endpoint, Endpoint::Vertex { .. }) {
            return Err(GenAiError::Config(
                "image editing is only available through Vertex AI".to_string(),
            ));
        }

        let mut reference_images = vec![ReferenceImage {
            reference_type: "REFERENCE_TYPE_RAW",
            reference_id: 1,
            reference_image: Some(InlineImage {
                bytes_base64_encoded: BASE64.encode(&request.source),
            }),
            mask_image_config: None,
        }];
        if let Some(mask_mode) = request.mode.mask_mode() {
            reference_images.push(ReferenceImage {
                reference_type: "REFERENCE_TYPE_MASK",
                reference_id: 2,
                reference_image: None,
                mask_image_config: Some(MaskImageConfig {
                    mask_mode,
                    dilation: 0.1,
                }),
            });
        }

        let free = request.mode == EditMode::Free;
        let body = PredictRequest {
            instances: vec![EditInstance {
                prompt: request.prompt.clone(),
                reference_images,
            }],
            parameters: EditParameters {
                edit_mode: request.mode.api_edit_mode(),
                sample_count: 1,
                include_rai_reason: true,
                safety_setting: free.then_some("block_only_high"),
                person_generation: free.then_some("dont_allow"),
                output_options: OutputOptions {
                    mime_type: "image/png",
                },
            },
        };

        let url = self.method_url(self.edit_model, "predict");
        debug!(model = %self.edit_model, mode = ?request.mode, "imagen edit");
        let response: PredictResponse = self.post_json(&url, &body).await?;
        Self::decode_predictions(response)
    }
}
