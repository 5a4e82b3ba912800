use crate::brand::{BrandProfile, VisualIdentity};
use crate::error::{MarketingError, MarketingResult};
use serde::Deserialize;
use std::path::Path;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `MARKETING_ASSISTANT__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Human-readable logs unless JSON is forced on the command line.
    #[serde(default)]
    pub development: bool,
    #[serde(default)]
    pub genai: GenAiConfig,
    #[serde(default)]
    pub copy: CopyConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub brand: BrandProfile,
    #[serde(default)]
    pub visual: VisualIdentity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenAiConfig {
    #[serde(default)]
    pub use_vertexai: bool,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// OAuth bearer token for Vertex AI requests.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Conversational model for a hosted agent runtime. Checked against the
    /// model catalogue at startup; tool dispatch itself never calls it.
    #[serde(default = "default_agent_model")]
    pub agent_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_edit_model")]
    pub edit_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CopyConfig {
    /// Regenerations allowed per component before trimming.
    #[serde(default = "default_max_regenerations")]
    pub max_regenerations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "default_number_of_images")]
    pub number_of_images: u32,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

// Default functions
fn default_location() -> String {
    "us-central1".to_string()
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_text_model() -> String {
    "gemini-2.0-flash-001".to_string()
}
fn default_agent_model() -> String {
    "gemini-2.5-pro-preview-05-06".to_string()
}
fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}
fn default_edit_model() -> String {
    "imagen-3.0-capability-001".to_string()
}
fn default_temperature() -> f32 {
    0.01
}
fn default_max_regenerations() -> u32 {
    2
}
fn default_cache_dir() -> String {
    ".cache".to_string()
}
fn default_number_of_images() -> u32 {
    2
}
fn default_aspect_ratio() -> String {
    "1:1".to_string()
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            use_vertexai: false,
            project: None,
            location: default_location(),
            api_key: None,
            access_token: None,
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            text_model: default_text_model(),
            agent_model: default_agent_model(),
            image_model: default_image_model(),
            edit_model: default_edit_model(),
            temperature: default_temperature(),
        }
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            max_regenerations: default_max_regenerations(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            number_of_images: default_number_of_images(),
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

const LIST_KEYS: [&str; 5] = [
    "brand.brand_voice_attributes",
    "brand.key_messaging",
    "brand.preferred_phrases",
    "brand.avoided_phrases",
    "brand.unique_value_props",
];

impl AppConfig {
    /// Load configuration from an optional config file, then environment
    /// variables (which win).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let mut env = config::Environment::with_prefix("MARKETING_ASSISTANT")
            .separator("__")
            .try_parsing(true)
            .list_separator(",");
        for key in LIST_KEYS {
            env = env.with_list_parse_key(key);
        }

        let config = builder.add_source(env).build()?;
        config.try_deserialize()
    }

    /// Check cross-field requirements of the generation service settings.
    pub fn validate(&self) -> MarketingResult<()> {
        let genai = &self.genai;
        if genai.use_vertexai {
            if genai.project.as_deref().is_none_or(str::is_empty) {
                return Err(MarketingError::Config(
                    "genai.project must be provided when genai.use_vertexai is true".to_string(),
                ));
            }
            if genai.access_token.as_deref().is_none_or(str::is_empty) {
                return Err(MarketingError::Config(
                    "genai.access_token must be provided when genai.use_vertexai is true"
                        .to_string(),
                ));
            }
        } else if genai.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(MarketingError::Config(
                "genai.api_key must be provided when genai.use_vertexai is false".to_string(),
            ));
        }
        if self.images.number_of_images == 0 {
            return Err(MarketingError::Config(
                "images.number_of_images must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
