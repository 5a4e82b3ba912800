//! Generation-service seam: text, image generation and image editing behind
//! async traits, with a Gemini/Imagen HTTP implementation and scripted
//! in-memory backends.

pub mod gemini;
pub mod mock;
pub mod models;
pub mod traits;

pub use gemini::GeminiClient;
pub use mock::{ScriptedGenerator, StaticImageBackend};
pub use models::GeminiModel;
pub use traits::{
    EditMode, GenAiError, GenAiResult, GeneratedImage, ImageEditRequest, ImageEditor,
    ImageGenerationRequest, ImageGenerator, TextGenerator, TextPrompt,
};
