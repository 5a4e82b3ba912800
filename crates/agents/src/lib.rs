//! Agent tree of the marketing assistant: a root agent dispatching to the
//! image generation and image editing sub-agents and to the ad-copy pipeline.

pub mod editing;
pub mod generation;
pub mod persist;
pub mod prompts;
pub mod root;
pub mod session;
pub mod tools;

pub use editing::ImageEditingAgent;
pub use generation::ImageGenerationAgent;
pub use root::{Backends, RootAgent};
pub use session::SessionState;
pub use tools::{AgentReply, AgentTool, ImageToolOutput};
