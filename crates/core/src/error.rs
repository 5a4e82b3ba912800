use crate::types::{Clarification, Component};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type MarketingResult<T> = Result<T, MarketingError>;

#[derive(Error, Debug)]
pub enum MarketingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown ad format '{0}': expected one of BANNER_AD, SOCIAL_MEDIA_POST, EMAIL, BLOG_POST, BILLBOARD, POSTER, DIRECT_MAIL or GENERAL")]
    UnknownFormat(String),

    #[error("Incomplete request: {}", .0.question)]
    IncompleteRequest(Clarification),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Image cache error: {0}")]
    Cache(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A generated component that exceeded its word limit.
///
/// Recovered locally by regeneration or trimming; it only reaches the caller
/// as a record on an approximate [`crate::types::AdCopy`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{component} has {actual} words, limit is {limit}")]
pub struct ComponentTooLong {
    pub component: Component,
    pub limit: usize,
    pub actual: usize,
}
