//! Tool calls the root agent routes, and what they return.

use marketing_cache::ArtifactInfo;
use marketing_copy::CopyOutcome;
use marketing_core::{AdFormat, AdRequest, MarketingResult};
use marketing_genai::EditMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum AgentTool {
    GenerateImage {
        prompt: String,
    },
    EditImage {
        image_filename: String,
        prompt: String,
        /// Chosen from the prompt wording when absent.
        #[serde(default)]
        mode: Option<EditMode>,
    },
    WriteAdCopy(AdRequest),
    ListArtifacts,
    CurrentDate,
}

impl AgentTool {
    pub fn name(&self) -> &'static str {
        match self {
            AgentTool::GenerateImage { .. } => "generate_image",
            AgentTool::EditImage { .. } => "edit_image",
            AgentTool::WriteAdCopy(_) => "write_ad_copy",
            AgentTool::ListArtifacts => "list_artifacts",
            AgentTool::CurrentDate => "current_date",
        }
    }

    /// Parse a JSON tool call. An unrecognised ad format is reported as
    /// `UnknownFormat` rather than a serialization error.
    pub fn from_json(input: &str) -> MarketingResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        if let Some(format) = value.get("format").and_then(Value::as_str) {
            AdFormat::parse(format)?;
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Metadata returned by the image sub-agents.
///
/// Storage failures are reported here with `success: false`, not as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageToolOutput {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_mode: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageToolOutput {
    pub fn saved(prompt: &str, filename: String, version: u32, mime_type: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            requested_image: None,
            artifact_filename: Some(filename),
            artifact_version: Some(version),
            mime_type: Some(mime_type.to_string()),
            edit_mode: None,
            mask_mode: None,
            success: true,
            error: None,
        }
    }

    pub fn failed(prompt: &str, error: impl Into<String>) -> Self {
        Self {
            prompt: prompt.to_string(),
            requested_image: None,
            artifact_filename: None,
            artifact_version: None,
            mime_type: None,
            edit_mode: None,
            mask_mode: None,
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum AgentReply {
    Image(ImageToolOutput),
    Copy(CopyOutcome),
    Artifacts(Vec<ArtifactInfo>),
    Date(String),
}

impl AgentReply {
    /// Text shown to the requester.
    pub fn to_text(&self) -> String {
        match self {
            AgentReply::Image(output) if output.success => {
                let mut text = format!(
                    "Saved {} (version {}).",
                    output.artifact_filename.as_deref().unwrap_or_default(),
                    output.artifact_version.unwrap_or_default()
                );
                if let Some(mode) = &output.edit_mode {
                    let _ = write!(text, " Edit mode: {mode}.");
                }
                text
            }
            AgentReply::Image(output) => format!(
                "Image request failed: {}",
                output.error.as_deref().unwrap_or("unknown error")
            ),
            AgentReply::Copy(CopyOutcome::Clarification(clarification)) => {
                clarification.question.clone()
            }
            AgentReply::Copy(CopyOutcome::Composed {
                confirmation,
                rendered,
                ..
            }) => match confirmation {
                Some(line) => format!("{line}\n\n{rendered}"),
                None => rendered.clone(),
            },
            AgentReply::Artifacts(artifacts) if artifacts.is_empty() => {
                "No artifacts saved yet.".to_string()
            }
            AgentReply::Artifacts(artifacts) => artifacts
                .iter()
                .map(|a| format!("- {} (version {}, {})", a.filename, a.latest_version, a.mime_type))
                .collect::<Vec<_>>()
                .join("\n"),
            AgentReply::Date(date) => format!("Today's date is {date}."),
        }
    }
}
