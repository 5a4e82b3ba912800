//! Catalogue of the Gemini and Imagen model identifiers the assistant uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeminiModel {
    #[serde(rename = "gemini-2.0-flash-lite")]
    Gemini20FlashLite,
    #[default]
    #[serde(rename = "gemini-2.0-flash-001")]
    Gemini20Flash,
    #[serde(rename = "imagen-3.0-generate-002")]
    Imagen30Generate,
    /// Editing model; requires Vertex AI.
    #[serde(rename = "imagen-3.0-capability-001")]
    Imagen30Edit,
    #[serde(rename = "gemini-2.5-flash-preview-04-17")]
    Gemini25Flash,
    #[serde(rename = "gemini-2.5-pro-preview-05-06")]
    Gemini25Pro,
}

impl GeminiModel {
    pub const ALL: [GeminiModel; 6] = [
        GeminiModel::Gemini20FlashLite,
        GeminiModel::Gemini20Flash,
        GeminiModel::Imagen30Generate,
        GeminiModel::Imagen30Edit,
        GeminiModel::Gemini25Flash,
        GeminiModel::Gemini25Pro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeminiModel::Gemini20FlashLite => "gemini-2.0-flash-lite",
            GeminiModel::Gemini20Flash => "gemini-2.0-flash-001",
            GeminiModel::Imagen30Generate => "imagen-3.0-generate-002",
            GeminiModel::Imagen30Edit => "imagen-3.0-capability-001",
            GeminiModel::Gemini25Flash => "gemini-2.5-flash-preview-04-17",
            GeminiModel::Gemini25Pro => "gemini-2.5-pro-preview-05-06",
        }
    }

    pub fn is_imagen(&self) -> bool {
        matches!(self, GeminiModel::Imagen30Generate | GeminiModel::Imagen30Edit)
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeminiModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeminiModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                let available = GeminiModel::ALL
                    .iter()
                    .map(|m| format!("'{}'", m.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("'{s}' is not a valid Gemini model. Available models: {available}")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_model() {
        let model: GeminiModel = "imagen-3.0-generate-002".parse().unwrap();
        assert_eq!(model, GeminiModel::Imagen30Generate);
        assert!(model.is_imagen());
        assert_eq!(GeminiModel::default().as_str(), "gemini-2.0-flash-001");
    }

    #[test]
    fn test_unknown_model_lists_available() {
        let err = "gpt-4".parse::<GeminiModel>().unwrap_err();
        assert!(err.starts_with("'gpt-4' is not a valid Gemini model"));
        assert!(err.contains("'gemini-2.5-pro-preview-05-06'"));
    }
}
