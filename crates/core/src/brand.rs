//! Client brand profile and visual identity.
//!
//! Both are plain configuration data. The copy pipeline reads the profile for
//! voice, messaging and phrase rules; the image sub-agents read the visual
//! identity when enhancing prompts.

use crate::types::AdRequest;
use serde::{Deserialize, Serialize};

/// Verbal identity of the client the assistant writes for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandProfile {
    pub client_name: String,
    pub industry: String,
    pub mission: String,
    pub brand_voice_attributes: Vec<String>,
    pub key_messaging: Vec<String>,
    pub preferred_phrases: Vec<String>,
    pub avoided_phrases: Vec<String>,
    /// How the client refers to its staff, e.g. "Gear Guides".
    pub team_reference: String,
    pub unique_value_props: Vec<String>,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            client_name: "Our Company".to_string(),
            industry: "retail".to_string(),
            mission: "helping customers find the right products with confidence".to_string(),
            brand_voice_attributes: vec![
                "friendly".to_string(),
                "knowledgeable".to_string(),
                "trustworthy".to_string(),
            ],
            key_messaging: Vec::new(),
            preferred_phrases: Vec::new(),
            avoided_phrases: Vec::new(),
            team_reference: "team".to_string(),
            unique_value_props: Vec::new(),
        }
    }
}

impl BrandProfile {
    /// Voice attributes for a request: the request's own list when it has
    /// one, otherwise the profile's.
    pub fn voice_attributes_for<'a>(&'a self, request: &'a AdRequest) -> &'a [String] {
        match request.brand_voice.as_deref() {
            Some(voice) if voice.iter().any(|v| !v.trim().is_empty()) => voice,
            _ => &self.brand_voice_attributes,
        }
    }
}

/// A named brand colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandColor {
    pub name: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoGuidelines {
    pub style: String,
    pub colors: String,
    pub elements: String,
    pub restrictions: String,
}

impl Default for LogoGuidelines {
    fn default() -> Self {
        Self {
            style: "Clean wordmark with generous clear space".to_string(),
            colors: "Primary colour on light backgrounds, white on dark".to_string(),
            elements: "Wordmark only".to_string(),
            restrictions: "Never place over busy imagery".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageryStyle {
    pub composition: String,
    pub subject_matter: String,
    pub setting: String,
    pub mood: String,
    pub style: String,
    pub avoid: String,
}

impl Default for ImageryStyle {
    fn default() -> Self {
        Self {
            composition: "Uncluttered compositions with a single clear focal point".to_string(),
            subject_matter: "Real customers using the products".to_string(),
            setting: "Natural, everyday settings".to_string(),
            mood: "Warm and optimistic".to_string(),
            style: "Photographic, natural light".to_string(),
            avoid: "stock-photo poses and heavy filters".to_string(),
        }
    }
}

/// Visual identity applied when enhancing image prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualIdentity {
    pub primary: BrandColor,
    pub secondary: BrandColor,
    pub accent: BrandColor,
    pub brand_personality: String,
    pub logo: LogoGuidelines,
    pub imagery: ImageryStyle,
}

impl Default for VisualIdentity {
    fn default() -> Self {
        Self {
            primary: BrandColor {
                name: "Primary Blue".to_string(),
                hex: "#0052CC".to_string(),
            },
            secondary: BrandColor {
                name: "Secondary Teal".to_string(),
                hex: "#00B8D9".to_string(),
            },
            accent: BrandColor {
                name: "Accent Orange".to_string(),
                hex: "#FF5630".to_string(),
            },
            brand_personality: "Dependable and approachable".to_string(),
            logo: LogoGuidelines::default(),
            imagery: ImageryStyle::default(),
        }
    }
}
