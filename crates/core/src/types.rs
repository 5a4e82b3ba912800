use crate::error::{ComponentTooLong, MarketingError, MarketingResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Formats ────────────────────────────────────────────────────────────

/// Advertisement formats with a fixed word-limit table.
///
/// Deserializes through [`FromStr`], so the same aliases are accepted from
/// JSON as from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum FormatName {
    BannerAd,
    SocialMediaPost,
    Email,
    BlogPost,
    Billboard,
    Poster,
    DirectMail,
}

impl FormatName {
    pub const ALL: [FormatName; 7] = [
        FormatName::BannerAd,
        FormatName::SocialMediaPost,
        FormatName::Email,
        FormatName::BlogPost,
        FormatName::Billboard,
        FormatName::Poster,
        FormatName::DirectMail,
    ];

    /// Canonical identifier, e.g. `BANNER_AD`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatName::BannerAd => "BANNER_AD",
            FormatName::SocialMediaPost => "SOCIAL_MEDIA_POST",
            FormatName::Email => "EMAIL",
            FormatName::BlogPost => "BLOG_POST",
            FormatName::Billboard => "BILLBOARD",
            FormatName::Poster => "POSTER",
            FormatName::DirectMail => "DIRECT_MAIL",
        }
    }

    /// Upper-case label used in the `AD COPY - ...` heading.
    pub fn label(&self) -> &'static str {
        match self {
            FormatName::BannerAd => "BANNER AD",
            FormatName::SocialMediaPost => "SOCIAL MEDIA POST",
            FormatName::Email => "EMAIL",
            FormatName::BlogPost => "BLOG POST",
            FormatName::Billboard => "BILLBOARD",
            FormatName::Poster => "POSTER",
            FormatName::DirectMail => "DIRECT MAIL",
        }
    }

    /// Human-facing name used in summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            FormatName::BannerAd => "Banner Ad",
            FormatName::SocialMediaPost => "Social Media Post",
            FormatName::Email => "Email",
            FormatName::BlogPost => "Blog Post",
            FormatName::Billboard => "Billboard",
            FormatName::Poster => "Poster",
            FormatName::DirectMail => "Direct Mail",
        }
    }
}

impl fmt::Display for FormatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize_format(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

impl FromStr for FormatName {
    type Err = MarketingError;

    /// Accepts canonical names in any case, with spaces or hyphens instead of
    /// underscores, and the plural forms used in format guides ("BANNER ADS").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_format(s).as_str() {
            "BANNER_AD" | "BANNER_ADS" | "BANNER" => Ok(FormatName::BannerAd),
            "SOCIAL_MEDIA_POST" | "SOCIAL_MEDIA_POSTS" | "SOCIAL_MEDIA" => {
                Ok(FormatName::SocialMediaPost)
            }
            "EMAIL" | "EMAILS" => Ok(FormatName::Email),
            "BLOG_POST" | "BLOG_POSTS" | "BLOG" => Ok(FormatName::BlogPost),
            "BILLBOARD" | "BILLBOARDS" => Ok(FormatName::Billboard),
            "POSTER" | "POSTERS" => Ok(FormatName::Poster),
            "DIRECT_MAIL" => Ok(FormatName::DirectMail),
            _ => Err(MarketingError::UnknownFormat(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for FormatName {
    type Error = MarketingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Effective format of a composition: a table format or the unconstrained
/// `GENERAL` mode used when no format was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdFormat {
    Specified(FormatName),
    General,
}

impl AdFormat {
    /// Parse user input. Empty input and `GENERAL` select the unconstrained mode.
    pub fn parse(input: &str) -> MarketingResult<Self> {
        let normalized = normalize_format(input);
        if normalized.is_empty() || normalized == "GENERAL" {
            return Ok(AdFormat::General);
        }
        FormatName::from_str(input).map(AdFormat::Specified)
    }

    pub fn format_name(&self) -> Option<FormatName> {
        match self {
            AdFormat::Specified(name) => Some(*name),
            AdFormat::General => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdFormat::Specified(name) => name.label(),
            AdFormat::General => "GENERAL",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AdFormat::Specified(name) => name.display_name(),
            AdFormat::General => "General Use",
        }
    }
}

// ─── Components ─────────────────────────────────────────────────────────

/// The five message components every piece of ad copy is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Component {
    Headline,
    BenefitStatement,
    SupportingEvidence,
    ValueAlignment,
    CallToAction,
}

impl Component {
    /// Rendering order.
    pub const ALL: [Component; 5] = [
        Component::Headline,
        Component::BenefitStatement,
        Component::SupportingEvidence,
        Component::ValueAlignment,
        Component::CallToAction,
    ];

    pub fn index(&self) -> usize {
        match self {
            Component::Headline => 0,
            Component::BenefitStatement => 1,
            Component::SupportingEvidence => 2,
            Component::ValueAlignment => 3,
            Component::CallToAction => 4,
        }
    }

    /// Label used in rendered output, e.g. `BENEFIT STATEMENT`.
    pub fn label(&self) -> &'static str {
        match self {
            Component::Headline => "HEADLINE",
            Component::BenefitStatement => "BENEFIT STATEMENT",
            Component::SupportingEvidence => "SUPPORTING EVIDENCE",
            Component::ValueAlignment => "VALUE ALIGNMENT",
            Component::CallToAction => "CALL TO ACTION",
        }
    }

    /// What the component has to achieve, used when prompting for it.
    pub fn purpose(&self) -> &'static str {
        match self {
            Component::Headline => "Attention-grabbing opening",
            Component::BenefitStatement => "Clear value proposition",
            Component::SupportingEvidence => {
                "Proof points, statistics, testimonials, product features that back up benefits"
            }
            Component::ValueAlignment => "Connect with audience values/emotions",
            Component::CallToAction => "Specific next step for audience",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Requests ───────────────────────────────────────────────────────────

/// Marketing inputs for one ad-copy turn.
///
/// `existing_copy` selects the improve path; in that case product and
/// audience may be filled in from the copy instead of being asked for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdRequest {
    #[serde(default)]
    pub product_or_service: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub promotion_details: Option<String>,
    /// `GENERAL` or an empty string deserialize to `None`.
    #[serde(default, deserialize_with = "deserialize_format")]
    pub format: Option<FormatName>,
    #[serde(default)]
    pub brand_voice: Option<Vec<String>>,
    #[serde(default)]
    pub existing_copy: Option<String>,
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<Option<FormatName>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => AdFormat::parse(&raw)
            .map(|format| format.format_name())
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl AdRequest {
    pub fn new(product_or_service: impl Into<String>, target_audience: impl Into<String>) -> Self {
        Self {
            product_or_service: product_or_service.into(),
            target_audience: target_audience.into(),
            ..Default::default()
        }
    }

    pub fn with_promotion(mut self, details: impl Into<String>) -> Self {
        self.promotion_details = Some(details.into());
        self
    }

    pub fn with_format(mut self, format: FormatName) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_brand_voice(mut self, attributes: Vec<String>) -> Self {
        self.brand_voice = Some(attributes);
        self
    }

    pub fn improving(mut self, existing_copy: impl Into<String>) -> Self {
        self.existing_copy = Some(existing_copy.into());
        self
    }

    pub fn is_improvement(&self) -> bool {
        self.existing_copy
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    pub fn effective_format(&self) -> AdFormat {
        self.format.map_or(AdFormat::General, AdFormat::Specified)
    }

    /// Promotion text if one was given and is non-blank.
    pub fn promotion(&self) -> Option<&str> {
        self.promotion_details
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Why composition could not proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarificationReason {
    MissingProduct,
    MissingAudience,
    VaguePromotion,
    UninferableSubject,
}

/// A question to put back to the requester instead of composing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clarification {
    pub reason: ClarificationReason,
    pub question: String,
}

// ─── Output ─────────────────────────────────────────────────────────────

/// One validated component of an [`AdCopy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyComponent {
    pub component: Component,
    pub content: String,
    pub word_count: usize,
    /// `None` under the `GENERAL` format.
    pub limit: Option<usize>,
}

impl CopyComponent {
    pub fn within_limit(&self) -> bool {
        self.limit.is_none_or(|limit| self.word_count <= limit)
    }
}

/// Five-component structured advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    pub format: AdFormat,
    /// Indexed by [`Component::index`].
    pub components: [CopyComponent; 5],
    /// Set when at least one component had to be trimmed after exhausting
    /// regeneration attempts.
    pub approximate: bool,
    /// Violations that were resolved by trimming.
    #[serde(default)]
    pub trimmed: Vec<ComponentTooLong>,
}

impl AdCopy {
    pub fn component(&self, component: Component) -> &CopyComponent {
        &self.components[component.index()]
    }

    pub fn within_limits(&self) -> bool {
        self.components.iter().all(CopyComponent::within_limit)
    }
}
