//! Prompt construction for ad-copy generation.
//!
//! Word limits are always rendered from the format table in
//! `marketing_core::formats`, never restated here.

use chrono::NaiveDate;
use marketing_core::formats::all_limits;
use marketing_core::{AdFormat, AdRequest, BrandProfile, Component};
use marketing_genai::TextPrompt;
use std::fmt::Write;

const QUALITY_STANDARDS: &[&str] = &[
    "Every word must earn its place: be concise and impactful.",
    "Focus on benefits over features: what's in it for the audience?",
    "Use active voice and strong verbs.",
    "Create urgency or a clear incentive when appropriate, especially with promotions.",
    "Make calls to action clear, compelling and actionable.",
    "Write for readability and emotional impact with the target audience.",
    "Stay authentic and aligned with the brand voice.",
];

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| format!("- \"{item}\""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Brand identity, voice and language rules shared by every generation call.
pub fn global_instruction(profile: &BrandProfile, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<TODAYS_DATE>");
    let _ = writeln!(out, "Today's date is {}.", today.format("%B %d, %Y"));
    let _ = writeln!(out, "</TODAYS_DATE>\n");

    let _ = writeln!(out, "<brand_identity>");
    let _ = writeln!(
        out,
        "You are writing as {}, {}. Your mission is {}.",
        profile.client_name, profile.industry, profile.mission
    );
    let _ = writeln!(out, "</brand_identity>\n");

    let _ = writeln!(out, "<brand_voice>");
    let _ = writeln!(
        out,
        "Write with a {} voice that shows expertise without intimidation, puts customer needs first and builds customer confidence.",
        profile.brand_voice_attributes.join(", ")
    );
    let _ = writeln!(out, "</brand_voice>\n");

    let _ = writeln!(out, "<tone_guidelines>");
    let _ = writeln!(
        out,
        "Professional and helpful. Confident but not arrogant. Promotions are enthusiastic but practical and value-focused."
    );
    let _ = writeln!(out, "</tone_guidelines>\n");

    let _ = writeln!(out, "<core_messaging>\n{}\n</core_messaging>\n", bullet_list(&profile.key_messaging));
    if !profile.unique_value_props.is_empty() {
        let _ = writeln!(
            out,
            "<value_propositions>\n{}\n</value_propositions>\n",
            bullet_list(&profile.unique_value_props)
        );
    }

    let _ = writeln!(out, "<language_rules>");
    let _ = writeln!(
        out,
        "<use_these_phrases>\n{}\n</use_these_phrases>",
        quoted_list(&profile.preferred_phrases)
    );
    let _ = writeln!(
        out,
        "<avoid_these_phrases>\n{}\n</avoid_these_phrases>",
        quoted_list(&profile.avoided_phrases)
    );
    let _ = writeln!(
        out,
        "Use clear, straightforward language and lead with customer benefits. Reference the \"{}\" positively. Never use pushy sales language or over-promise results.",
        profile.team_reference
    );
    let _ = write!(out, "</language_rules>");
    out
}

/// The five message components, quality standards and per-format word limits.
pub fn ad_copy_guidelines() -> String {
    let mut out = String::from("<message_components>\n");
    for component in Component::ALL {
        let _ = writeln!(out, "- {}: {}", component.label(), component.purpose());
    }
    out.push_str("</message_components>\n\n<format_specifications>\n");
    for limits in all_limits() {
        let _ = writeln!(out, "{}:", limits.format.label());
        for limit in limits.iter() {
            let _ = writeln!(out, "- {}: {} words max", limit.component.label(), limit.max_words);
        }
        out.push('\n');
    }
    out.push_str("</format_specifications>\n\n<quality_standards>\n");
    for standard in QUALITY_STANDARDS {
        let _ = writeln!(out, "- {standard}");
    }
    out.push_str("</quality_standards>");
    out
}

/// Everything a component prompt needs besides the component itself.
#[derive(Debug, Clone)]
pub struct CopyBrief<'a> {
    pub request: &'a AdRequest,
    pub format: AdFormat,
    pub voice: &'a [String],
    pub global_instruction: &'a str,
    pub guidelines: &'a str,
}

/// A previous draft that broke its word limit.
#[derive(Debug, Clone, Copy)]
pub struct Retry<'a> {
    pub previous: &'a str,
    pub words: usize,
}

fn user_request_block(brief: &CopyBrief<'_>, existing_section: Option<&str>) -> String {
    let request = brief.request;
    let mut out = String::from("<user_request>\n");
    let _ = writeln!(out, "Product/Service: {}", request.product_or_service.trim());
    let _ = writeln!(out, "Target Audience: {}", request.target_audience.trim());
    let _ = writeln!(out, "Promotion: {}", request.promotion().unwrap_or("N/A"));
    let _ = writeln!(out, "Format: {}", brief.format.display_name());
    if !brief.voice.is_empty() {
        let _ = writeln!(out, "Brand Voice: {}", brief.voice.join(", "));
    }
    if let Some(existing) = request.existing_copy.as_deref().filter(|c| !c.trim().is_empty()) {
        let _ = writeln!(out, "Existing Copy:\n{}", existing.trim());
        if let Some(section) = existing_section {
            let _ = writeln!(out, "Existing Section To Improve: {section}");
        }
    }
    out.push_str("</user_request>");
    out
}

fn task_block(
    brief: &CopyBrief<'_>,
    component: Component,
    limit: Option<usize>,
    improving_section: bool,
    retry: Option<Retry<'_>>,
) -> String {
    let mut out = String::from("<task>\n");
    if brief.request.is_improvement() {
        if improving_section {
            let _ = writeln!(
                out,
                "Rewrite the existing {} so it is stronger while keeping what works.",
                component.label()
            );
        } else {
            let _ = writeln!(
                out,
                "The existing copy has no distinct {}. Write one that fits the rest of the copy.",
                component.label()
            );
        }
    } else {
        let _ = writeln!(out, "Write the {} for this ad.", component.label());
    }
    let _ = writeln!(out, "Purpose: {}.", component.purpose());
    match limit {
        Some(limit) => {
            let _ = writeln!(out, "Use at most {limit} words.");
        }
        None => {
            let _ = writeln!(out, "No fixed word limit applies; keep it as concise as the component allows.");
        }
    }
    if let (Some(retry), Some(limit)) = (retry, limit) {
        let _ = writeln!(
            out,
            "Your previous draft \"{}\" had {} words, over the {} word limit. Write a shorter version.",
            retry.previous, retry.words, limit
        );
    }
    out.push_str("Respond with the component text only, without its label.\n</task>");
    out
}

/// Prompt for one component. `existing_section` is the matching part of the
/// copy being improved, when one could be identified.
pub fn component_prompt(
    brief: &CopyBrief<'_>,
    component: Component,
    limit: Option<usize>,
    existing_section: Option<&str>,
    retry: Option<Retry<'_>>,
) -> TextPrompt {
    TextPrompt::new(vec![
        format!("<instructions>\n{}\n</instructions>", brief.guidelines),
        format!("<brand_guidelines>\n{}\n</brand_guidelines>", brief.global_instruction),
        user_request_block(brief, existing_section),
        task_block(brief, component, limit, existing_section.is_some(), retry),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketing_core::FormatName;

    fn profile() -> BrandProfile {
        BrandProfile {
            client_name: "Northwind Outfitters".into(),
            avoided_phrases: vec!["cheap".into()],
            ..BrandProfile::default()
        }
    }

    #[test]
    fn test_global_instruction_carries_date_and_brand() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let text = global_instruction(&profile(), today);
        assert!(text.contains("Today's date is June 03, 2025."));
        assert!(text.contains("You are writing as Northwind Outfitters"));
        assert!(text.contains("- \"cheap\""));
    }

    #[test]
    fn test_guidelines_render_limits_from_table() {
        let text = ad_copy_guidelines();
        assert!(text.contains("BILLBOARD:\n- HEADLINE: 3 words max"));
        assert!(text.contains("BLOG POST:"));
        assert!(text.contains("- SUPPORTING EVIDENCE: 115 words max"));
        assert_eq!(text.matches("words max").count(), 35);
    }

    #[test]
    fn test_component_prompt_layout() {
        let request = AdRequest::new("Trail shoes", "weekend hikers").with_format(FormatName::Billboard);
        let voice = vec!["bold".to_string()];
        let brief = CopyBrief {
            request: &request,
            format: request.effective_format(),
            voice: &voice,
            global_instruction: "GLOBAL",
            guidelines: "GUIDE",
        };
        let prompt = component_prompt(
            &brief,
            Component::Headline,
            Some(3),
            None,
            Some(Retry {
                previous: "Go Further On Trails",
                words: 4,
            }),
        );
        assert_eq!(prompt.parts.len(), 4);
        assert!(prompt.parts[0].contains("GUIDE"));
        assert!(prompt.parts[1].contains("GLOBAL"));
        assert!(prompt.parts[2].contains("Promotion: N/A"));
        assert!(prompt.parts[2].contains("Brand Voice: bold"));
        assert!(prompt.parts[3].contains("Use at most 3 words."));
        assert!(prompt.parts[3].contains("had 4 words, over the 3 word limit"));
    }

    #[test]
    fn test_general_prompt_asks_for_concision() {
        let request = AdRequest::new("Trail shoes", "weekend hikers");
        let brief = CopyBrief {
            request: &request,
            format: request.effective_format(),
            voice: &[],
            global_instruction: "",
            guidelines: "",
        };
        let prompt = component_prompt(&brief, Component::CallToAction, None, None, None);
        assert!(prompt.parts[2].contains("Format: General Use"));
        assert!(prompt.parts[3].contains("No fixed word limit applies"));
    }
}
