//! Prompts for the image prompt-enhancement step.

use marketing_core::{BrandProfile, VisualIdentity};
use marketing_genai::TextPrompt;
use std::fmt::Write;

/// Visual identity block: colours, logo rules and imagery style.
pub fn image_guidelines(visual: &VisualIdentity, profile: &BrandProfile) -> String {
    let mut out = String::from("<visual_identity>\n<brand_colors>\n");
    let _ = writeln!(
        out,
        "- {}: {} - {}",
        visual.primary.name, visual.primary.hex, visual.brand_personality
    );
    let _ = writeln!(
        out,
        "- {}: {} - represents innovation and trust",
        visual.secondary.name, visual.secondary.hex
    );
    let _ = writeln!(
        out,
        "- {}: {} - used for highlights and accents",
        visual.accent.name, visual.accent.hex
    );
    let _ = writeln!(
        out,
        "Always use these exact hex codes. {} should dominate visual elements.",
        visual.primary.name
    );
    out.push_str("</brand_colors>\n\n<logo_guidelines>\n");
    for rule in [
        &visual.logo.style,
        &visual.logo.colors,
        &visual.logo.elements,
        &visual.logo.restrictions,
    ] {
        let _ = writeln!(out, "- {rule}");
    }
    out.push_str("- Never alter proportions, colors, or orientation\n");
    out.push_str("- Maintain clear space around logo\n</logo_guidelines>\n\n<imagery_style>\n");
    let imagery = &visual.imagery;
    for rule in [
        &imagery.composition,
        &imagery.subject_matter,
        &imagery.setting,
        &imagery.mood,
        &imagery.style,
    ] {
        let _ = writeln!(out, "- {rule}");
    }
    out.push_str("- Incorporate brand colors naturally in backgrounds and settings\n");
    let _ = writeln!(out, "- Avoid {}", imagery.avoid);
    out.push_str("- Hero images should showcase products and reinforce campaign themes\n");
    let _ = writeln!(
        out,
        "- Focus on {} industry context and scenarios",
        profile.industry
    );
    out.push_str("</imagery_style>\n</visual_identity>");
    out
}

/// Role and rules for rewriting a user's image request into a detailed prompt.
pub fn image_prompt_instructions(profile: &BrandProfile) -> String {
    format!(
        "<who_are_you>You are a professional marketing specialist and prompt engineer for {}.</who_are_you>\n\
<tasks>\n\
  <task>Review the content request the user requested.</task>\n\
  <task>Review the brand guidelines, including the brand voice, tone, and visual identity.</task>\n\
  <task>Write a detailed prompt that meets the user's request and adheres to the brand guidelines.</task>\n\
</tasks>\n\
<avoid>Adding texts, logos, or watermarks to the image.</avoid>\n\
<avoid>Adding any other elements that are not part of the brand guidelines.</avoid>\n\
<avoid>Adding the company name or any other brand name to the image.</avoid>\n\
<response_output>A single paragraph of text with the enhanced prompt.</response_output>",
        profile.client_name
    )
}

/// The three-part enhancement call: instructions, brand guidelines, request.
pub fn enhancement_prompt(
    profile: &BrandProfile,
    visual: &VisualIdentity,
    user_prompt: &str,
) -> TextPrompt {
    TextPrompt::new(vec![
        image_prompt_instructions(profile),
        format!(
            "<brand_guidelines>{}</brand_guidelines>",
            image_guidelines(visual, profile)
        ),
        format!("<user_request>{user_prompt}</user_request>"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhancement_prompt_parts() {
        let profile = BrandProfile {
            client_name: "Northwind Outfitters".into(),
            industry: "outdoor retail".into(),
            ..BrandProfile::default()
        };
        let visual = VisualIdentity::default();
        let prompt = enhancement_prompt(&profile, &visual, "a tent at dawn");

        assert_eq!(prompt.parts.len(), 3);
        assert!(prompt.parts[0].contains("prompt engineer for Northwind Outfitters"));
        assert!(prompt.parts[1].starts_with("<brand_guidelines><visual_identity>"));
        assert!(prompt.parts[1].contains(&visual.primary.hex));
        assert!(prompt.parts[1].contains("Focus on outdoor retail industry context"));
        assert_eq!(prompt.parts[2], "<user_request>a tent at dawn</user_request>");
    }
}
