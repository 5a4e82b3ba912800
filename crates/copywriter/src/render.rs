//! Plain-text rendering of composed ad copy.
//!
//! Field order and labels are fixed; downstream consumers parse this block.

use crate::voice::VoiceFinding;
use marketing_core::{AdCopy, AdRequest};
use std::fmt::Write;

pub const IMPROVE_PREFACE: &str = "I've reviewed your draft. Here's a revised version:";

/// Summary block followed by the labelled `AD COPY` block.
pub fn render_copy(request: &AdRequest, copy: &AdCopy) -> String {
    let mut out = String::new();
    if request.is_improvement() {
        let _ = writeln!(out, "{IMPROVE_PREFACE}\n");
    }
    let _ = writeln!(out, "Here's the ad copy based on the following:");
    let _ = writeln!(out, "* **Product/Service:** {}", request.product_or_service.trim());
    let _ = writeln!(out, "* **Target Audience:** {}", request.target_audience.trim());
    let _ = writeln!(
        out,
        "* **Promotion (if applicable):** {}",
        request.promotion().unwrap_or("N/A")
    );
    let _ = writeln!(
        out,
        "* **Format (if specified/determined):** {}",
        copy.format.display_name()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "AD COPY - {}", copy.format.label());
    let _ = writeln!(out);
    for part in &copy.components {
        let _ = writeln!(out, "{}: {}", part.component.label(), part.content);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Full reply: rendered copy plus the trim note and any brand-voice findings.
pub fn render_response(request: &AdRequest, copy: &AdCopy, findings: &[VoiceFinding]) -> String {
    let mut out = render_copy(request, copy);
    if copy.approximate {
        let _ = write!(
            out,
            "\n\nNote: some components were trimmed to fit the {} word limits.",
            copy.format.label()
        );
    }
    if !findings.is_empty() {
        out.push('\n');
        for finding in findings {
            let _ = write!(
                out,
                "\nBrand voice check: \"{}\" appears in {}.",
                finding.phrase,
                finding.component.label()
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketing_core::{
        AdFormat, Component, ComponentTooLong, CopyComponent, FormatName,
    };

    fn copy(format: AdFormat, texts: [&str; 5]) -> AdCopy {
        AdCopy {
            format,
            components: Component::ALL.map(|component| CopyComponent {
                component,
                content: texts[component.index()].to_string(),
                word_count: texts[component.index()].split_whitespace().count(),
                limit: None,
            }),
            approximate: false,
            trimmed: Vec::new(),
        }
    }

    const TEXTS: [&str; 5] = [
        "Warm Feet Daily",
        "Wool keeps toes cosy",
        "Five-star rated",
        "Comfort for every commute",
        "Shop Now",
    ];

    #[test]
    fn test_render_exact_layout() {
        let request = AdRequest::new("Wool socks", "commuters")
            .with_promotion("20% off")
            .with_format(FormatName::BannerAd);
        let rendered = render_copy(&request, &copy(AdFormat::Specified(FormatName::BannerAd), TEXTS));
        let expected = "Here's the ad copy based on the following:\n\
* **Product/Service:** Wool socks\n\
* **Target Audience:** commuters\n\
* **Promotion (if applicable):** 20% off\n\
* **Format (if specified/determined):** Banner Ad\n\
\n\
AD COPY - BANNER AD\n\
\n\
HEADLINE: Warm Feet Daily\n\
BENEFIT STATEMENT: Wool keeps toes cosy\n\
SUPPORTING EVIDENCE: Five-star rated\n\
VALUE ALIGNMENT: Comfort for every commute\n\
CALL TO ACTION: Shop Now";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_general_without_promotion() {
        let request = AdRequest::new("Wool socks", "commuters");
        let rendered = render_copy(&request, &copy(AdFormat::General, TEXTS));
        assert!(rendered.contains("* **Promotion (if applicable):** N/A\n"));
        assert!(rendered.contains("* **Format (if specified/determined):** General Use\n"));
        assert!(rendered.contains("\nAD COPY - GENERAL\n"));
    }

    #[test]
    fn test_improve_preface_and_notes() {
        let request = AdRequest::new("Wool socks", "commuters").improving("Buy socks");
        let mut copy = copy(AdFormat::Specified(FormatName::Billboard), TEXTS);
        copy.approximate = true;
        copy.trimmed.push(ComponentTooLong {
            component: Component::Headline,
            limit: 3,
            actual: 5,
        });
        let findings = vec![VoiceFinding {
            component: Component::CallToAction,
            phrase: "shop now".into(),
        }];

        let rendered = render_response(&request, &copy, &findings);
        assert!(rendered.starts_with(
            "I've reviewed your draft. Here's a revised version:\n\nHere's the ad copy"
        ));
        assert!(rendered.ends_with(
            "CALL TO ACTION: Shop Now\n\n\
Note: some components were trimmed to fit the BILLBOARD word limits.\n\n\
Brand voice check: \"shop now\" appears in CALL TO ACTION."
        ));
    }
}
