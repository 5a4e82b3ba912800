//! Brand-voice review of composed copy against the profile's avoided phrases.

use marketing_core::{AdCopy, BrandProfile, Component};
use serde::{Deserialize, Serialize};

/// An avoided phrase found in a component. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceFinding {
    pub component: Component,
    pub phrase: String,
}

/// Case-insensitive scan of every component for avoided phrases.
pub fn review_voice(copy: &AdCopy, profile: &BrandProfile) -> Vec<VoiceFinding> {
    let phrases: Vec<(&str, String)> = profile
        .avoided_phrases
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| (p, p.to_lowercase()))
        .collect();

    let mut findings = Vec::new();
    for part in &copy.components {
        let text = part.content.to_lowercase();
        for (phrase, lowered) in &phrases {
            if text.contains(lowered.as_str()) {
                findings.push(VoiceFinding {
                    component: part.component,
                    phrase: phrase.to_string(),
                });
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketing_core::{AdFormat, CopyComponent};

    fn copy_with(texts: [&str; 5]) -> AdCopy {
        AdCopy {
            format: AdFormat::General,
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

    #[test]
    fn test_avoided_phrases_flagged_case_insensitively() {
        let profile = BrandProfile {
            avoided_phrases: vec!["Cheap".into(), "act now".into(), " ".into()],
            ..BrandProfile::default()
        };
        let copy = copy_with(["Cheap Socks", "Warm", "Tested", "Cosy", "ACT NOW and save"]);
        let findings = review_voice(&copy, &profile);
        assert_eq!(
            findings,
            vec![
                VoiceFinding {
                    component: Component::Headline,
                    phrase: "Cheap".into()
                },
                VoiceFinding {
                    component: Component::CallToAction,
                    phrase: "act now".into()
                },
            ]
        );
    }

    #[test]
    fn test_clean_copy_has_no_findings() {
        let copy = copy_with(["Warm", "Socks", "Tested", "Cosy", "Shop"]);
        assert!(review_voice(&copy, &BrandProfile::default()).is_empty());
    }
}
