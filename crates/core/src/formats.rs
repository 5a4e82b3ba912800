//! Per-format, per-component maximum word counts.
//!
//! The table is compiled in and read-only; every format maps to exactly one
//! limit per [`Component`].

use crate::error::MarketingResult;
use crate::types::{Component, FormatName};
use serde::Serialize;
use std::str::FromStr;

/// Maximum word count for one component within one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentLimit {
    pub component: Component,
    pub max_words: usize,
}

/// The five limits of a single format, indexed by [`Component::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatLimits {
    pub format: FormatName,
    limits: [ComponentLimit; 5],
}

impl FormatLimits {
    pub fn max_words(&self, component: Component) -> usize {
        self.limits[component.index()].max_words
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentLimit> {
        self.limits.iter()
    }
}

// Headline, Benefit, Evidence, Value Alignment, CTA
fn table_row(format: FormatName) -> [usize; 5] {
    match format {
        FormatName::BannerAd => [6, 14, 23, 14, 4],
        FormatName::SocialMediaPost => [11, 23, 46, 43, 6],
        FormatName::Email => [8, 12, 19, 20, 18],
        FormatName::BlogPost => [9, 24, 115, 38, 18],
        FormatName::Billboard => [3, 5, 6, 12, 2],
        FormatName::Poster => [6, 14, 62, 5, 3],
        FormatName::DirectMail => [12, 23, 62, 23, 5],
    }
}

/// Word limits for a format.
pub fn limits_for(format: FormatName) -> FormatLimits {
    let row = table_row(format);
    FormatLimits {
        format,
        limits: Component::ALL.map(|component| ComponentLimit {
            component,
            max_words: row[component.index()],
        }),
    }
}

/// Word limits for a format given by name. Unknown names are an error, never
/// a silent default.
pub fn limits_for_name(name: &str) -> MarketingResult<FormatLimits> {
    FormatName::from_str(name).map(limits_for)
}

/// Limits for every format, in table order.
pub fn all_limits() -> impl Iterator<Item = FormatLimits> {
    FormatName::ALL.into_iter().map(limits_for)
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep the first `max_words` tokens, joined by single spaces.
pub fn trim_to_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketingError;
    use std::collections::HashSet;

    #[test]
    fn test_every_format_has_five_distinct_components() {
        for limits in all_limits() {
            let components: HashSet<Component> = limits.iter().map(|l| l.component).collect();
            assert_eq!(components.len(), 5, "{:?}", limits.format);
            for component in Component::ALL {
                assert!(components.contains(&component));
            }
        }
    }

    #[test]
    fn test_literal_table_values() {
        let expected = [
            (FormatName::BannerAd, [6, 14, 23, 14, 4]),
            (FormatName::SocialMediaPost, [11, 23, 46, 43, 6]),
            (FormatName::Email, [8, 12, 19, 20, 18]),
            (FormatName::BlogPost, [9, 24, 115, 38, 18]),
            (FormatName::Billboard, [3, 5, 6, 12, 2]),
            (FormatName::Poster, [6, 14, 62, 5, 3]),
            (FormatName::DirectMail, [12, 23, 62, 23, 5]),
        ];
        for (format, row) in expected {
            let limits = limits_for(format);
            let actual: Vec<usize> = Component::ALL
                .iter()
                .map(|c| limits.max_words(*c))
                .collect();
            assert_eq!(actual, row.to_vec(), "{format}");
        }
    }

    #[test]
    fn test_limits_for_name_accepts_aliases() {
        let limits = limits_for_name("banner ads").unwrap();
        assert_eq!(limits.format, FormatName::BannerAd);
        assert_eq!(limits.max_words(Component::CallToAction), 4);

        let limits = limits_for_name("Direct-Mail").unwrap();
        assert_eq!(limits.max_words(Component::Headline), 12);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        match limits_for_name("TIKTOK_STORY") {
            Err(MarketingError::UnknownFormat(name)) => assert_eq!(name, "TIKTOK_STORY"),
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_word_count_and_trim() {
        assert_eq!(word_count("  Shop   Now \n"), 2);
        assert_eq!(word_count(""), 0);
        assert_eq!(
            trim_to_words("Shop Our Amazing New Sale Today", 4),
            "Shop Our Amazing New"
        );
        assert_eq!(trim_to_words("Shop  Now", 4), "Shop Now");
    }
}
