//! Five-component ad copy composition with word-limit enforcement.
//!
//! Content comes from the injected [`TextGenerator`]; this module owns the
//! validation loop. A component over its limit is regenerated up to
//! `max_regenerations` times, then trimmed and the result flagged
//! approximate.

use crate::prompts::{ad_copy_guidelines, component_prompt, global_instruction, CopyBrief, Retry};
use crate::sections::{normalize_candidate, parse_sections, CopySections};
use chrono::{Local, NaiveDate};
use marketing_core::formats::{trim_to_words, word_count};
use marketing_core::{
    limits_for, AdCopy, AdRequest, BrandProfile, Component, ComponentTooLong, CopyComponent,
    MarketingError, MarketingResult,
};
use marketing_genai::TextGenerator;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_REGENERATIONS: u32 = 2;

pub struct CopyComposer {
    generator: Arc<dyn TextGenerator>,
    brand: BrandProfile,
    max_regenerations: u32,
    temperature: Option<f32>,
    /// Fixed date for the brand instruction; today when unset.
    date: Option<NaiveDate>,
}

impl CopyComposer {
    pub fn new(generator: Arc<dyn TextGenerator>, brand: BrandProfile) -> Self {
        Self {
            generator,
            brand,
            max_regenerations: DEFAULT_MAX_REGENERATIONS,
            temperature: None,
            date: None,
        }
    }

    pub fn with_max_regenerations(mut self, max_regenerations: u32) -> Self {
        self.max_regenerations = max_regenerations;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn brand(&self) -> &BrandProfile {
        &self.brand
    }

    pub fn generator(&self) -> Arc<dyn TextGenerator> {
        self.generator.clone()
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Compose all five components for a request that passed the
    /// completeness check.
    pub async fn compose(&self, request: &AdRequest) -> MarketingResult<AdCopy> {
        let format = request.effective_format();
        let limits = format.format_name().map(limits_for);
        let today = self.date.unwrap_or_else(|| Local::now().date_naive());
        let global = global_instruction(&self.brand, today);
        let guidelines = ad_copy_guidelines();
        let sections = match request.existing_copy.as_deref() {
            Some(copy) if request.is_improvement() => parse_sections(copy),
            _ => CopySections::default(),
        };
        let brief = CopyBrief {
            request,
            format,
            voice: self.brand.voice_attributes_for(request),
            global_instruction: &global,
            guidelines: &guidelines,
        };

        info!(
            format = format.label(),
            improving = request.is_improvement(),
            "Composing ad copy"
        );

        let limit = |component: Component| limits.map(|l| l.max_words(component));

        let (headline, h) = self
            .compose_component(&brief, &sections, Component::Headline, limit(Component::Headline))
            .await?;
        let (benefit, b) = self
            .compose_component(
                &brief,
                &sections,
                Component::BenefitStatement,
                limit(Component::BenefitStatement),
            )
            .await?;
        let (evidence, e) = self
            .compose_component(
                &brief,
                &sections,
                Component::SupportingEvidence,
                limit(Component::SupportingEvidence),
            )
            .await?;
        let (alignment, v) = self
            .compose_component(
                &brief,
                &sections,
                Component::ValueAlignment,
                limit(Component::ValueAlignment),
            )
            .await?;
        let (cta, c) = self
            .compose_component(
                &brief,
                &sections,
                Component::CallToAction,
                limit(Component::CallToAction),
            )
            .await?;

        let trimmed: Vec<ComponentTooLong> = [h, b, e, v, c].into_iter().flatten().collect();
        let approximate = !trimmed.is_empty();
        if approximate {
            metrics::counter!("copy.approximate").increment(1);
            warn!(
                format = format.label(),
                trimmed = trimmed.len(),
                "Returning approximate ad copy"
            );
        }

        Ok(AdCopy {
            format,
            components: [headline, benefit, evidence, alignment, cta],
            approximate,
            trimmed,
        })
    }

    async fn compose_component(
        &self,
        brief: &CopyBrief<'_>,
        sections: &CopySections,
        component: Component,
        limit: Option<usize>,
    ) -> MarketingResult<(CopyComponent, Option<ComponentTooLong>)> {
        let existing = sections.get(component);
        let mut attempt = 0;
        let mut previous: Option<(String, usize)> = None;

        loop {
            let retry = previous.as_ref().map(|(text, words)| Retry {
                previous: text,
                words: *words,
            });
            let mut prompt = component_prompt(brief, component, limit, existing, retry);
            if let Some(temperature) = self.temperature {
                prompt = prompt.with_temperature(temperature);
            }

            let raw = self.generator.generate_text(&prompt).await?;
            let content = normalize_candidate(&raw);
            if content.is_empty() {
                return Err(MarketingError::GenerationFailed(format!(
                    "{} returned an empty {component}",
                    self.generator.name()
                )));
            }
            let words = word_count(&content);

            let Some(limit) = limit.filter(|limit| words > *limit) else {
                debug!(component = %component, words, attempt, "Component accepted");
                return Ok((
                    CopyComponent {
                        component,
                        content,
                        word_count: words,
                        limit,
                    },
                    None,
                ));
            };

            if attempt < self.max_regenerations {
                attempt += 1;
                metrics::counter!("copy.regenerations").increment(1);
                debug!(
                    component = %component,
                    words,
                    limit,
                    attempt,
                    "Component over word limit, regenerating"
                );
                previous = Some((content, words));
                continue;
            }

            let violation = ComponentTooLong {
                component,
                limit,
                actual: words,
            };
            warn!(%violation, attempts = attempt + 1, "Trimming component after exhausting regenerations");
            let content = trim_to_words(&content, limit);
            return Ok((
                CopyComponent {
                    component,
                    word_count: word_count(&content),
                    content,
                    limit: Some(limit),
                },
                Some(violation),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketing_core::{AdFormat, FormatName};
    use marketing_genai::ScriptedGenerator;

    fn composer(generator: Arc<ScriptedGenerator>) -> CopyComposer {
        CopyComposer::new(generator, BrandProfile::default())
            .with_date(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap())
    }

    fn billboard() -> AdRequest {
        AdRequest::new("Trail shoes", "weekend hikers").with_format(FormatName::Billboard)
    }

    // 1. A 4-word billboard headline is regenerated; the 3-word retry is accepted.
    #[tokio::test]
    async fn test_billboard_headline_regenerated_then_accepted() {
        let generator = Arc::new(
            ScriptedGenerator::new([
                "Go Further On Trails",
                "Go Further Faster",
                "Grip every step",
                "Tested on rocky peaks",
                "Made for people who love the outdoors",
                "Shop now",
            ]),
        );
        let copy = composer(generator.clone()).compose(&billboard()).await.unwrap();

        let headline = copy.component(Component::Headline);
        assert_eq!(headline.content, "Go Further Faster");
        assert_eq!(headline.word_count, 3);
        assert_eq!(headline.limit, Some(3));
        assert!(!copy.approximate);
        assert!(copy.within_limits());
        assert_eq!(generator.call_count(), 6);

        let retry_prompt = &generator.prompts()[1];
        assert!(retry_prompt.text().contains("had 4 words, over the 3 word limit"));
    }

    // 2. A 3-word headline passes on the first attempt.
    #[tokio::test]
    async fn test_billboard_headline_at_limit_accepted() {
        let generator = Arc::new(ScriptedGenerator::new(["Grip Every Step"]).with_fallback("Go"));
        let copy = composer(generator.clone()).compose(&billboard()).await.unwrap();
        assert_eq!(copy.component(Component::Headline).word_count, 3);
        assert_eq!(generator.call_count(), 5);
    }

    // 3. A banner CTA that stays too long is trimmed and flagged approximate.
    #[tokio::test]
    async fn test_banner_cta_trimmed_after_retries() {
        let generator = Arc::new(ScriptedGenerator::new([
            "Warm Feet All Winter",
            "Wool that keeps you cosy",
            "Rated five stars by commuters",
            "Comfort you can count on",
            "Shop Our Amazing New Sale Today",
            "Shop Our Amazing New Sale Today",
            "Shop Our Amazing New Sale Today",
        ]));
        let request = AdRequest::new("Wool socks", "commuters").with_format(FormatName::BannerAd);
        let copy = composer(generator.clone()).compose(&request).await.unwrap();

        let cta = copy.component(Component::CallToAction);
        assert_eq!(cta.content, "Shop Our Amazing New");
        assert_eq!(cta.word_count, 4);
        assert!(copy.approximate);
        assert!(copy.within_limits());
        assert_eq!(
            copy.trimmed,
            vec![ComponentTooLong {
                component: Component::CallToAction,
                limit: 4,
                actual: 6,
            }]
        );
        assert_eq!(generator.call_count(), 7);
    }

    // 4. "Shop Now" fits the banner CTA limit.
    #[tokio::test]
    async fn test_banner_short_cta_accepted() {
        let generator = Arc::new(ScriptedGenerator::repeating("Shop Now"));
        let request = AdRequest::new("Wool socks", "commuters").with_format(FormatName::BannerAd);
        let copy = composer(generator).compose(&request).await.unwrap();
        let cta = copy.component(Component::CallToAction);
        assert_eq!(cta.word_count, 2);
        assert!(cta.within_limit());
        assert!(!copy.approximate);
    }

    // 5. Identical inputs and generator output give identical results.
    #[tokio::test]
    async fn test_compose_is_idempotent() {
        let replies = [
            "Go Further On Trails",
            "Go Further Faster",
            "Grip every step",
            "Tested on rocky peaks",
            "For people who love the outdoors",
        ];
        let script = || ScriptedGenerator::new(replies).with_fallback("Shop Our Amazing New Sale Today");
        let first = composer(Arc::new(script()))
            .compose(&billboard())
            .await
            .unwrap();
        let second = composer(Arc::new(script()))
            .compose(&billboard())
            .await
            .unwrap();
        assert_eq!(first, second);
        assert!(first.approximate);
        assert_eq!(first.component(Component::CallToAction).content, "Shop Our");
    }

    // 6. GENERAL format applies no limits.
    #[tokio::test]
    async fn test_general_format_has_no_limits() {
        let long = "A headline far longer than any billboard would ever allow here";
        let generator = Arc::new(ScriptedGenerator::repeating(long));
        let request = AdRequest::new("Trail shoes", "weekend hikers");
        let copy = composer(generator.clone()).compose(&request).await.unwrap();
        assert_eq!(copy.format, AdFormat::General);
        assert!(copy.components.iter().all(|c| c.limit.is_none()));
        assert!(!copy.approximate);
        assert_eq!(generator.call_count(), 5);
    }

    // 7. Generator failures and empty replies propagate as GenerationFailed.
    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let generator = Arc::new(ScriptedGenerator::new(["Go Far"]));
        generator.push_failure("quota exceeded");
        let err = composer(generator).compose(&billboard()).await.unwrap_err();
        assert!(matches!(err, MarketingError::GenerationFailed(msg) if msg.contains("quota exceeded")));

        let generator = Arc::new(ScriptedGenerator::new(["HEADLINE: \"\""]));
        let err = composer(generator).compose(&billboard()).await.unwrap_err();
        assert!(matches!(err, MarketingError::GenerationFailed(_)));
    }

    // 8. Improve path feeds each matching section into its prompt.
    #[tokio::test]
    async fn test_improve_path_uses_existing_sections() {
        let generator = Arc::new(ScriptedGenerator::repeating("Stay Warm"));
        let request = AdRequest::new("Wool socks", "commuters")
            .improving("HEADLINE: Socks that are warm\nCTA: Click here to buy some socks today");
        composer(generator.clone()).compose(&request).await.unwrap();

        let prompts = generator.prompts();
        assert!(prompts[0].text().contains("Existing Section To Improve: Socks that are warm"));
        assert!(prompts[1].text().contains("has no distinct BENEFIT STATEMENT"));
        assert!(prompts[4]
            .text()
            .contains("Existing Section To Improve: Click here to buy some socks today"));
    }

    // 9. Labels and quotes in replies are stripped before counting.
    #[tokio::test]
    async fn test_reply_normalized_before_counting() {
        let generator = Arc::new(ScriptedGenerator::repeating("CALL TO ACTION: \"Go\""));
        let copy = composer(generator).compose(&billboard()).await.unwrap();
        let cta = copy.component(Component::CallToAction);
        assert_eq!(cta.content, "Go");
        assert_eq!(cta.word_count, 1);
    }

    // 10. Every table format holds its limits even when the model never complies.
    #[tokio::test]
    async fn test_every_format_respects_its_limits() {
        let rambling = vec!["word"; 150].join(" ");
        for format in FormatName::ALL {
            let generator = Arc::new(ScriptedGenerator::repeating(rambling.clone()));
            let request = AdRequest::new("Wool socks", "commuters").with_format(format);
            let copy = composer(generator.clone()).compose(&request).await.unwrap();

            assert!(copy.within_limits(), "{format} exceeded a limit");
            assert!(copy.approximate, "{format} not flagged approximate");
            assert_eq!(copy.trimmed.len(), 5);
            for component in Component::ALL {
                assert_eq!(
                    copy.component(component).word_count,
                    limits_for(format).max_words(component)
                );
            }
            assert_eq!(generator.call_count(), 15);
        }
    }
}
