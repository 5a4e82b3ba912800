//! One ad-copy turn: subject inference for drafts, completeness check,
//! composition, voice review and rendering.

use crate::completeness::{assess, Assessment, GenericTermsHeuristic, PromotionClarity};
use crate::composer::CopyComposer;
use crate::inference::{fill_subject, ModelSubjectInference, SubjectInference};
use crate::render::render_response;
use crate::voice::{review_voice, VoiceFinding};
use marketing_core::{AdCopy, AdRequest, Clarification, MarketingResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one ad-copy turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CopyOutcome {
    Clarification(Clarification),
    Composed {
        /// Echo of the request, new-copy path only.
        confirmation: Option<String>,
        copy: AdCopy,
        findings: Vec<VoiceFinding>,
        rendered: String,
    },
}

pub struct CopyService {
    composer: CopyComposer,
    clarity: Arc<dyn PromotionClarity>,
    inference: Arc<dyn SubjectInference>,
}

impl CopyService {
    /// Drafts are read by the composer's own text model unless another
    /// inference is configured.
    pub fn new(composer: CopyComposer) -> Self {
        let mut inference = ModelSubjectInference::new(composer.generator());
        if let Some(temperature) = composer.temperature() {
            inference = inference.with_temperature(temperature);
        }
        Self {
            composer,
            clarity: Arc::new(GenericTermsHeuristic),
            inference: Arc::new(inference),
        }
    }

    pub fn with_promotion_clarity(mut self, clarity: Arc<dyn PromotionClarity>) -> Self {
        self.clarity = clarity;
        self
    }

    pub fn with_subject_inference(mut self, inference: Arc<dyn SubjectInference>) -> Self {
        self.inference = inference;
        self
    }

    pub async fn write(&self, request: &AdRequest) -> MarketingResult<CopyOutcome> {
        metrics::counter!("copy.requests").increment(1);

        let request = &fill_subject(request, self.inference.as_ref()).await;
        let confirmation = match assess(request, self.clarity.as_ref()) {
            Assessment::ClarificationNeeded(clarification) => {
                metrics::counter!("copy.clarifications").increment(1);
                info!(reason = ?clarification.reason, "Ad copy request needs clarification");
                return Ok(CopyOutcome::Clarification(clarification));
            }
            Assessment::Proceed { confirmation } => confirmation,
        };

        let copy = self.composer.compose(request).await?;
        let findings = review_voice(&copy, self.composer.brand());
        for finding in &findings {
            warn!(
                component = %finding.component,
                phrase = %finding.phrase,
                "Avoided brand phrase in ad copy"
            );
        }
        let rendered = render_response(request, &copy, &findings);

        Ok(CopyOutcome::Composed {
            confirmation,
            copy,
            findings,
            rendered,
        })
    }
}
