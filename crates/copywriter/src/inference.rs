//! Recovers the product and audience of a draft on the improve path, so the
//! requester is only asked for them when the draft does not say.

use async_trait::async_trait;
use marketing_core::{AdRequest, MarketingResult};
use marketing_genai::{TextGenerator, TextPrompt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fields read off an existing draft. `None` when the draft doesn't say.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredSubject {
    pub product_or_service: Option<String>,
    pub target_audience: Option<String>,
}

#[async_trait]
pub trait SubjectInference: Send + Sync {
    async fn infer(&self, existing_copy: &str) -> MarketingResult<InferredSubject>;
}

/// Never infers anything; every blank field is asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInference;

#[async_trait]
impl SubjectInference for NoInference {
    async fn infer(&self, _existing_copy: &str) -> MarketingResult<InferredSubject> {
        Ok(InferredSubject::default())
    }
}

const INFERENCE_INSTRUCTIONS: &str = "You read advertising copy and identify what it sells and who it is written for.
Answer with exactly two lines:
PRODUCT: <the product or service, or UNKNOWN>
AUDIENCE: <the target audience, or UNKNOWN>
Only name what the copy itself makes clear. Do not guess.";

/// Asks the text model to read the draft.
pub struct ModelSubjectInference {
    generator: Arc<dyn TextGenerator>,
    temperature: Option<f32>,
}

impl ModelSubjectInference {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

fn answer(value: &str) -> Option<String> {
    let value = value.trim().trim_matches(|c: char| c == '"' || c == '*').trim();
    let unknown = ["", "unknown", "n/a", "none", "unclear"];
    (!unknown.contains(&value.to_lowercase().as_str())).then(|| value.to_string())
}

/// Read `PRODUCT:` and `AUDIENCE:` lines from a model reply.
pub fn parse_inference(reply: &str) -> InferredSubject {
    let mut subject = InferredSubject::default();
    for line in reply.lines() {
        let line = line.trim().trim_start_matches(['*', '-', '#']).trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim().trim_matches('*').to_uppercase().as_str() {
            "PRODUCT" | "PRODUCT/SERVICE" | "PRODUCT OR SERVICE" | "SERVICE" => {
                subject.product_or_service = answer(value)
            }
            "AUDIENCE" | "TARGET AUDIENCE" => subject.target_audience = answer(value),
            _ => {}
        }
    }
    subject
}

#[async_trait]
impl SubjectInference for ModelSubjectInference {
    async fn infer(&self, existing_copy: &str) -> MarketingResult<InferredSubject> {
        let mut prompt = TextPrompt::new(vec![
            INFERENCE_INSTRUCTIONS.to_string(),
            format!("<existing_copy>\n{}\n</existing_copy>", existing_copy.trim()),
        ]);
        if let Some(temperature) = self.temperature {
            prompt = prompt.with_temperature(temperature);
        }
        let reply = self.generator.generate_text(&prompt).await?;
        let subject = parse_inference(&reply);
        debug!(
            product = subject.product_or_service.is_some(),
            audience = subject.target_audience.is_some(),
            "Inferred subject from existing copy"
        );
        Ok(subject)
    }
}

/// Fill blank product and audience fields of an improve request from the
/// draft. Other requests, and requests with both fields present, pass
/// through untouched. A failed inference leaves the blanks for the
/// completeness check to ask about.
pub async fn fill_subject(request: &AdRequest, inference: &dyn SubjectInference) -> AdRequest {
    let mut request = request.clone();
    let product_blank = request.product_or_service.trim().is_empty();
    let audience_blank = request.target_audience.trim().is_empty();
    if !request.is_improvement() || !(product_blank || audience_blank) {
        return request;
    }
    let Some(copy) = request.existing_copy.as_deref() else {
        return request;
    };

    let inferred = inference.infer(copy).await;
    match inferred {
        Ok(subject) => {
            if product_blank {
                if let Some(product) = subject.product_or_service {
                    request.product_or_service = product;
                }
            }
            if audience_blank {
                if let Some(audience) = subject.target_audience {
                    request.target_audience = audience;
                }
            }
        }
        Err(e) => warn!(error = %e, "Could not infer subject from existing copy"),
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketing_genai::ScriptedGenerator;

    const DRAFT: &str = "HEADLINE: Merino Wool Socks For Commuters\nBENEFIT: Warm feet on every train ride\nCTA: Shop now";

    #[test]
    fn test_parse_inference() {
        let subject = parse_inference("PRODUCT: Merino wool socks\n**AUDIENCE:** UNKNOWN");
        assert_eq!(subject.product_or_service.as_deref(), Some("Merino wool socks"));
        assert_eq!(subject.target_audience, None);
        assert_eq!(parse_inference("no idea"), InferredSubject::default());
    }

    #[tokio::test]
    async fn test_blank_fields_filled_from_draft() {
        let generator = Arc::new(ScriptedGenerator::new([
            "PRODUCT: Merino wool socks\nAUDIENCE: Train commuters",
        ]));
        let inference = ModelSubjectInference::new(generator.clone());
        let request = AdRequest::new("", "").improving(DRAFT);

        let filled = fill_subject(&request, &inference).await;
        assert_eq!(filled.product_or_service, "Merino wool socks");
        assert_eq!(filled.target_audience, "Train commuters");
        assert!(generator.prompts()[0].text().contains("Warm feet on every train ride"));
    }

    #[tokio::test]
    async fn test_given_fields_are_kept() {
        let generator = Arc::new(ScriptedGenerator::new(["PRODUCT: Socks\nAUDIENCE: Everyone"]));
        let inference = ModelSubjectInference::new(generator.clone());

        let request = AdRequest::new("Hiking socks", "").improving(DRAFT);
        let filled = fill_subject(&request, &inference).await;
        assert_eq!(filled.product_or_service, "Hiking socks");
        assert_eq!(filled.target_audience, "Everyone");

        let complete = AdRequest::new("Hiking socks", "hikers").improving(DRAFT);
        assert_eq!(fill_subject(&complete, &inference).await, complete);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_new_copy_is_never_inferred() {
        let generator = Arc::new(ScriptedGenerator::repeating("PRODUCT: Socks"));
        let request = AdRequest::new("", "commuters");
        let filled = fill_subject(&request, &ModelSubjectInference::new(generator.clone())).await;
        assert_eq!(filled, request);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_inference_leaves_blanks() {
        let generator = Arc::new(ScriptedGenerator::default());
        generator.push_failure("model unavailable");
        let request = AdRequest::new("", "").improving(DRAFT);
        let filled = fill_subject(&request, &ModelSubjectInference::new(generator)).await;
        assert_eq!(filled, request);
    }
}
