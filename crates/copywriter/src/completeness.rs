//! Decides whether an ad-copy request carries enough information to compose.
//!
//! A pure function of the request fields plus one pluggable predicate for
//! promotion vagueness. Two outcomes: a clarification question, or proceed.

use marketing_core::{AdRequest, Clarification, ClarificationReason, MarketingError, MarketingResult};

pub const ASK_PRODUCT: &str = "What product or service are we focusing on?";
pub const ASK_AUDIENCE: &str = "Who is the target audience for this copy?";
pub const ASK_PROMOTION: &str = "Could you provide more details about the promotion (e.g., discount percentage, duration, specific items on sale)?";
pub const ASK_PROMOTION_IN_COPY: &str = "I see a promotion mentioned. Could you clarify the details (e.g., discount percentage, items on sale) so I can integrate it best?";
pub const ASK_SUBJECT_FOR_COPY: &str = "Thanks for sharing your copy. To help me review and enhance it effectively, could you confirm the specific product or service and target audience it's for?";

/// Judges whether promotion details are too vague to write against.
pub trait PromotionClarity: Send + Sync {
    fn is_vague(&self, details: &str) -> bool;
}

/// Flags a promotion as vague when it has no figures and every word is a
/// generic promotion term ("we have a sale", "big deals").
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericTermsHeuristic;

const GENERIC_TERMS: &[&str] = &[
    "a", "an", "the", "we", "we're", "have", "has", "having", "our", "some", "there", "is", "are",
    "it", "its", "it's", "on", "running", "going", "big", "huge", "great", "amazing", "special",
    "specials", "sale", "sales", "discount", "discounts", "discounted", "deal", "deals", "promo",
    "promos", "promotion", "promotions", "offer", "offers", "savings", "event", "clearance",
    "reduced", "prices", "price", "soon", "now", "new",
];

impl PromotionClarity for GenericTermsHeuristic {
    fn is_vague(&self, details: &str) -> bool {
        if details.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        details
            .split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|word| !word.is_empty())
            .all(|word| GENERIC_TERMS.contains(&word.as_str()))
    }
}

/// Never asks for promotion details.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllPromotions;

impl PromotionClarity for AcceptAllPromotions {
    fn is_vague(&self, _details: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    ClarificationNeeded(Clarification),
    /// New-copy requests carry a one-line confirmation to echo back first.
    Proceed { confirmation: Option<String> },
}

impl Assessment {
    /// Convert a halt into `IncompleteRequest`.
    pub fn into_result(self) -> MarketingResult<Option<String>> {
        match self {
            Assessment::ClarificationNeeded(clarification) => {
                Err(MarketingError::IncompleteRequest(clarification))
            }
            Assessment::Proceed { confirmation } => Ok(confirmation),
        }
    }
}

fn clarify(reason: ClarificationReason, question: &str) -> Assessment {
    Assessment::ClarificationNeeded(Clarification {
        reason,
        question: question.to_string(),
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Evaluate the completeness rules in order; the first failing rule wins.
///
/// On the improve path, run [`crate::inference::fill_subject`] first: a
/// product or audience still blank here could not be read off the draft.
pub fn assess(request: &AdRequest, clarity: &dyn PromotionClarity) -> Assessment {
    let improving = request.is_improvement();

    if !improving && is_blank(&request.product_or_service) {
        return clarify(ClarificationReason::MissingProduct, ASK_PRODUCT);
    }
    if !improving && is_blank(&request.target_audience) {
        return clarify(ClarificationReason::MissingAudience, ASK_AUDIENCE);
    }
    if let Some(promotion) = request.promotion() {
        if clarity.is_vague(promotion) {
            let question = if improving {
                ASK_PROMOTION_IN_COPY
            } else {
                ASK_PROMOTION
            };
            return clarify(ClarificationReason::VaguePromotion, question);
        }
    }
    if improving && (is_blank(&request.product_or_service) || is_blank(&request.target_audience))
    {
        return clarify(ClarificationReason::UninferableSubject, ASK_SUBJECT_FOR_COPY);
    }

    let confirmation = (!improving).then(|| confirmation_line(request));
    Assessment::Proceed { confirmation }
}

/// "Okay, I'll create ad copy for X targeting Y. [And the promotion is Z.] Is that correct?"
pub fn confirmation_line(request: &AdRequest) -> String {
    let mut line = format!(
        "Okay, I'll create ad copy for {} targeting {}.",
        request.product_or_service.trim(),
        request.target_audience.trim()
    );
    if let Some(promotion) = request.promotion() {
        line.push_str(&format!(" And the promotion is {}.", promotion.trim_end_matches('.')));
    }
    line.push_str(" Is that correct?");
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(request: &AdRequest) -> Assessment {
        assess(request, &GenericTermsHeuristic)
    }

    #[test]
    fn test_missing_product_asks_product_question() {
        let request = AdRequest::new("", "homeowners");
        assert_eq!(
            check(&request),
            Assessment::ClarificationNeeded(Clarification {
                reason: ClarificationReason::MissingProduct,
                question: ASK_PRODUCT.to_string(),
            })
        );
    }

    #[test]
    fn test_missing_audience_asks_audience_question() {
        let request = AdRequest::new("Smart thermostat", "   ");
        match check(&request) {
            Assessment::ClarificationNeeded(c) => {
                assert_eq!(c.reason, ClarificationReason::MissingAudience);
                assert_eq!(c.question, ASK_AUDIENCE);
            }
            other => panic!("expected clarification, got {other:?}"),
        }
    }

    #[test]
    fn test_product_checked_before_audience() {
        let request = AdRequest::new("", "");
        match check(&request) {
            Assessment::ClarificationNeeded(c) => {
                assert_eq!(c.reason, ClarificationReason::MissingProduct)
            }
            other => panic!("expected clarification, got {other:?}"),
        }
    }

    #[test]
    fn test_vague_promotion_halts() {
        let request = AdRequest::new("Smart thermostat", "homeowners").with_promotion("we have a sale");
        match check(&request) {
            Assessment::ClarificationNeeded(c) => {
                assert_eq!(c.reason, ClarificationReason::VaguePromotion);
                assert_eq!(c.question, ASK_PROMOTION);
            }
            other => panic!("expected clarification, got {other:?}"),
        }
    }

    #[test]
    fn test_specific_promotion_proceeds_with_confirmation() {
        let request = AdRequest::new("Smart thermostat", "homeowners")
            .with_promotion("20% off through Sunday.");
        assert_eq!(
            check(&request),
            Assessment::Proceed {
                confirmation: Some(
                    "Okay, I'll create ad copy for Smart thermostat targeting homeowners. And the promotion is 20% off through Sunday. Is that correct?"
                        .to_string()
                ),
            }
        );
    }

    #[test]
    fn test_no_promotion_confirmation_omits_it() {
        let request = AdRequest::new("Trail shoes", "weekend hikers");
        match check(&request) {
            Assessment::Proceed {
                confirmation: Some(line),
            } => assert_eq!(
                line,
                "Okay, I'll create ad copy for Trail shoes targeting weekend hikers. Is that correct?"
            ),
            other => panic!("expected proceed, got {other:?}"),
        }
    }

    #[test]
    fn test_improve_path_asks_for_subject_left_blank_after_inference() {
        let request = AdRequest::new("", "").improving("HEADLINE: Stay Warm For Less");
        match check(&request) {
            Assessment::ClarificationNeeded(c) => {
                assert_eq!(c.reason, ClarificationReason::UninferableSubject);
                assert_eq!(c.question, ASK_SUBJECT_FOR_COPY);
            }
            other => panic!("expected clarification, got {other:?}"),
        }

        let request = AdRequest::new("Wool socks", "commuters").improving("Stay warm for less");
        assert_eq!(check(&request), Assessment::Proceed { confirmation: None });
    }

    #[test]
    fn test_improve_path_vague_promotion_uses_copy_question() {
        let request = AdRequest::new("Wool socks", "commuters")
            .improving("Big sale on socks!")
            .with_promotion("big sale");
        match check(&request) {
            Assessment::ClarificationNeeded(c) => assert_eq!(c.question, ASK_PROMOTION_IN_COPY),
            other => panic!("expected clarification, got {other:?}"),
        }
    }

    #[test]
    fn test_pluggable_predicate() {
        let request = AdRequest::new("Wool socks", "commuters").with_promotion("we have a sale");
        assert!(matches!(
            assess(&request, &AcceptAllPromotions),
            Assessment::Proceed { .. }
        ));
    }

    #[test]
    fn test_heuristic() {
        let h = GenericTermsHeuristic;
        assert!(h.is_vague("We're running a big promotion!"));
        assert!(!h.is_vague("Buy one, get one free on all boots"));
        assert!(!h.is_vague("15% off"));
    }

    #[test]
    fn test_into_result() {
        let request = AdRequest::new("", "homeowners");
        match check(&request).into_result() {
            Err(MarketingError::IncompleteRequest(c)) => assert_eq!(c.question, ASK_PRODUCT),
            other => panic!("expected incomplete request, got {other:?}"),
        }
    }
}
