//! Ad-copy writing: completeness check, word-limited composition, brand-voice
//! review and response rendering.

pub mod completeness;
pub mod composer;
pub mod inference;
pub mod prompts;
pub mod render;
pub mod sections;
pub mod service;
pub mod voice;

pub use completeness::{assess, AcceptAllPromotions, Assessment, GenericTermsHeuristic, PromotionClarity};
pub use composer::CopyComposer;
pub use inference::{fill_subject, InferredSubject, ModelSubjectInference, NoInference, SubjectInference};
pub use render::{render_copy, render_response};
pub use sections::{normalize_candidate, parse_sections, CopySections};
pub use service::{CopyOutcome, CopyService};
pub use voice::{review_voice, VoiceFinding};
