//! In-memory generation backends for tests and offline runs.
//!
//! Responses are scripted up front and every request is recorded, so the
//! deterministic scaffolding around generation can be exercised without a
//! network.

use crate::traits::*;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Text backend that replays queued responses in order.
///
/// Once the queue is drained it keeps answering with the fallback, or fails
/// with an empty response when there is none.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, String>>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<TextPrompt>>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            ..Default::default()
        }
    }

    /// Answer every call with the same text.
    pub fn repeating(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Default::default()
        }
    }

    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.replies).push_back(Ok(reply.into()));
    }

    /// Queue an API failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        lock(&self.replies).push_back(Err(message.into()));
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<TextPrompt> {
        lock(&self.prompts).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &TextPrompt) -> GenAiResult<String> {
        lock(&self.prompts).push(prompt.clone());
        match lock(&self.replies).pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(GenAiError::Api {
                status: 500,
                message,
            }),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| GenAiError::EmptyResponse("script exhausted".to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Image backend returning fixed bytes for every generation and edit.
#[derive(Debug)]
pub struct StaticImageBackend {
    image: Option<Bytes>,
    generations: Mutex<Vec<ImageGenerationRequest>>,
    edits: Mutex<Vec<ImageEditRequest>>,
}

impl StaticImageBackend {
    pub fn new(image: impl Into<Bytes>) -> Self {
        Self {
            image: Some(image.into()),
            generations: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
        }
    }

    /// A backend whose calls succeed but return no images.
    pub fn empty() -> Self {
        Self {
            image: None,
            generations: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
        }
    }

    pub fn generation_requests(&self) -> Vec<ImageGenerationRequest> {
        lock(&self.generations).clone()
    }

    pub fn edit_requests(&self) -> Vec<ImageEditRequest> {
        lock(&self.edits).clone()
    }

    fn images(&self, count: u32) -> Vec<GeneratedImage> {
        match &self.image {
            Some(bytes) => (0..count.max(1))
                .map(|_| GeneratedImage {
                    bytes: bytes.clone(),
                    mime_type: "image/png".to_string(),
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl ImageGenerator for StaticImageBackend {
    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> GenAiResult<Vec<GeneratedImage>> {
        lock(&self.generations).push(request.clone());
        Ok(self.images(request.number_of_images))
    }
}

#[async_trait]
impl ImageEditor for StaticImageBackend {
    async fn edit_image(&self, request: &ImageEditRequest) -> GenAiResult<Vec<GeneratedImage>> {
        lock(&self.edits).push(request.clone());
        Ok(self.images(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_in_order_then_fallback() {
        let generator = ScriptedGenerator::new(["first", "second"]).with_fallback("again");
        let prompt = TextPrompt::new(vec!["write".to_string()]);

        assert_eq!(generator.generate_text(&prompt).await.unwrap(), "first");
        assert_eq!(generator.generate_text(&prompt).await.unwrap(), "second");
        assert_eq!(generator.generate_text(&prompt).await.unwrap(), "again");
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let generator = ScriptedGenerator::new(Vec::<String>::new());
        generator.push_failure("quota exceeded");
        let prompt = TextPrompt::new(vec![]);

        assert!(matches!(
            generator.generate_text(&prompt).await,
            Err(GenAiError::Api { status: 500, .. })
        ));
        assert!(matches!(
            generator.generate_text(&prompt).await,
            Err(GenAiError::EmptyResponse(_))
        ));
    }
}
