//! Shared storage step of the image sub-agents: image cache first, then the
//! artifact store.

use crate::tools::ImageToolOutput;
use marketing_cache::{ArtifactStore, ImageCache};
use marketing_genai::GeneratedImage;
use tracing::{error, info};

pub const PNG_MIME: &str = "image/png";

/// First 30 characters of a prompt with every non-alphanumeric character
/// replaced by `_`, for use in filenames.
pub fn sanitize_prompt(prompt: &str) -> String {
    prompt
        .chars()
        .take(30)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Write the image to the cache and record it as an artifact version under
/// the MIME type the backend reported (PNG when it reported none).
pub(crate) async fn persist_image(
    cache: &ImageCache,
    artifacts: &ArtifactStore,
    image: &GeneratedImage,
    filename: String,
    prompt: &str,
) -> ImageToolOutput {
    let mime_type = match image.mime_type.trim() {
        "" => PNG_MIME,
        reported => reported,
    };
    if let Err(e) = cache.save(&image.bytes, &filename).await {
        error!(filename = %filename, error = %e, "Error saving image to cache");
        return ImageToolOutput::failed(prompt, "Failed to save image to cache");
    }
    match artifacts.save(&filename, image.bytes.clone(), mime_type) {
        Ok(version) => {
            info!(filename = %filename, version, mime_type, "Image saved as artifact");
            ImageToolOutput::saved(prompt, filename, version, mime_type)
        }
        Err(e) => {
            error!(filename = %filename, error = %e, "Error saving artifact");
            ImageToolOutput::failed(prompt, format!("Artifact service error: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_sanitize_prompt() {
        assert_eq!(sanitize_prompt("a red tent, at dawn!"), "a_red_tent__at_dawn_");
        assert_eq!(
            sanitize_prompt("abcdefghijklmnopqrstuvwxyz0123456789"),
            "abcdefghijklmnopqrstuvwxyz0123"
        );
        assert_eq!(sanitize_prompt(""), "");
    }

    #[tokio::test]
    async fn test_cache_failure_reported_without_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let artifacts = ArtifactStore::new();

        let output = persist_image(
            &ImageCache::new(&blocker),
            &artifacts,
            &GeneratedImage {
                bytes: Bytes::from_static(b"png"),
                mime_type: PNG_MIME.to_string(),
            },
            "generated_image_x.png".into(),
            "x",
        )
        .await;
        assert!(!output.success);
        assert_eq!(output.error.as_deref(), Some("Failed to save image to cache"));
        assert!(artifacts.is_empty());
    }

    #[tokio::test]
    async fn test_reported_mime_type_recorded() {
        let tmp = tempfile::tempdir().unwrap();
        let artifacts = ArtifactStore::new();
        let cache = ImageCache::new(tmp.path());

        let jpeg = GeneratedImage {
            bytes: Bytes::from_static(b"jpeg"),
            mime_type: "image/jpeg".to_string(),
        };
        let output = persist_image(&cache, &artifacts, &jpeg, "a.png".into(), "a").await;
        assert_eq!(output.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(artifacts.load("a.png", None).unwrap().mime_type, "image/jpeg");

        let unlabelled = GeneratedImage {
            bytes: Bytes::from_static(b"raw"),
            mime_type: String::new(),
        };
        let output = persist_image(&cache, &artifacts, &unlabelled, "b.png".into(), "b").await;
        assert_eq!(output.mime_type.as_deref(), Some(PNG_MIME));
    }
}
