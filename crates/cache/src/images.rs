//! On-disk cache of generated and edited images, keyed by filename.

use bytes::Bytes;
use marketing_core::{MarketingError, MarketingResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Flat directory of image files.
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Filenames must be a single path component.
    fn path_for(&self, filename: &str) -> MarketingResult<PathBuf> {
        let valid = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\']);
        if !valid {
            return Err(MarketingError::Cache(format!(
                "invalid image filename '{filename}'"
            )));
        }
        Ok(self.dir.join(filename))
    }

    /// Write `bytes` under `filename`, creating the cache directory if needed.
    /// Returns the full path of the written file.
    pub async fn save(&self, bytes: &[u8], filename: &str) -> MarketingResult<PathBuf> {
        let path = self.path_for(filename)?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            warn!(dir = %self.dir.display(), error = %e, "Failed to create image cache directory");
            MarketingError::Cache(format!("cannot create {}: {e}", self.dir.display()))
        })?;
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to write cached image");
            MarketingError::Cache(format!("cannot write {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), size = bytes.len(), "Cached image");
        Ok(path)
    }

    /// Read a cached image. `Ok(None)` when the file does not exist.
    pub async fn load(&self, filename: &str) -> MarketingResult<Option<Bytes>> {
        let path = self.path_for(filename)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MarketingError::Cache(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(".cache")
    }
}
