//! In-process versioned artifact store backed by DashMap.
//!
//! Every save of a filename appends a new version; versions start at 0.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use marketing_core::{MarketingError, MarketingResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredArtifact {
    data: Bytes,
    mime_type: String,
    saved_at: DateTime<Utc>,
}

/// A loaded artifact version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub version: u32,
    pub mime_type: String,
    pub data: Bytes,
}

/// Listing entry: the latest version of one filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub filename: String,
    pub latest_version: u32,
    pub mime_type: String,
    pub saved_at: DateTime<Utc>,
}

/// Lock-free artifact store shared across sessions.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    store: Arc<DashMap<String, Vec<StoredArtifact>>>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a version and return its number.
    pub fn save(
        &self,
        filename: &str,
        data: impl Into<Bytes>,
        mime_type: &str,
    ) -> MarketingResult<u32> {
        if filename.trim().is_empty() {
            return Err(MarketingError::Artifact("artifact filename is empty".into()));
        }
        let mut versions = self.store.entry(filename.to_string()).or_default();
        let version = u32::try_from(versions.len())
            .map_err(|_| MarketingError::Artifact(format!("too many versions of {filename}")))?;
        versions.push(StoredArtifact {
            data: data.into(),
            mime_type: mime_type.to_string(),
            saved_at: Utc::now(),
        });
        debug!(filename, version, mime_type, "Saved artifact");
        Ok(version)
    }

    /// Load a specific version, or the latest when `version` is `None`.
    pub fn load(&self, filename: &str, version: Option<u32>) -> Option<Artifact> {
        let versions = self.store.get(filename)?;
        let index = match version {
            Some(v) => usize::try_from(v).ok()?,
            None => versions.len().checked_sub(1)?,
        };
        let stored = versions.get(index)?;
        Some(Artifact {
            filename: filename.to_string(),
            version: u32::try_from(index).ok()?,
            mime_type: stored.mime_type.clone(),
            data: stored.data.clone(),
        })
    }

    /// Latest version of every artifact, sorted by filename.
    pub fn list(&self) -> Vec<ArtifactInfo> {
        let mut infos: Vec<ArtifactInfo> = self
            .store
            .iter()
            .filter_map(|entry| {
                let latest = entry.value().last()?;
                Some(ArtifactInfo {
                    filename: entry.key().clone(),
                    latest_version: u32::try_from(entry.value().len() - 1).ok()?,
                    mime_type: latest.mime_type.clone(),
                    saved_at: latest.saved_at,
                })
            })
            .collect();
        infos.sort_by(|a, b| a.filename.cmp(&b.filename));
        infos
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_start_at_zero_and_increment() {
        let store = ArtifactStore::new();
        assert_eq!(store.save("a.png", &b"v0"[..], "image/png").unwrap(), 0);
        assert_eq!(store.save("a.png", &b"v1"[..], "image/png").unwrap(), 1);
        assert_eq!(store.save("b.png", &b"b0"[..], "image/png").unwrap(), 0);

        let latest = store.load("a.png", None).unwrap();
        assert_eq!(latest.version, 1);
        assert_eq!(latest.data, Bytes::from_static(b"v1"));
        assert_eq!(store.load("a.png", Some(0)).unwrap().data, Bytes::from_static(b"v0"));
        assert!(store.load("a.png", Some(2)).is_none());
        assert!(store.load("missing.png", None).is_none());
    }

    #[test]
    fn test_list_reports_latest_versions() {
        let store = ArtifactStore::new();
        store.save("z.png", &b"1"[..], "image/png").unwrap();
        store.save("a.png", &b"1"[..], "image/png").unwrap();
        store.save("a.png", &b"2"[..], "image/png").unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].filename, "a.png");
        assert_eq!(listed[0].latest_version, 1);
        assert_eq!(listed[1].filename, "z.png");
        assert_eq!(listed[1].latest_version, 0);
    }

    #[test]
    fn test_empty_filename_rejected() {
        let store = ArtifactStore::new();
        assert!(matches!(
            store.save(" ", &b"x"[..], "image/png"),
            Err(MarketingError::Artifact(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_saves_get_distinct_versions() {
        let store = ArtifactStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.save("shared.png", &b"x"[..], "image/png").unwrap())
            })
            .collect();
        let mut versions: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        versions.sort_unstable();
        assert_eq!(versions, (0..8).collect::<Vec<_>>());
    }
}
