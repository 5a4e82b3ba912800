#![warn(clippy::unwrap_used)]

pub mod artifacts;
pub mod images;

pub use artifacts::{Artifact, ArtifactInfo, ArtifactStore};
pub use images::ImageCache;
