//! Resolved icon artifact.

use std::fmt;
use std::sync::Arc;

use crate::models::IconRequest;

/// Renderable representation of a resolved icon.
///
/// Opaque to everything except the renderer. Clones share the SVG bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct IconArtifact {
    request: IconRequest,
    asset_path: Arc<str>,
    data: Arc<[u8]>,
}

impl IconArtifact {
    /// Create an artifact for `request` from SVG bytes.
    pub fn new(request: IconRequest, data: impl Into<Arc<[u8]>>) -> Self {
        let asset_path = Arc::from(request.asset_path());
        Self { request, asset_path, data: data.into() }
    }

    /// Symbolic name this artifact was resolved from.
    pub fn name(&self) -> &str {
        self.request.name()
    }

    /// The request this artifact satisfies.
    pub fn request(&self) -> &IconRequest {
        &self.request
    }

    /// Path the renderer uses to look the artifact up in its asset source.
    pub fn asset_path(&self) -> &str {
        &self.asset_path
    }

    /// Raw SVG document bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the SVG bytes.
    pub fn shared_data(&self) -> Arc<[u8]> {
        self.data.clone()
    }

    /// Size of the SVG document in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the SVG document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for IconArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconArtifact")
            .field("name", &self.name())
            .field("asset_path", &self.asset_path)
            .field("bytes", &self.data.len())
            .finish()
    }
}
