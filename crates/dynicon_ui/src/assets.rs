//! Asset source serving resolved icon artifacts to GPUI.
//!
//! `svg().path(..)` loads through the application's `AssetSource`. Presenters
//! publish each artifact they resolve here, keyed by its asset path.

use dynicon_core::IconArtifact;
use gpui::{AssetSource, Global, Result, SharedString};
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared store of resolved SVG documents.
///
/// Clones share the same store, so one copy can be the app's asset source and
/// another a global that presenters write to.
#[derive(Clone, Default)]
pub struct IconAssets {
    svgs: Arc<RwLock<HashMap<String, Arc<[u8]>>>>,
}

impl IconAssets {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `artifact` under its asset path.
    pub fn insert(&self, artifact: &IconArtifact) {
        tracing::trace!(path = artifact.asset_path(), "Publishing icon asset");
        self.svgs.write().insert(artifact.asset_path().to_string(), artifact.shared_data());
    }

    /// Check if `path` has been published.
    pub fn contains(&self, path: &str) -> bool {
        self.svgs.read().contains_key(path)
    }

    /// Number of published documents.
    pub fn len(&self) -> usize {
        self.svgs.read().len()
    }

    /// Check if nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.svgs.read().is_empty()
    }
}

impl AssetSource for IconAssets {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        Ok(self.svgs.read().get(path).map(|bytes| Cow::Owned(bytes.to_vec())))
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        let mut paths: Vec<SharedString> = self
            .svgs
            .read()
            .keys()
            .filter(|p| p.starts_with(path))
            .map(|p| SharedString::from(p.clone()))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl Global for IconAssets {}

#[cfg(test)]
mod tests {
    use super::*;
    use dynicon_core::IconRequest;

    fn artifact(name: &str) -> IconArtifact {
        IconArtifact::new(IconRequest::new(name).unwrap(), b"<svg/>".to_vec())
    }

    #[test]
    fn test_published_artifacts_load() {
        let assets = IconAssets::new();
        let shared = assets.clone();
        shared.insert(&artifact("svg1"));

        assert!(assets.contains("icons/svg1.svg"));
        let bytes = assets.load("icons/svg1.svg").unwrap().unwrap();
        assert_eq!(&*bytes, b"<svg/>");
        assert!(assets.load("icons/svg2.svg").unwrap().is_none());
    }

    #[test]
    fn test_list_filters_by_prefix() {
        let assets = IconAssets::new();
        assets.insert(&artifact("svg2"));
        assets.insert(&artifact("svg1"));

        let listed = assets.list("icons/").unwrap();
        assert_eq!(listed, vec![SharedString::from("icons/svg1.svg"), SharedString::from("icons/svg2.svg")]);
        assert!(assets.list("images/").unwrap().is_empty());
    }
}
