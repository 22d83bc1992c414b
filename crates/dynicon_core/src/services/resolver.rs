//! Icon resolution.
//!
//! Provides:
//! - The [`IconResolver`] capability the loader depends on
//! - [`IconRegistry`], an explicit name-to-source mapping
//! - Directory scanning for `*.svg` files

use crate::error::IconError;
use crate::models::{IconArtifact, IconRequest};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Future returned by [`IconResolver::resolve`].
pub type ResolveFuture = BoxFuture<'static, Result<IconArtifact, IconError>>;

/// Future returned by a custom source loader.
pub type SourceFuture = BoxFuture<'static, Result<Vec<u8>, IconError>>;

/// Custom asynchronous source of SVG bytes.
pub type SourceLoader = Arc<dyn Fn() -> SourceFuture + Send + Sync>;

/// Maps a symbolic name to an icon artifact, or fails.
///
/// Failures must be [`IconError::Resolution`]; the loader surfaces them as
/// `Failed` state and never propagates them further.
pub trait IconResolver: Send + Sync + 'static {
    /// Start resolving `request`.
    ///
    /// The returned future must not borrow from `self`.
    fn resolve(&self, request: &IconRequest) -> ResolveFuture;
}

impl<T: IconResolver + ?Sized> IconResolver for Arc<T> {
    fn resolve(&self, request: &IconRequest) -> ResolveFuture {
        (**self).resolve(request)
    }
}

/// Where the bytes of a registered icon come from.
#[derive(Clone)]
pub enum IconSource {
    /// Bytes compiled into the binary.
    Embedded(&'static [u8]),
    /// Bytes held in memory.
    Bytes(Arc<[u8]>),
    /// File read asynchronously on every resolution.
    File(PathBuf),
    /// Arbitrary asynchronous loader. Failures other than
    /// [`IconError::Resolution`] are wrapped into one for the icon.
    Custom(SourceLoader),
}

impl IconSource {
    /// Build a custom source from an async closure.
    pub fn custom<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, IconError>> + Send + 'static,
    {
        Self::Custom(Arc::new(move || loader().boxed()))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Embedded(_) => "embedded",
            Self::Bytes(_) => "bytes",
            Self::File(_) => "file",
            Self::Custom(_) => "custom",
        }
    }

    async fn load(self, name: &str) -> Result<Arc<[u8]>, IconError> {
        match self {
            Self::Embedded(bytes) => Ok(Arc::from(bytes)),
            Self::Bytes(bytes) => Ok(bytes),
            Self::File(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(Arc::from(bytes)),
                Err(e) => Err(IconError::resolution_with_source(
                    name,
                    format!("Cannot read '{}': {e}", path.display()),
                    e,
                )),
            },
            Self::Custom(loader) => match loader().await {
                Ok(bytes) => Ok(Arc::from(bytes)),
                Err(e) if e.is_resolution() => Err(e),
                Err(e) => {
                    let message = format!("Cannot load icon '{name}': {}", e.message());
                    Err(IconError::resolution_with_source(name, message, e))
                }
            },
        }
    }
}

impl fmt::Debug for IconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded(bytes) => f.debug_tuple("Embedded").field(&bytes.len()).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Explicit registry from symbolic name to icon source.
///
/// Thread-safe via `parking_lot::RwLock`; sources may be added while loads are
/// in flight.
#[derive(Debug, Default)]
pub struct IconRegistry {
    sources: RwLock<HashMap<String, IconSource>>,
}

impl IconRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` under `name`, replacing any previous source.
    pub fn register(&self, name: impl Into<String>, source: IconSource) {
        let name = name.into();
        tracing::debug!(icon = %name, kind = source.kind(), "Registering icon source");
        self.sources.write().insert(name, source);
    }

    /// Register bytes compiled into the binary.
    pub fn register_embedded(&self, name: impl Into<String>, bytes: &'static [u8]) {
        self.register(name, IconSource::Embedded(bytes));
    }

    /// Register a file read on every resolution.
    pub fn register_file(&self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.register(name, IconSource::File(path.into()));
    }

    /// Register an async loader function.
    pub fn register_fn<F, Fut>(&self, name: impl Into<String>, loader: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, IconError>> + Send + 'static,
    {
        self.register(name, IconSource::custom(loader));
    }

    /// Remove the source for `name`.
    pub fn unregister(&self, name: &str) -> Option<IconSource> {
        self.sources.write().remove(name)
    }

    /// Check if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sources.read().contains_key(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered icons.
    pub fn len(&self) -> usize {
        self.sources.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.read().is_empty()
    }

    /// Register every `*.svg` file in `dir` under its file stem.
    ///
    /// Subdirectories are not scanned. Returns the number of icons registered.
    pub fn scan_dir(&self, dir: &Path) -> Result<usize, IconError> {
        let mut count = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("svg") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "Skipping icon with non UTF-8 name");
                continue;
            };
            self.register_file(stem.to_string(), path.clone());
            count += 1;
        }

        tracing::info!(dir = %dir.display(), count, "Scanned icon directory");
        Ok(count)
    }
}

impl IconResolver for IconRegistry {
    fn resolve(&self, request: &IconRequest) -> ResolveFuture {
        let request = request.clone();
        let source = self.sources.read().get(request.name()).cloned();

        async move {
            let Some(source) = source else {
                return Err(IconError::not_found(request.name()));
            };

            let bytes = source.load(request.name()).await?;
            if !is_svg_document(&bytes) {
                return Err(IconError::resolution(
                    request.name(),
                    format!("Icon '{}' is not an SVG document", request.name()),
                ));
            }

            Ok(IconArtifact::new(request, bytes))
        }
        .boxed()
    }
}

/// Check that `bytes` contain an `<svg` element.
pub fn is_svg_document(bytes: &[u8]) -> bool {
    bytes.windows(4).any(|w| w.eq_ignore_ascii_case(b"<svg"))
}
