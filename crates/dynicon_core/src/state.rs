//! Application state.
//!
//! Owns the tokio runtime that icon resolutions run on and the shared icon
//! registry. Implements `gpui::Global` when the `gpui` feature is enabled.

use crate::config::DemoConfig;
use crate::error::IconError;
use crate::models::IconArtifact;
use crate::services::{IconLoader, IconRegistry, LoadInput, LoadOutcome};

use std::sync::Arc;

/// Central application state.
pub struct IconState {
    /// Registry all loaders resolve against
    registry: Arc<IconRegistry>,
    /// Configuration the state was built from
    config: DemoConfig,
    /// Tokio runtime for async resolution
    tokio_runtime: tokio::runtime::Runtime,
}

impl IconState {
    /// Create state with an empty registry and default configuration.
    pub fn new() -> Result<Self, IconError> {
        Self::with_config(DemoConfig::default())
    }

    /// Create state from `config`.
    ///
    /// Scans `config.icon_dir` when set. A directory that cannot be read is
    /// logged and skipped; icons can still be registered afterwards.
    pub fn with_config(config: DemoConfig) -> Result<Self, IconError> {
        config.validate()?;

        let tokio_runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .thread_name("dynicon-resolver")
            .enable_all()
            .build()
            .map_err(|e| IconError::internal(format!("Failed to create tokio runtime: {e}")))?;

        let registry = Arc::new(IconRegistry::new());
        if let Some(dir) = &config.icon_dir {
            if let Err(e) = registry.scan_dir(dir) {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to scan icon directory");
            }
        }

        tracing::info!(worker_threads = config.worker_threads, "IconState initialized");

        Ok(Self { registry, config, tokio_runtime })
    }

    /// Get the shared icon registry.
    pub fn registry(&self) -> &Arc<IconRegistry> {
        &self.registry
    }

    /// Get the configuration.
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Get a handle to the tokio runtime.
    pub fn runtime(&self) -> &tokio::runtime::Runtime {
        &self.tokio_runtime
    }

    /// Create an idle loader backed by the registry.
    pub fn loader(&self) -> IconLoader {
        IconLoader::new(self.registry.clone())
    }

    /// Create an idle loader that passes each trusted artifact to `publish`
    /// before the loader reports it as loaded.
    pub fn loader_with_publisher(
        &self,
        publish: impl Fn(&IconArtifact) + Send + Sync + 'static,
    ) -> IconLoader {
        IconLoader::with_publisher(self.registry.clone(), publish)
    }

    /// Apply `input` to `loader` and spawn the resolution if it restarted.
    ///
    /// Returns `None` when the inputs were unchanged.
    pub fn start(
        &self,
        loader: &IconLoader,
        input: LoadInput,
    ) -> Option<tokio::task::JoinHandle<LoadOutcome>> {
        loader.update(input).map(|pending| self.tokio_runtime.spawn(pending.run()))
    }

    /// Spawn a future on the tokio runtime.
    ///
    /// Use this for resolution work to avoid blocking the UI thread.
    pub fn spawn<F, T>(&self, future: F) -> tokio::task::JoinHandle<T>
    where
        F: std::future::Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.tokio_runtime.spawn(future)
    }

    /// Block on a future using the tokio runtime.
    ///
    /// Note: Avoid using this from the main thread as it will block.
    pub fn block_on<F, T>(&self, future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        self.tokio_runtime.block_on(future)
    }
}

#[cfg(feature = "gpui")]
impl gpui::Global for IconState {}
