//! Dynamic icon loader.
//!
//! Tracks the load state of one presenter slot:
//! - Every new request moves the state to `Loading` and bumps a generation
//! - Completions tagged with an older generation are discarded silently
//! - A request that cannot be built supersedes the slot and fails it directly
//! - State changes are published through a `tokio::sync::watch` channel
//! - [`IconLoader::drive`] restarts resolution whenever an observed input changes

use crate::error::IconError;
use crate::models::{IconArtifact, IconRequest, LoadState};
use crate::services::resolver::{IconResolver, ResolveFuture};

use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Called with `(name, artifact)` when a trusted resolution succeeds.
pub type CompletedCallback = Arc<dyn Fn(&str, &IconArtifact) + Send + Sync>;

/// Called with the failure when a trusted resolution fails.
pub type ErrorCallback = Arc<dyn Fn(&IconError) + Send + Sync>;

/// Called with a trusted artifact right before it becomes the loader state.
pub type PublishHook = Arc<dyn Fn(&IconArtifact) + Send + Sync>;

/// Optional completion and failure callbacks.
///
/// Identity matters: replacing a callback with a different `Arc` restarts the
/// load, re-supplying a clone of the same `Arc` does not.
#[derive(Clone, Default)]
pub struct LoadCallbacks {
    on_completed: Option<CompletedCallback>,
    on_error: Option<ErrorCallback>,
}

impl LoadCallbacks {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the completion callback.
    pub fn on_completed(mut self, callback: impl Fn(&str, &IconArtifact) + Send + Sync + 'static) -> Self {
        self.on_completed = Some(Arc::new(callback));
        self
    }

    /// Set the failure callback.
    pub fn on_error(mut self, callback: impl Fn(&IconError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Set an already shared completion callback.
    pub fn with_completed(mut self, callback: CompletedCallback) -> Self {
        self.on_completed = Some(callback);
        self
    }

    /// Set an already shared failure callback.
    pub fn with_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Check whether both callbacks are the same allocations as in `other`.
    pub fn same_as(&self, other: &LoadCallbacks) -> bool {
        fn same<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        same(&self.on_completed, &other.on_completed) && same(&self.on_error, &other.on_error)
    }

    fn notify(&self, state: &LoadState) {
        match state {
            LoadState::Loaded(artifact) => {
                if let Some(callback) = &self.on_completed {
                    callback(artifact.name(), artifact);
                }
            }
            LoadState::Failed(error) => {
                if let Some(callback) = &self.on_error {
                    callback(error);
                }
            }
            LoadState::Idle | LoadState::Loading => {}
        }
    }
}

impl fmt::Debug for LoadCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadCallbacks")
            .field("on_completed", &self.on_completed.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Inputs that determine what a loader resolves.
#[derive(Debug, Clone)]
pub struct LoadInput {
    /// Icon to resolve.
    pub request: IconRequest,
    /// Callbacks fired on trusted completion.
    pub callbacks: LoadCallbacks,
}

impl LoadInput {
    /// Input for `request` with no callbacks.
    pub fn new(request: IconRequest) -> Self {
        Self { request, callbacks: LoadCallbacks::default() }
    }

    /// Attach callbacks.
    pub fn with_callbacks(mut self, callbacks: LoadCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Check whether applying `other` after `self` requires a restart.
    pub fn differs_from(&self, other: &LoadInput) -> bool {
        self.request != other.request || !self.callbacks.same_as(&other.callbacks)
    }
}

/// How a resolution ended.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The result was written to the loader state.
    Applied(LoadState),
    /// A newer request started first; the result was dropped.
    Superseded,
}

impl LoadOutcome {
    /// Check if the result was written to the loader state.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

struct LoaderInner {
    input: Option<LoadInput>,
    generation: u64,
}

struct Shared {
    resolver: Arc<dyn IconResolver>,
    publish: Option<PublishHook>,
    inner: Mutex<LoaderInner>,
    state: watch::Sender<LoadState>,
}

/// Loader for one presenter slot.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct IconLoader {
    shared: Arc<Shared>,
}

impl IconLoader {
    /// Create an idle loader backed by `resolver`.
    pub fn new(resolver: Arc<dyn IconResolver>) -> Self {
        Self::build(resolver, None)
    }

    /// Create an idle loader that hands every trusted artifact to `publish`
    /// before publishing the `Loaded` state.
    ///
    /// Runs on the resolving task with the loader locked; `publish` must not
    /// call back into the loader.
    pub fn with_publisher(
        resolver: Arc<dyn IconResolver>,
        publish: impl Fn(&IconArtifact) + Send + Sync + 'static,
    ) -> Self {
        Self::build(resolver, Some(Arc::new(publish)))
    }

    fn build(resolver: Arc<dyn IconResolver>, publish: Option<PublishHook>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            shared: Arc::new(Shared {
                resolver,
                publish,
                inner: Mutex::new(LoaderInner { input: None, generation: 0 }),
                state,
            }),
        }
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.shared.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.shared.state.subscribe()
    }

    /// The most recent request, if any.
    pub fn request(&self) -> Option<IconRequest> {
        self.shared.inner.lock().input.as_ref().map(|input| input.request.clone())
    }

    /// Number of resolutions started so far.
    pub fn generation(&self) -> u64 {
        self.shared.inner.lock().generation
    }

    /// Apply new inputs.
    ///
    /// Returns the resolution to run when the name or a callback identity
    /// changed, or `None` when the inputs are unchanged.
    pub fn update(&self, input: LoadInput) -> Option<PendingLoad> {
        let inner = self.shared.inner.lock();
        if let Some(current) = &inner.input {
            if !current.differs_from(&input) {
                return None;
            }
        }
        Some(self.start(inner, input))
    }

    /// Record a name that could not become an [`IconRequest`].
    ///
    /// Supersedes any resolution in flight, forgets the current request and
    /// moves straight to `Failed(error)`, firing `callbacks.on_error`. The
    /// next [`update`](Self::update) always restarts.
    pub fn reject(&self, error: IconError, callbacks: &LoadCallbacks) -> LoadState {
        let state = LoadState::Failed(Arc::new(error));
        {
            let mut inner = self.shared.inner.lock();
            let generation = self.advance(&mut inner, None, state.clone());
            tracing::debug!(generation, "Rejected icon request");
        }
        callbacks.notify(&state);
        state
    }

    /// Restart resolution of the current request, even if unchanged.
    ///
    /// Returns `None` if nothing was requested yet.
    pub fn reload(&self) -> Option<PendingLoad> {
        let inner = self.shared.inner.lock();
        let input = inner.input.clone()?;
        Some(self.start(inner, input))
    }

    /// Start resolving `input` unconditionally and wait for the outcome.
    pub async fn load(&self, input: LoadInput) -> LoadOutcome {
        let pending = {
            let inner = self.shared.inner.lock();
            self.start(inner, input)
        };
        pending.run().await
    }

    /// Follow `inputs`, restarting resolution on every observed change.
    ///
    /// Each resolution runs as its own task; superseded ones are not aborted.
    /// Returns when the input sender is dropped. Must run inside a tokio
    /// runtime.
    pub async fn drive(self, mut inputs: watch::Receiver<Option<LoadInput>>) {
        loop {
            let input = inputs.borrow_and_update().clone();
            if let Some(pending) = input.and_then(|input| self.update(input)) {
                tokio::spawn(pending.run());
            }
            if inputs.changed().await.is_err() {
                tracing::trace!("Load input closed, stopping loader");
                break;
            }
        }
    }

    /// Bump the generation, record `input` and publish `state`.
    fn advance(&self, inner: &mut LoaderInner, input: Option<LoadInput>, state: LoadState) -> u64 {
        inner.generation += 1;
        inner.input = input;
        self.shared.state.send_replace(state);
        inner.generation
    }

    /// Enter `Loading` for `input`, then call the resolver with the lock released.
    fn start(&self, mut inner: MutexGuard<'_, LoaderInner>, input: LoadInput) -> PendingLoad {
        let generation = self.advance(&mut inner, Some(input.clone()), LoadState::Loading);
        drop(inner);

        tracing::debug!(icon = %input.request, generation, "Loading icon");
        let future = self.shared.resolver.resolve(&input.request);

        PendingLoad { loader: self.clone(), generation, input, future }
    }

    fn complete(&self, generation: u64, result: Result<IconArtifact, IconError>) -> LoadOutcome {
        let inner = self.shared.inner.lock();
        if inner.generation != generation {
            tracing::trace!(
                generation,
                current = inner.generation,
                "Discarding superseded icon resolution"
            );
            return LoadOutcome::Superseded;
        }

        let next = LoadState::from(result);
        if let (Some(publish), LoadState::Loaded(artifact)) = (&self.shared.publish, &next) {
            publish(artifact);
        }
        self.shared.state.send_replace(next.clone());
        LoadOutcome::Applied(next)
    }
}

impl fmt::Debug for IconLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("IconLoader")
            .field("request", &inner.input.as_ref().map(|input| &input.request))
            .field("generation", &inner.generation)
            .field("state", &self.shared.state.borrow().label())
            .finish()
    }
}

/// A started resolution waiting to be driven to completion.
///
/// The loader is already `Loading` when this exists. Dropping it without
/// running leaves the loader `Loading` until a newer request completes.
#[must_use = "a pending load does nothing until run"]
pub struct PendingLoad {
    loader: IconLoader,
    generation: u64,
    input: LoadInput,
    future: ResolveFuture,
}

impl PendingLoad {
    /// Generation tag of this resolution.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The request being resolved.
    pub fn request(&self) -> &IconRequest {
        &self.input.request
    }

    /// Resolve, apply the result if still current, then fire callbacks.
    pub async fn run(self) -> LoadOutcome {
        let Self { loader, generation, input, future } = self;
        let result = future.await;

        match &result {
            Ok(artifact) => {
                tracing::debug!(icon = %input.request, bytes = artifact.len(), generation, "Icon resolved")
            }
            Err(e) => tracing::warn!(icon = %input.request, error = %e, generation, "Icon resolution failed"),
        }

        let outcome = loader.complete(generation, result);
        if let LoadOutcome::Applied(state) = &outcome {
            input.callbacks.notify(state);
        }
        outcome
    }
}

impl fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLoad")
            .field("request", &self.input.request)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resolver::IconRegistry;
    use futures_util::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::OnceLock;
    use tokio::sync::oneshot;

    const SVG1: &[u8] = b"<svg id=\"one\"/>";
    const SVG2: &[u8] = b"<svg id=\"two\"/>";

    fn registry() -> Arc<IconRegistry> {
        let registry = IconRegistry::new();
        registry.register_embedded("svg1", SVG1);
        registry.register_embedded("svg2", SVG2);
        Arc::new(registry)
    }

    fn input(name: &str) -> LoadInput {
        LoadInput::new(IconRequest::new(name).unwrap())
    }

    /// Registers `name` so that its resolution waits until the returned sender fires.
    fn gated(registry: &IconRegistry, name: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel::<()>();
        let rx = Arc::new(Mutex::new(Some(rx)));
        registry.register_fn(name.to_string(), move || {
            let rx = rx.lock().take();
            async move {
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                Ok(b"<svg id=\"gated\"/>".to_vec())
            }
        });
        tx
    }

    #[tokio::test]
    async fn test_load_success() {
        let loader = IconLoader::new(registry());
        assert!(loader.state().is_idle());

        let outcome = loader.load(input("svg1")).await;
        assert!(outcome.is_applied());

        let state = loader.state();
        let artifact = state.artifact().unwrap();
        assert_eq!(artifact.name(), "svg1");
        assert_eq!(artifact.data(), SVG1);
    }

    #[tokio::test]
    async fn test_load_failure_becomes_state() {
        let loader = IconLoader::new(registry());
        loader.load(input("missing")).await;

        let state = loader.state();
        assert!(state.artifact().is_none());
        assert_eq!(state.error().unwrap().message(), "Cannot find module './missing.svg'");
    }

    #[tokio::test]
    async fn test_loading_while_pending() {
        let registry = registry();
        let loader = IconLoader::new(registry.clone());
        loader.load(input("svg1")).await;

        let gate = gated(&registry, "slow");
        let pending = loader.update(input("slow")).unwrap();

        // The prior artifact is gone as soon as the new request starts
        assert!(loader.state().is_loading());
        assert!(loader.state().artifact().is_none());

        let task = tokio::spawn(pending.run());
        gate.send(()).unwrap();
        assert!(task.await.unwrap().is_applied());
        assert_eq!(loader.state().artifact().unwrap().name(), "slow");
    }

    #[tokio::test]
    async fn test_callbacks_fire_on_completion() {
        let completed = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let callbacks = LoadCallbacks::new()
            .on_completed({
                let completed = completed.clone();
                move |name: &str, _: &IconArtifact| completed.lock().push(name.to_string())
            })
            .on_error({
                let errors = errors.clone();
                move |e: &IconError| errors.lock().push(e.message().to_string())
            });

        let loader = IconLoader::new(registry());
        loader.load(input("svg2").with_callbacks(callbacks.clone())).await;
        loader.load(input("nope").with_callbacks(callbacks)).await;

        assert_eq!(*completed.lock(), vec!["svg2".to_string()]);
        assert_eq!(*errors.lock(), vec!["Cannot find module './nope.svg'".to_string()]);
    }

    #[tokio::test]
    async fn test_update_restarts_only_on_change() {
        let loader = IconLoader::new(registry());
        let callbacks = LoadCallbacks::new().on_error(|_: &IconError| {});

        let first = loader.update(input("svg1").with_callbacks(callbacks.clone())).unwrap();
        first.run().await;
        assert!(loader.update(input("svg1").with_callbacks(callbacks.clone())).is_none());

        // Same name, new callback identity
        let fresh = LoadCallbacks::new().on_error(|_: &IconError| {});
        assert!(loader.update(input("svg1").with_callbacks(fresh)).is_some());
        assert!(loader.update(input("svg2")).is_some());
        assert_eq!(loader.generation(), 3);
    }

    #[tokio::test]
    async fn test_reload_reenters_loading() {
        let loader = IconLoader::new(registry());
        assert!(loader.reload().is_none());

        loader.load(input("svg1")).await;
        let before = loader.state().artifact().cloned().unwrap();

        let pending = loader.reload().unwrap();
        assert!(loader.state().is_loading());
        pending.run().await;
        assert_eq!(loader.state().artifact(), Some(&before));
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let registry = registry();
        let gate = gated(&registry, "slow");
        let calls = Arc::new(AtomicUsize::new(0));
        let callbacks = LoadCallbacks::new().on_completed({
            let calls = calls.clone();
            move |_: &str, _: &IconArtifact| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        let loader = IconLoader::new(registry);
        let slow = loader.update(input("slow").with_callbacks(callbacks.clone())).unwrap();
        let slow = tokio::spawn(slow.run());

        let fast = loader.update(input("svg2").with_callbacks(callbacks)).unwrap();
        assert!(fast.run().await.is_applied());

        gate.send(()).unwrap();
        assert!(matches!(slow.await.unwrap(), LoadOutcome::Superseded));

        assert_eq!(loader.state().artifact().unwrap().name(), "svg2");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_subscribe_sees_transitions() {
        let loader = IconLoader::new(registry());
        let mut rx = loader.subscribe();

        let pending = loader.update(input("svg1")).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        pending.run().await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().artifact().unwrap().name(), "svg1");
    }

    #[tokio::test]
    async fn test_drive_follows_inputs() {
        let loader = IconLoader::new(registry());
        let (tx, rx) = watch::channel(Some(input("svg1")));
        let mut states = loader.subscribe();
        let driver = tokio::spawn(loader.clone().drive(rx));

        loop {
            states.changed().await.unwrap();
            if let Some(artifact) = states.borrow_and_update().artifact() {
                assert_eq!(artifact.name(), "svg1");
                break;
            }
        }

        tx.send(Some(input("svg2"))).unwrap();
        loop {
            states.changed().await.unwrap();
            if let Some(artifact) = states.borrow_and_update().artifact() {
                assert_eq!(artifact.name(), "svg2");
                break;
            }
        }

        drop(tx);
        driver.await.unwrap();
        assert_eq!(loader.generation(), 2);
    }

    #[tokio::test]
    async fn test_rejected_name_supersedes_and_fails() {
        let registry = registry();
        let gate = gated(&registry, "slow");
        let completed = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let callbacks = LoadCallbacks::new()
            .on_completed({
                let completed = completed.clone();
                move |_: &str, _: &IconArtifact| {
                    completed.fetch_add(1, Ordering::SeqCst);
                }
            })
            .on_error({
                let errors = errors.clone();
                move |e: &IconError| errors.lock().push(e.message().to_string())
            });

        let loader = IconLoader::new(registry);
        let slow = loader.update(input("slow").with_callbacks(callbacks.clone())).unwrap();
        let slow = tokio::spawn(slow.run());

        let rejected = IconRequest::new("   ").unwrap_err();
        let state = loader.reject(rejected, &callbacks);
        assert_eq!(state.error().unwrap().message(), "Icon name must not be empty");
        assert!(loader.request().is_none());

        gate.send(()).unwrap();
        assert!(matches!(slow.await.unwrap(), LoadOutcome::Superseded));
        assert_eq!(completed.load(Ordering::SeqCst), 0);
        assert_eq!(*errors.lock(), vec!["Icon name must not be empty".to_string()]);
        assert!(loader.state().error().is_some());
    }

    #[tokio::test]
    async fn test_same_name_after_rejection_restarts() {
        let loader = IconLoader::new(registry());
        loader.load(input("svg1")).await;

        loader.reject(IconRequest::new("").unwrap_err(), &LoadCallbacks::new());
        assert!(loader.state().artifact().is_none());

        let pending = loader.update(input("svg1")).unwrap();
        assert!(loader.state().is_loading());
        pending.run().await;
        assert_eq!(loader.state().artifact().unwrap().name(), "svg1");
        assert!(loader.update(input("svg1")).is_none());
    }

    #[tokio::test]
    async fn test_publisher_runs_before_loaded_is_visible() {
        let registry = registry();
        let gate = gated(&registry, "slow");
        let states: Arc<OnceLock<watch::Receiver<LoadState>>> = Arc::new(OnceLock::new());
        let published = Arc::new(Mutex::new(Vec::new()));

        let loader = IconLoader::with_publisher(registry, {
            let states = states.clone();
            let published = published.clone();
            move |artifact: &IconArtifact| {
                let label = states.get().map(|rx| rx.borrow().label());
                published.lock().push((artifact.name().to_string(), label));
            }
        });
        let _ = states.set(loader.subscribe());

        let slow = tokio::spawn(loader.update(input("slow")).unwrap().run());
        loader.update(input("svg2")).unwrap().run().await;
        gate.send(()).unwrap();
        slow.await.unwrap();

        // Superseded artifacts are never published
        assert_eq!(*published.lock(), vec![("svg2".to_string(), Some("loading"))]);
        assert_eq!(loader.state().artifact().unwrap().name(), "svg2");
    }

    /// Resolver that reads back the loader that is calling it.
    #[derive(Default)]
    struct Reentrant {
        loader: OnceLock<IconLoader>,
        seen: Mutex<Vec<(u64, Option<String>)>>,
    }

    impl IconResolver for Reentrant {
        fn resolve(&self, request: &IconRequest) -> ResolveFuture {
            if let Some(loader) = self.loader.get() {
                let current = loader.request().map(|r| r.name().to_string());
                self.seen.lock().push((loader.generation(), current));
            }
            let artifact = IconArtifact::new(request.clone(), SVG1.to_vec());
            async move { Ok(artifact) }.boxed()
        }
    }

    #[tokio::test]
    async fn test_resolver_may_read_loader() {
        let resolver = Arc::new(Reentrant::default());
        let loader = IconLoader::new(resolver.clone());
        let _ = resolver.loader.set(loader.clone());

        assert!(loader.load(input("svg1")).await.is_applied());
        assert_eq!(*resolver.seen.lock(), vec![(1, Some("svg1".to_string()))]);
    }
}
