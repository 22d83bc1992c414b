//! Icon resolution and loading services.

pub mod loader;
pub mod resolver;

pub use loader::{
    CompletedCallback, ErrorCallback, IconLoader, LoadCallbacks, LoadInput, LoadOutcome,
    PendingLoad, PublishHook,
};
pub use resolver::{IconRegistry, IconResolver, IconSource, ResolveFuture};
