//! Core types and services for Dynicon.
//!
//! This crate loads SVG icons by symbolic name and tracks their load state:
//!
//! - **error**: The `IconError` type and display helpers
//! - **models**: Requests, artifacts, load state and the presenter view
//! - **services**: The icon registry and the per-slot loader
//! - **state**: Application state owning the runtime and registry
//! - **config**: JSON configuration for the demo shell
//! - **logging**: Structured logging setup

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use config::DemoConfig;
pub use error::{ErrorInfo, IconError};
pub use models::{IconArtifact, IconRequest, IconView, LoadState, PresentationAttributes};
pub use services::{IconLoader, IconRegistry, IconResolver, LoadCallbacks, LoadInput, LoadOutcome};
pub use state::IconState;
