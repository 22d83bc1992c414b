//! Data models for icon requests, artifacts, load state and presentation.

pub mod artifact;
pub mod attributes;
pub mod request;
pub mod state;
pub mod view;

pub use artifact::IconArtifact;
pub use attributes::PresentationAttributes;
pub use request::IconRequest;
pub use state::LoadState;
pub use view::{IconView, LOADING_PLACEHOLDER};
