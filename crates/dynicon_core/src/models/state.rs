//! Load state of a single icon loader.

use std::sync::Arc;

use crate::error::IconError;
use crate::models::IconArtifact;

/// Resolution progress of one loader.
///
/// A fresh loader starts `Idle`. Starting a resolution always moves to
/// `Loading`; a trusted completion moves from `Loading` to exactly one of
/// `Loaded` or `Failed`. A name that cannot be requested at all fails from any
/// state.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// No request has been made yet.
    #[default]
    Idle,
    /// A resolution is in flight.
    Loading,
    /// The latest request resolved to an artifact.
    Loaded(IconArtifact),
    /// The latest request failed.
    Failed(Arc<IconError>),
}

impl LoadState {
    /// Check if a resolution is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if no request has been made.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Get the resolved artifact, if any.
    pub fn artifact(&self) -> Option<&IconArtifact> {
        match self {
            Self::Loaded(artifact) => Some(artifact),
            _ => None,
        }
    }

    /// Get the failure, if any.
    pub fn error(&self) -> Option<&Arc<IconError>> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }

    /// Check whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: &LoadState) -> bool {
        match next {
            Self::Loading => true,
            Self::Loaded(_) => self.is_loading(),
            // A rejected name fails without ever loading
            Self::Failed(_) => true,
            Self::Idle => false,
        }
    }
}

impl From<Result<IconArtifact, IconError>> for LoadState {
    fn from(result: Result<IconArtifact, IconError>) -> Self {
        match result {
            Ok(artifact) => Self::Loaded(artifact),
            Err(error) => Self::Failed(Arc::new(error)),
        }
    }
}
