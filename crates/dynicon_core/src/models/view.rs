//! Pure projection of a load state to what a presenter should draw.

use crate::models::{IconArtifact, LoadState, PresentationAttributes};

/// Text shown while a resolution is in flight.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// What a presenter renders for a given load state.
#[derive(Debug, Clone, PartialEq)]
pub enum IconView {
    /// Resolution failed; render the message text.
    Error(String),
    /// Resolution pending; render [`LOADING_PLACEHOLDER`].
    Loading,
    /// Render the artifact with the caller's attributes.
    Icon {
        /// Resolved artifact.
        artifact: IconArtifact,
        /// Attributes forwarded verbatim from the presenter.
        attributes: PresentationAttributes,
    },
    /// Nothing requested yet.
    Empty,
}

impl IconView {
    /// Project `state` to a view, forwarding `attributes` unchanged.
    pub fn present(state: &LoadState, attributes: &PresentationAttributes) -> Self {
        match state {
            LoadState::Failed(error) => Self::Error(error.message().to_string()),
            LoadState::Loading => Self::Loading,
            LoadState::Loaded(artifact) => {
                Self::Icon { artifact: artifact.clone(), attributes: attributes.clone() }
            }
            LoadState::Idle => Self::Empty,
        }
    }

    /// Text content of this view, if it renders as text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Loading => Some(LOADING_PLACEHOLDER),
            Self::Icon { .. } | Self::Empty => None,
        }
    }
}
