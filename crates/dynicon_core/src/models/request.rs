//! Icon request model.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::IconError;

/// Symbolic name identifying which icon to load.
///
/// Immutable once built. Cloning shares the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IconRequest {
    name: Arc<str>,
}

impl IconRequest {
    /// Create a request for `name`.
    ///
    /// The name is kept verbatim, so `" svg1"` and `"svg1"` are different
    /// icons. A name that is empty or only whitespace is rejected.
    pub fn new(name: impl AsRef<str>) -> Result<Self, IconError> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(IconError::resolution(name, "Icon name must not be empty"));
        }
        Ok(Self { name: Arc::from(name) })
    }

    /// Get the symbolic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asset path under which the resolved artifact is served.
    pub fn asset_path(&self) -> String {
        format!("icons/{}.svg", self.name)
    }
}

impl fmt::Display for IconRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for IconRequest {
    type Error = IconError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for IconRequest {
    type Error = IconError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IconRequest> for String {
    fn from(request: IconRequest) -> Self {
        request.name.to_string()
    }
}
