//! Error types for Dynicon.
//!
//! Icon loading has a single failure kind, [`IconError::Resolution`]. The other
//! variants belong to the surrounding application (configuration, filesystem,
//! runtime setup) and never reach a presenter.

use thiserror::Error;

/// Main error type for Dynicon.
#[derive(Debug, Error)]
pub enum IconError {
    /// The resolver could not map a name to an icon artifact.
    #[error("{message}")]
    Resolution {
        /// Symbolic name that failed to resolve.
        name: String,
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read or is invalid.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the user.
        hint: Option<String>,
    },

    /// Filesystem error outside of icon resolution.
    #[error("IO error: {message}")]
    Io {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unexpected internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
    },
}

impl IconError {
    // ========== Constructors ==========

    /// Create a new resolution failure for `name`.
    pub fn resolution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution { name: name.into(), message: message.into(), source: None }
    }

    /// Create a new resolution failure with source.
    pub fn resolution_with_source(
        name: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Resolution { name: name.into(), message: message.into(), source: Some(Box::new(source)) }
    }

    /// Resolution failure for a name the resolver does not know.
    pub fn not_found(name: &str) -> Self {
        Self::resolution(name, format!("Cannot find module './{name}.svg'"))
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>, hint: Option<&str>) -> Self {
        Self::Config { message: message.into(), hint: hint.map(String::from) }
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    // ========== Methods ==========

    /// Check if this error came from icon resolution.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. })
    }

    /// Name of the icon that failed to resolve (if applicable).
    pub fn icon_name(&self) -> Option<&str> {
        match self {
            Self::Resolution { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Message text without the category prefix.
    ///
    /// This is what a presenter renders in place of the icon.
    pub fn message(&self) -> &str {
        match self {
            Self::Resolution { message, .. }
            | Self::Config { message, .. }
            | Self::Io { message, .. }
            | Self::Internal { message } => message,
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Resolution { .. } => "Resolution",
            Self::Config { .. } => "Config",
            Self::Io { .. } => "IO",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Get actionable hint for the user.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Resolution { .. } => Some("Check that the icon is registered"),
            Self::Config { hint, .. } => hint.as_deref(),
            Self::Io { .. } => Some("Check file permissions and disk space"),
            Self::Internal { .. } => Some("Please report this issue"),
        }
    }

    /// Convert to user-displayable error info.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            error_type: format!("{} Error", self.category()),
            message: self.to_string(),
            hint: self.hint().map(String::from),
            technical_detail: self.icon_name().map(|name| format!("Icon: {name}")),
        }
    }
}

/// User-displayable error information.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Category name (e.g., "Resolution Error").
    pub error_type: String,
    /// User-friendly message.
    pub message: String,
    /// Actionable suggestion.
    pub hint: Option<String>,
    /// Technical detail for "Show Details" expansion.
    pub technical_detail: Option<String>,
}

// ========== Error Conversions ==========

/// Convert from std::io::Error to IconError.
impl From<std::io::Error> for IconError {
    fn from(err: std::io::Error) -> Self {
        IconError::Io { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

/// Convert from serde_json::Error to IconError.
impl From<serde_json::Error> for IconError {
    fn from(err: serde_json::Error) -> Self {
        IconError::Config {
            message: format!("JSON error: {err}"),
            hint: Some("Fix or delete the configuration file".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = IconError::not_found("missing");
        assert_eq!(err.to_string(), "Cannot find module './missing.svg'");
        assert_eq!(err.message(), "Cannot find module './missing.svg'");
        assert_eq!(err.icon_name(), Some("missing"));
        assert!(err.is_resolution());
    }

    #[test]
    fn test_message_strips_category() {
        let err = IconError::config("bad value", None);
        assert_eq!(err.to_string(), "Config error: bad value");
        assert_eq!(err.message(), "bad value");
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn test_error_info() {
        let info = IconError::not_found("svg9").to_error_info();
        assert_eq!(info.error_type, "Resolution Error");
        assert_eq!(info.technical_detail.as_deref(), Some("Icon: svg9"));
        assert!(info.hint.is_some());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: IconError = io.into();
        assert_eq!(err.category(), "IO");
        assert!(std::error::Error::source(&err).is_some());
    }
}
