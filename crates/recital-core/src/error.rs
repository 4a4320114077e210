//! Error types for the Recital skill backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Recital backend.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Known user-input problems (an unknown recipe name, a missing navigation
/// context) are deliberately absent: handlers degrade those to spoken,
/// session-ending responses. The variants here cover request-boundary,
/// configuration, and storage failures that must surface to the caller.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RecitalError {
    /// Inbound event carried an application id other than the configured one.
    /// Aborts before any handler runs.
    #[error("Authorization error: unexpected application id '{0}'")]
    Authorization(String),

    /// Intent name outside the skill's interaction model.
    #[error("Invalid intent: '{0}'")]
    InvalidIntent(String),

    /// Inbound event failed validation at the parse boundary.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Missing or malformed recipe resource, empty step sequence, or
    /// missing environment configuration. Fatal at load time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Data access error (step-log/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecitalError {
    /// Creates an Authorization error
    pub fn authorization(application_id: impl Into<String>) -> Self {
        Self::Authorization(application_id.into())
    }

    /// Creates an InvalidIntent error
    pub fn invalid_intent(name: impl Into<String>) -> Self {
        Self::InvalidIntent(name.into())
    }

    /// Creates a MalformedRequest error
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest(message.into())
    }

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an Authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    /// Check if this is an InvalidIntent error
    pub fn is_invalid_intent(&self) -> bool {
        matches!(self, Self::InvalidIntent(_))
    }

    /// Check if this is a MalformedRequest error
    pub fn is_malformed_request(&self) -> bool {
        matches!(self, Self::MalformedRequest(_))
    }

    /// Check if this is a Configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<std::io::Error> for RecitalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RecitalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RecitalError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RecitalError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, RecitalError>`.
pub type Result<T> = std::result::Result<T, RecitalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_helpers() {
        assert!(RecitalError::authorization("app-1").is_authorization());
        assert!(RecitalError::invalid_intent("FooIntent").is_invalid_intent());
        assert!(RecitalError::malformed_request("no session").is_malformed_request());
        assert!(RecitalError::configuration("empty steps").is_configuration());
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let converted = RecitalError::from(err);
        assert!(matches!(
            converted,
            RecitalError::Serialization { ref format, .. } if format == "JSON"
        ));
    }

    #[test]
    fn test_display_includes_context() {
        let err = RecitalError::invalid_intent("MysteryIntent");
        assert_eq!(err.to_string(), "Invalid intent: 'MysteryIntent'");
    }
}
