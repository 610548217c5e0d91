//! Error types for create-cp-core

use thiserror::Error;

/// Result type alias using create-cp-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
///
/// User cancellation and clone failures are deliberately absent: they are
/// ordinary outcomes (see [`crate::resolver::Resolution`] and
/// [`crate::fetch::FetchOutcome`]) rather than errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid runtime configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The cloned project has no manifest
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: String },

    /// The manifest exists but is not a JSON object
    #[error("Invalid manifest: {message}")]
    InvalidManifest { message: String },

    /// Terminal prompt failed
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    /// Path is not valid UTF-8 or cannot be resolved
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a manifest not found error
    pub fn manifest_not_found(path: impl Into<String>) -> Self {
        Self::ManifestNotFound { path: path.into() }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::invalid_config("CREATE_CP_CLONE_DEPTH must be a number");
        assert!(err.to_string().starts_with("Invalid configuration:"));

        let err = Error::manifest_not_found("/tmp/app/package.json");
        assert_eq!(
            err.to_string(),
            "Manifest not found: /tmp/app/package.json"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
