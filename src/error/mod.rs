//! Error types and Result aliases for configuration resolution.
//!
//! Every failure here is fatal to startup: the pipeline aborts on the first
//! error and never hands partial settings to the host.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for configuration resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// Override path was supplied but does not resolve to a readable file.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Override file exists but is not UTF-8 text.
    #[error("configuration file is not valid UTF-8: {}", path.display())]
    InvalidEncoding { path: PathBuf },

    /// The merged document has no usable connector in `[Microsoft Teams]`.
    #[error("missing connector configuration: [{section}] needs at least one non-empty key")]
    MissingConnectorConfigKey { section: &'static str },

    /// A value failed its declared type coercion.
    #[error("invalid value for [{section}] {key}: '{value}' ({reason})")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: &'static str,
    },

    /// A key the projection needs is absent from the merged document.
    #[error("missing required key [{section}] {key}")]
    MissingKey { section: String, key: String },

    /// Malformed INI line.
    #[error("parse error in {source_name} at line {line}: {reason}")]
    Parse {
        source_name: String,
        line: usize,
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a not-found error for an override path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an encoding error for an override path.
    pub fn invalid_encoding(path: impl Into<PathBuf>) -> Self {
        Self::InvalidEncoding { path: path.into() }
    }

    /// Create a coercion error.
    pub fn invalid_value(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidValue {
            section: section.into(),
            key: key.into(),
            value: value.into(),
            reason,
        }
    }

    /// Create a missing-key error.
    pub fn missing_key(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(source_name: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Pipeline stage that produced this error.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. }
            | Self::InvalidEncoding { .. }
            | Self::Parse { .. }
            | Self::Io(_) => "load",
            Self::MissingConnectorConfigKey { .. } => "validate",
            Self::InvalidValue { .. } | Self::MissingKey { .. } => "project",
        }
    }
}
