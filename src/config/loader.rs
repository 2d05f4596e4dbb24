//! Loading the default and override documents.
//!
//! Defaults come either from a file on disk or from the copy of `config.ini`
//! compiled into the binary. The override is optional; when it is given it
//! must be a readable file.

use super::document::ConfigDocument;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable naming the override file when no path is passed.
pub const CONFIG_FILE_ENV: &str = "APP_CONFIG_FILE";

/// Default configuration text, embedded at build time.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.ini");

const EMBEDDED_SOURCE: &str = "<embedded config.ini>";

/// Parsed embedded defaults, built on first use and never mutated.
///
/// `DEFAULT_CONFIG` is compiled in and covered by tests, so a parse failure
/// here is a build defect rather than a runtime condition.
pub static DEFAULT_DOCUMENT: Lazy<ConfigDocument> = Lazy::new(|| {
    ConfigDocument::parse(DEFAULT_CONFIG, EMBEDDED_SOURCE)
        .expect("embedded config.ini must parse")
});

/// Where the override document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No override, defaults only.
    Defaults,
    /// Override file at the given path.
    File(PathBuf),
}

impl ConfigSource {
    /// Pick the override source.
    ///
    /// An explicit path wins, then a non-empty `APP_CONFIG_FILE`, then
    /// defaults alone.
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::from_parts(explicit, env::var(CONFIG_FILE_ENV).ok())
    }

    fn from_parts(explicit: Option<PathBuf>, env_value: Option<String>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path);
        }
        match env_value {
            Some(value) if !value.trim().is_empty() => Self::File(PathBuf::from(value)),
            _ => Self::Defaults,
        }
    }

    /// The override path, if any.
    #[must_use]
    pub fn override_path(&self) -> Option<&Path> {
        match self {
            Self::Defaults => None,
            Self::File(path) => Some(path),
        }
    }
}

/// Load defaults from `default_path` and layer the optional override on top.
///
/// # Arguments
///
/// * `default_path` - Default document; expected to exist and be well-formed
/// * `override_path` - Optional override; `None` means defaults alone
///
/// # Returns
///
/// The merged document. Keys from the override shadow defaults one by one.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] if `override_path` is given but cannot
/// be read, [`Error::Io`] if `default_path` cannot be read, and
/// [`Error::Parse`] if either document is malformed.
pub fn load(default_path: &Path, override_path: Option<&Path>) -> Result<ConfigDocument> {
    let content = fs::read_to_string(default_path)?;
    let defaults = ConfigDocument::parse(&content, &default_path.display().to_string())?;
    tracing::debug!(
        path = %default_path.display(),
        sections = defaults.len(),
        "Default configuration loaded"
    );
    layer(defaults, override_path)
}

/// Layer the optional override on top of the embedded defaults.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] if `override_path` is given but cannot
/// be read, and [`Error::Parse`] if it is malformed.
pub fn load_with_defaults(override_path: Option<&Path>) -> Result<ConfigDocument> {
    layer(DEFAULT_DOCUMENT.clone(), override_path)
}

/// Read and parse an override document.
///
/// # Arguments
///
/// * `path` - Override file supplied by the caller
///
/// # Returns
///
/// The parsed override, not yet layered over any defaults.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] if the path is not a readable file,
/// [`Error::InvalidEncoding`] if it is not UTF-8 text, and [`Error::Parse`]
/// if it is malformed.
pub fn read_override(path: &Path) -> Result<ConfigDocument> {
    if !path.is_file() {
        return Err(Error::not_found(path));
    }
    let content = fs::read_to_string(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "Override file unreadable");
        if e.kind() == ErrorKind::InvalidData {
            Error::invalid_encoding(path)
        } else {
            Error::not_found(path)
        }
    })?;
    ConfigDocument::parse(&content, &path.display().to_string())
}

fn layer(defaults: ConfigDocument, override_path: Option<&Path>) -> Result<ConfigDocument> {
    let Some(path) = override_path else {
        tracing::debug!("No override file given, using defaults only");
        return Ok(defaults);
    };

    let overrides = read_override(path)?;
    if overrides.is_empty() {
        tracing::debug!(path = %path.display(), "Override file has no sections");
    }
    for (name, section) in overrides.sections() {
        for key in section.keys() {
            tracing::debug!(section = name, key = %key, "Override applied");
        }
    }
    tracing::debug!(
        path = %path.display(),
        sections = overrides.len(),
        "Override configuration layered over defaults"
    );

    Ok(defaults.merged(&overrides))
}
