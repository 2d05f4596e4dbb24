//! Load -> validate -> project.
//!
//! Any failure aborts the run; the host never sees partial settings.

use super::document::ConfigDocument;
use super::loader::{self, ConfigSource};
use super::settings::{project, AppSettings, SettingsOverrides};
use super::validate::validate;
use crate::observability::spans;
use crate::Result;
use std::path::Path;

/// Resolve settings from a default file and an optional override file.
///
/// # Arguments
///
/// * `default_path` - Default document on disk
/// * `override_path` - Optional override layered on top
///
/// # Errors
///
/// Returns the first load, validation or projection error.
pub fn resolve(default_path: &Path, override_path: Option<&Path>) -> Result<AppSettings> {
    let span = spans::resolve_span(override_path);
    let _guard = span.enter();

    let doc = loader::load(default_path, override_path)?;
    finish(&doc)
}

/// Resolve settings from the embedded defaults and an optional override file.
///
/// # Errors
///
/// Returns the first load, validation or projection error.
pub fn resolve_with_defaults(override_path: Option<&Path>) -> Result<AppSettings> {
    let span = spans::resolve_span(override_path);
    let _guard = span.enter();

    let doc = loader::load_with_defaults(override_path)?;
    finish(&doc)
}

/// Resolve from a [`ConfigSource`] and apply post-projection overrides.
///
/// This is the usual startup entry for a host process.
///
/// # Errors
///
/// Returns the first load, validation or projection error.
pub fn resolve_source(
    source: &ConfigSource,
    overrides: &SettingsOverrides,
) -> Result<AppSettings> {
    let settings = resolve_with_defaults(source.override_path())?;
    if !overrides.is_empty() {
        tracing::debug!(?overrides, "Applying settings overrides");
    }
    Ok(settings.with_overrides(overrides))
}

fn finish(doc: &ConfigDocument) -> Result<AppSettings> {
    validate(doc)?;
    let settings = project(doc)?;

    tracing::info!(
        host = %settings.host,
        port = %settings.port,
        connectors = settings.microsoft_teams.len(),
        render_list = settings.template_render_list,
        "Configuration resolved"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_ini(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_alone_fail_validation() {
        let err = resolve_with_defaults(None).unwrap_err();
        assert!(matches!(err, Error::MissingConnectorConfigKey { .. }));
    }

    #[test]
    fn test_validation_runs_before_projection() {
        // Both a missing connector and a bad boolean: validation reports first.
        let file = write_ini("[Template]\nRenderList = maybe\n");
        let err = resolve_with_defaults(Some(file.path())).unwrap_err();
        assert_eq!(err.stage(), "validate");
    }

    #[test]
    fn test_bad_boolean_aborts() {
        let file =
            write_ini("[Microsoft Teams]\nConnector = url\n[Template]\nRenderList = maybe\n");
        let err = resolve_with_defaults(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }

    #[test]
    fn test_resolve_source_applies_overrides() {
        let file = write_ini("[Microsoft Teams]\nConnector = url\n[Log]\nLevel = WARNING\n");
        let source = ConfigSource::File(file.path().to_path_buf());
        let overrides = SettingsOverrides {
            log_level: Some("DEBUG".to_string()),
            ..Default::default()
        };
        let settings = resolve_source(&source, &overrides).unwrap();
        assert_eq!(settings.log_level, "DEBUG");
        assert_eq!(settings.microsoft_teams["Connector"], "url");
    }

    #[test]
    fn test_resolve_with_custom_default_path() {
        let defaults = write_ini(
            "[HTTP Server]\nHost = h\nPort = 1\n[Log]\nLevel = INFO\nPath = /tmp/x.log\n\
             [Template]\nPath = t.j2\nRenderList = false\n[Group Alerts]\nField = name\n",
        );
        let overrides = write_ini("[Microsoft Teams]\nConnector = url\n");
        let settings = resolve(defaults.path(), Some(overrides.path())).unwrap();
        assert_eq!(settings.host, "h");
        assert_eq!(settings.group_alerts_by, "name");
    }
}
