//! Typed settings projected from the merged document.

use super::document::ConfigDocument;
use super::keys::{self, setting};
use crate::{Error, Result};
use clap::Args;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Resolved application settings.
///
/// Serializes under the stable names the host reads (`HOST`, `PORT`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppSettings {
    /// Bind host, passed through verbatim.
    pub host: String,

    /// Bind port. Kept as a string; the host does its own numeric parsing.
    pub port: String,

    /// Path of the message template.
    pub template_path: String,

    /// Render grouped alerts as a list.
    pub template_render_list: bool,

    /// Log level name.
    pub log_level: String,

    /// Log file path.
    pub log_file_path: String,

    /// Alert label used to group alerts. Empty means no grouping.
    pub group_alerts_by: String,

    /// Connector name to webhook URL, exactly as configured.
    pub microsoft_teams: IndexMap<String, String>,
}

/// A single value written into the host's settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Str(String),
    Bool(bool),
    Map(IndexMap<String, String>),
}

impl SettingValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Host-side settings container: anything that can store a named value.
pub trait SettingsSink {
    /// Store `value` under `name`, replacing any previous value.
    fn set(&mut self, name: &str, value: SettingValue);
}

impl SettingsSink for HashMap<String, SettingValue> {
    fn set(&mut self, name: &str, value: SettingValue) {
        self.insert(name.to_string(), value);
    }
}

impl SettingsSink for BTreeMap<String, SettingValue> {
    fn set(&mut self, name: &str, value: SettingValue) {
        self.insert(name.to_string(), value);
    }
}

/// Values that replace projected settings after resolution.
///
/// Derives [`clap::Args`] so a host binary can `#[command(flatten)]` it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct SettingsOverrides {
    /// Log level, replaces [Log] Level
    #[arg(short = 'L', long = "loglevel")]
    pub log_level: Option<String>,

    /// Log file path, replaces [Log] Path
    #[arg(short = 'l', long = "logfilepath")]
    pub log_file_path: Option<String>,

    /// Template path, replaces [Template] Path
    #[arg(short = 't', long = "templatepath")]
    pub template_path: Option<String>,

    /// Alert field to group by, replaces [Group Alerts] Field
    #[arg(short = 'g', long = "groupalertsby")]
    pub group_alerts_by: Option<String>,
}

impl SettingsOverrides {
    /// True when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.log_level.is_none()
            && self.log_file_path.is_none()
            && self.template_path.is_none()
            && self.group_alerts_by.is_none()
    }
}

impl AppSettings {
    /// Write every setting into `sink` under its stable name.
    pub fn apply_to<S: SettingsSink + ?Sized>(&self, sink: &mut S) {
        for (name, value) in self.to_entries() {
            sink.set(name, value);
        }
    }

    /// Settings as `(name, value)` pairs in a fixed order.
    #[must_use]
    pub fn to_entries(&self) -> Vec<(&'static str, SettingValue)> {
        vec![
            (setting::HOST, SettingValue::Str(self.host.clone())),
            (setting::PORT, SettingValue::Str(self.port.clone())),
            (
                setting::TEMPLATE_PATH,
                SettingValue::Str(self.template_path.clone()),
            ),
            (
                setting::TEMPLATE_RENDER_LIST,
                SettingValue::Bool(self.template_render_list),
            ),
            (setting::LOG_LEVEL, SettingValue::Str(self.log_level.clone())),
            (
                setting::LOG_FILE_PATH,
                SettingValue::Str(self.log_file_path.clone()),
            ),
            (
                setting::GROUP_ALERTS_BY,
                SettingValue::Str(self.group_alerts_by.clone()),
            ),
            (
                setting::MICROSOFT_TEAMS,
                SettingValue::Map(self.microsoft_teams.clone()),
            ),
        ]
    }

    /// Replace fields with any values set in `overrides`.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(level) = &overrides.log_level {
            self.log_level.clone_from(level);
        }
        if let Some(path) = &overrides.log_file_path {
            self.log_file_path.clone_from(path);
        }
        if let Some(path) = &overrides.template_path {
            self.template_path.clone_from(path);
        }
        if let Some(field) = &overrides.group_alerts_by {
            self.group_alerts_by.clone_from(field);
        }
        self
    }

    /// Bind address as `host:port`.
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Map the merged document onto [`AppSettings`].
///
/// Pure: the same document always yields the same settings.
///
/// # Arguments
///
/// * `doc` - Merged, validated document
///
/// # Returns
///
/// Settings with passthrough strings, a coerced `template_render_list` and
/// every `[Microsoft Teams]` entry copied verbatim.
///
/// # Errors
///
/// Returns [`Error::MissingKey`] if a required key is absent and
/// [`Error::InvalidValue`] if `[Template] RenderList` is not literally
/// `true` or `false`.
pub fn project(doc: &ConfigDocument) -> Result<AppSettings> {
    Ok(AppSettings {
        host: required(doc, keys::HTTP_SERVER, keys::HOST)?.to_string(),
        port: required(doc, keys::HTTP_SERVER, keys::PORT)?.to_string(),
        template_path: required(doc, keys::TEMPLATE, keys::PATH)?.to_string(),
        template_render_list: parse_bool(
            keys::TEMPLATE,
            keys::RENDER_LIST,
            required(doc, keys::TEMPLATE, keys::RENDER_LIST)?,
        )?,
        log_level: required(doc, keys::LOG, keys::LEVEL)?.to_string(),
        log_file_path: required(doc, keys::LOG, keys::PATH)?.to_string(),
        group_alerts_by: required(doc, keys::GROUP_ALERTS, keys::FIELD)?.to_string(),
        microsoft_teams: doc
            .section(keys::MICROSOFT_TEAMS)
            .cloned()
            .unwrap_or_default(),
    })
}

fn required<'a>(doc: &'a ConfigDocument, section: &str, key: &str) -> Result<&'a str> {
    doc.get(section, key)
        .ok_or_else(|| Error::missing_key(section, key))
}

// Literal match only; "True" and "1" are rejected.
fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::invalid_value(
            section,
            key,
            other,
            "expected 'true' or 'false'",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::DEFAULT_DOCUMENT;

    fn merged(overlay: &str) -> ConfigDocument {
        DEFAULT_DOCUMENT
            .clone()
            .merged(&ConfigDocument::parse(overlay, "test.ini").unwrap())
    }

    #[test]
    fn test_project_defaults() {
        let settings = project(&DEFAULT_DOCUMENT).unwrap();
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, "9090");
        assert!(!settings.template_render_list);
        assert_eq!(settings.log_level, "INFO");
        assert_eq!(settings.group_alerts_by, "");
        assert!(settings.microsoft_teams.is_empty());
    }

    #[test]
    fn test_render_list_true() {
        let settings = project(&merged("[Template]\nRenderList = true\n")).unwrap();
        assert!(settings.template_render_list);
    }

    #[test]
    fn test_render_list_is_case_sensitive() {
        for value in ["True", "FALSE", "1", "yes", ""] {
            let doc = merged(&format!("[Template]\nRenderList = {value}\n"));
            let err = project(&doc).unwrap_err();
            assert!(
                matches!(err, Error::InvalidValue { .. }),
                "'{value}' should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_required_key() {
        let doc = ConfigDocument::parse("[HTTP Server]\nHost = x\n", "partial.ini").unwrap();
        let err = project(&doc).unwrap_err();
        match err {
            Error::MissingKey { section, key } => {
                assert_eq!(section, "HTTP Server");
                assert_eq!(key, "Port");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_connectors_copied_verbatim_in_order() {
        let doc = merged("[Microsoft Teams]\nzeta = z\nalpha = a\nEmpty =\n");
        let settings = project(&doc).unwrap();
        let names: Vec<_> = settings.microsoft_teams.keys().cloned().collect();
        assert_eq!(names, ["zeta", "alpha", "Empty"]);
        assert_eq!(settings.microsoft_teams["Empty"], "");
    }

    #[test]
    fn test_project_is_idempotent() {
        let doc = merged("[Microsoft Teams]\nConnector = url\n[Template]\nRenderList = true\n");
        assert_eq!(project(&doc).unwrap(), project(&doc).unwrap());
    }

    #[test]
    fn test_apply_to_hashmap() {
        let settings = project(&merged("[Microsoft Teams]\nConnector = url\n")).unwrap();
        let mut store: HashMap<String, SettingValue> = HashMap::new();
        settings.apply_to(&mut store);

        assert_eq!(store.len(), 8);
        assert_eq!(store["HOST"].as_str(), Some("localhost"));
        assert_eq!(store["TEMPLATE_RENDER_LIST"].as_bool(), Some(false));
        assert_eq!(
            store["MICROSOFT_TEAMS"]
                .as_map()
                .and_then(|m| m.get("Connector"))
                .map(String::as_str),
            Some("url")
        );
    }

    #[test]
    fn test_apply_to_replaces_previous_values() {
        let mut store: BTreeMap<String, SettingValue> = BTreeMap::new();
        store.set("HOST", SettingValue::Str("stale".to_string()));
        project(&DEFAULT_DOCUMENT).unwrap().apply_to(&mut store);
        assert_eq!(store["HOST"].as_str(), Some("localhost"));
    }

    #[test]
    fn test_to_entries_order() {
        let entries = project(&DEFAULT_DOCUMENT).unwrap().to_entries();
        let names: Vec<_> = entries.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            [
                "HOST",
                "PORT",
                "TEMPLATE_PATH",
                "TEMPLATE_RENDER_LIST",
                "LOG_LEVEL",
                "LOG_FILE_PATH",
                "GROUP_ALERTS_BY",
                "MICROSOFT_TEAMS",
            ]
        );
    }

    #[test]
    fn test_serialize_uses_stable_names() {
        let settings = project(&merged("[Microsoft Teams]\nConnector = url\n")).unwrap();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["HOST"], "localhost");
        assert_eq!(value["PORT"], "9090");
        assert_eq!(value["TEMPLATE_RENDER_LIST"], false);
        assert_eq!(value["MICROSOFT_TEAMS"]["Connector"], "url");
    }

    #[test]
    fn test_with_overrides() {
        let overrides = SettingsOverrides {
            log_level: Some("DEBUG".to_string()),
            group_alerts_by: Some("alertname".to_string()),
            ..Default::default()
        };
        let settings = project(&DEFAULT_DOCUMENT)
            .unwrap()
            .with_overrides(&overrides);
        assert_eq!(settings.log_level, "DEBUG");
        assert_eq!(settings.group_alerts_by, "alertname");
        assert_eq!(settings.template_path, "resources/templates/teams.j2");
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let overrides = SettingsOverrides::default();
        assert!(overrides.is_empty());
        let settings = project(&DEFAULT_DOCUMENT).unwrap();
        assert_eq!(settings.clone().with_overrides(&overrides), settings);
    }

    #[test]
    fn test_server_addr() {
        let settings = project(&merged("[HTTP Server]\nHost = 0.0.0.0\nPort = 8089\n")).unwrap();
        assert_eq!(settings.server_addr(), "0.0.0.0:8089");
    }
}
