//! Startup configuration for prom2teams.
//!
//! Resolution runs once, before the server starts:
//! - Load: embedded (or on-disk) defaults, with an optional override file
//!   layered on top key by key
//! - Validate: at least one `[Microsoft Teams]` connector
//! - Project: typed [`AppSettings`] under stable names

mod document;
pub mod keys;
mod loader;
mod pipeline;
mod settings;
mod validate;

pub use document::{ConfigDocument, Section};
pub use loader::{
    load, load_with_defaults, read_override, ConfigSource, CONFIG_FILE_ENV, DEFAULT_CONFIG,
    DEFAULT_DOCUMENT,
};
pub use pipeline::{resolve, resolve_source, resolve_with_defaults};
pub use settings::{project, AppSettings, SettingValue, SettingsOverrides, SettingsSink};
pub use validate::{connectors, validate};
