//! prom2teams-config - resolve and print the startup configuration.
//!
//! Runs the same load/validate/project pipeline the server runs at startup
//! and prints the resulting settings, so a deployment can be checked before
//! it is rolled out.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use anyhow::Context;
use clap::Parser;
use prom2teams_config::config::{self, SettingValue, SettingsOverrides};
use prom2teams_config::observability::{config_from_env, init_tracing};
use prom2teams_config::{AppSettings, ConfigSource};
use std::path::PathBuf;

/// Resolve prom2teams configuration and print the result
#[derive(Parser, Debug)]
#[command(name = "prom2teams-config")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override configuration file (falls back to APP_CONFIG_FILE)
    #[arg(short = 'c', long = "configpath")]
    config_path: Option<PathBuf>,

    /// Default configuration file to use instead of the built-in one
    #[arg(long, env = "PROM2TEAMS_DEFAULT_CONFIG")]
    default_config: Option<PathBuf>,

    /// Print settings as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    overrides: SettingsOverrides,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tracing_config = config_from_env();
    init_tracing(&tracing_config.level, tracing_config.json);

    let source = ConfigSource::resolve(cli.config_path);
    tracing::debug!(?source, "Configuration source selected");

    let settings = match &cli.default_config {
        Some(default_path) => {
            config::resolve(default_path, source.override_path())?.with_overrides(&cli.overrides)
        }
        None => config::resolve_source(&source, &cli.overrides)?,
    };

    if cli.json {
        let out = serde_json::to_string_pretty(&settings).context("serializing settings")?;
        println!("{out}");
    } else {
        print_settings(&settings);
    }

    Ok(())
}

fn print_settings(settings: &AppSettings) {
    for (name, value) in settings.to_entries() {
        match value {
            SettingValue::Str(s) => println!("{name} = {s}"),
            SettingValue::Bool(b) => println!("{name} = {b}"),
            SettingValue::Map(map) => {
                for (key, url) in map {
                    println!("{name}.{key} = {url}");
                }
            }
        }
    }
}
