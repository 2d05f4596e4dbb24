//! Structured logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or the host) via [`init_tracing`].

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Tracing configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Initialize tracing.
///
/// Events go to stderr so that stdout stays free for resolved settings.
///
/// # Arguments
///
/// * `level` - Filter directive used when `RUST_LOG` is unset
/// * `json` - Emit JSON lines instead of plain text
///
/// # Panics
///
/// Panics if a global subscriber has already been installed in this process.
pub fn init_tracing(level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(fmt_layer).init();
    }

    tracing::debug!("Tracing initialized: level={}, json={}", level, json);
}

/// Tracing configuration from the environment.
///
/// Respects these environment variables:
/// - `PROM2TEAMS_LOG_LEVEL` - log level (default: "info")
/// - `PROM2TEAMS_LOG_JSON` - JSON output (default: false)
///
/// # Returns
///
/// A `TracingConfig` with values from the environment or defaults
#[must_use]
pub fn config_from_env() -> TracingConfig {
    from_values(
        std::env::var("PROM2TEAMS_LOG_LEVEL").ok(),
        std::env::var("PROM2TEAMS_LOG_JSON").ok(),
    )
}

fn from_values(level: Option<String>, json: Option<String>) -> TracingConfig {
    TracingConfig {
        level: level.unwrap_or_else(|| "info".to_string()),
        json: json
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false),
    }
}

/// Spans for configuration resolution.
pub mod spans {
    use std::path::Path;
    use tracing::{info_span, Span};

    /// Span covering one resolution run.
    ///
    /// # Arguments
    ///
    /// * `override_path` - Override file for this run, if any
    #[must_use]
    pub fn resolve_span(override_path: Option<&Path>) -> Span {
        match override_path {
            Some(path) => info_span!("resolve_config", override_path = %path.display()),
            None => info_span!("resolve_config", override_path = "<none>"),
        }
    }
}
