//! prom2teams configuration core
//!
//! Loads, layers and validates the startup configuration of the prom2teams
//! alert bridge and projects it onto the host's settings store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod observability;

pub use config::{resolve, resolve_source, resolve_with_defaults, AppSettings, ConfigSource};
pub use error::{Error, Result};
