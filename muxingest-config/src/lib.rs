//! Configuration loading for the ingest initiator.
//!
//! [`ConfigLoader`] merges a `.env` file, a TOML file and the process
//! environment into an [`IngestConfig`], applies guard rails, and reports
//! non-fatal findings as [`ConfigWarnings`].

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    ConfigMetadata, DEFAULT_TIMEZONE, IngestConfig,
    sources::{EnvConfig, FileConfig},
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
