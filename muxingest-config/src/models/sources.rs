use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub ingest: FileIngestConfig,
    #[serde(default)]
    pub workflow: FileWorkflowConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileIngestConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_gate: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileWorkflowConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_state: Option<String>,
    /// humantime duration, e.g. `12h`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_ingest_duration: Option<String>,
}

/// Environment-derived configuration values, still unparsed so that a bad
/// value can be reported against its variable name.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub retention_days: Option<String>,
    pub expected_ingest_duration: Option<String>,
    pub final_component: Option<String>,
    pub final_state: Option<String>,
    pub timezone: Option<String>,
    pub parallel_gate: Option<String>,
}

pub const ENV_CONFIG_PATH: &str = "MUXINGEST_CONFIG";
pub const ENV_RETENTION_DAYS: &str = "MUXINGEST_RETENTION_DAYS";
pub const ENV_EXPECTED_INGEST_DURATION: &str =
    "MUXINGEST_EXPECTED_INGEST_DURATION";
pub const ENV_FINAL_COMPONENT: &str = "MUXINGEST_FINAL_COMPONENT";
pub const ENV_FINAL_STATE: &str = "MUXINGEST_FINAL_STATE";
pub const ENV_TIMEZONE: &str = "MUXINGEST_TIMEZONE";
pub const ENV_PARALLEL_GATE: &str = "MUXINGEST_PARALLEL_GATE";

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).filter(|value| !value.trim().is_empty())
        };

        Self {
            config_path: var(ENV_CONFIG_PATH).map(PathBuf::from),
            retention_days: var(ENV_RETENTION_DAYS),
            expected_ingest_duration: var(ENV_EXPECTED_INGEST_DURATION),
            final_component: var(ENV_FINAL_COMPONENT),
            final_state: var(ENV_FINAL_STATE),
            timezone: var(ENV_TIMEZONE),
            parallel_gate: var(ENV_PARALLEL_GATE),
        }
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
