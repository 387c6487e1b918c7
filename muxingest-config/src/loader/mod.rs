pub mod error;

use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono_tz::Tz;
use tracing::debug;

use self::error::ConfigLoadError;
use super::{
    models::{
        ConfigMetadata, DEFAULT_TIMEZONE, IngestConfig,
        sources::{
            ENV_EXPECTED_INGEST_DURATION, ENV_FINAL_COMPONENT, ENV_FINAL_STATE,
            ENV_PARALLEL_GATE, ENV_RETENTION_DAYS, ENV_TIMEZONE, EnvConfig,
            FileConfig, parse_bool,
        },
    },
    validation::{self, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("muxingest.toml"),
        PathBuf::from("config/muxingest.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: IngestConfig,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Loads `.env`, then the config file, then the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Same as [`ConfigLoader::load`] with an already gathered environment;
    /// no `.env` file is read.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        debug!(
            config_path = ?config_path,
            env_file_loaded,
            "resolved configuration sources"
        );

        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };
        let (config, warnings) = Self::compose(file_config, env, metadata)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        }

        if source.is_empty() {
            source.default = DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
                .cloned();
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }

    /// Merges the sources (environment wins over file) and applies guard
    /// rails.
    pub fn compose(
        file_config: Option<FileConfig>,
        env: EnvConfig,
        metadata: ConfigMetadata,
    ) -> Result<(IngestConfig, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if metadata.config_path.is_none() {
            warnings.push_with_hint(
                "No muxingest.toml detected; using environment variables only",
                "Pass --config or set MUXINGEST_CONFIG to point at a configuration file",
            );
        }

        let FileConfig {
            ingest: file_ingest,
            workflow: file_workflow,
        } = file_config.unwrap_or_default();

        let retention_days = match env.retention_days {
            Some(raw) => parse_retention_days(&raw)?,
            None => file_ingest.retention_days.ok_or(
                ConfigLoadError::MissingValue {
                    key: "ingest.retention_days",
                    env: ENV_RETENTION_DAYS,
                },
            )?,
        };

        let raw_duration = env
            .expected_ingest_duration
            .or(file_workflow.expected_ingest_duration)
            .ok_or(ConfigLoadError::MissingValue {
                key: "workflow.expected_ingest_duration",
                env: ENV_EXPECTED_INGEST_DURATION,
            })?;
        let expected_ingest_duration = parse_duration(&raw_duration)?;

        let final_component = env
            .final_component
            .or(file_workflow.final_component)
            .ok_or(ConfigLoadError::MissingValue {
                key: "workflow.final_component",
                env: ENV_FINAL_COMPONENT,
            })?;
        let final_state = env
            .final_state
            .or(file_workflow.final_state)
            .ok_or(ConfigLoadError::MissingValue {
                key: "workflow.final_state",
                env: ENV_FINAL_STATE,
            })?;

        let timezone = match env.timezone.or(file_ingest.timezone) {
            Some(raw) => parse_timezone(&raw)?,
            None => DEFAULT_TIMEZONE,
        };

        let parallel_gate = match env.parallel_gate {
            Some(raw) => {
                parse_bool(&raw).ok_or_else(|| ConfigLoadError::InvalidValue {
                    key: ENV_PARALLEL_GATE,
                    value: raw.clone(),
                    reason: "expected a boolean".to_string(),
                })?
            }
            None => file_ingest.parallel_gate.unwrap_or(false),
        };

        let config = IngestConfig {
            retention_days,
            expected_ingest_duration,
            final_component,
            final_state,
            timezone,
            parallel_gate,
            metadata,
        };

        warnings.extend(validation::apply_guard_rails(&config)?);
        Ok((config, warnings))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn parse_retention_days(raw: &str) -> Result<u32, ConfigLoadError> {
    raw.trim()
        .parse()
        .map_err(|err: std::num::ParseIntError| ConfigLoadError::InvalidValue {
            key: ENV_RETENTION_DAYS,
            value: raw.to_string(),
            reason: err.to_string(),
        })
}

fn parse_duration(raw: &str) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|err| {
        ConfigLoadError::InvalidValue {
            key: "expected_ingest_duration",
            value: raw.to_string(),
            reason: err.to_string(),
        }
    })
}

fn parse_timezone(raw: &str) -> Result<Tz, ConfigLoadError> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|err| ConfigLoadError::InvalidValue {
            key: ENV_TIMEZONE,
            value: raw.to_string(),
            reason: err.to_string(),
        })
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn is_empty(&self) -> bool {
        self.explicit.is_none() && self.env.is_none() && self.default.is_none()
    }

    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}
