use chrono::TimeDelta;
use thiserror::Error;

use crate::models::IngestConfig;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("retention days must be at least 1")]
    RetentionTooShort,
    #[error("expected ingest duration {duration:?} is too large")]
    DurationOutOfRange { duration: std::time::Duration },
    #[error("{field} must not be blank")]
    BlankFinalStage { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }
}

pub fn apply_guard_rails(
    config: &IngestConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.retention_days == 0 {
        return Err(ConfigGuardRailError::RetentionTooShort);
    }

    if config.final_component.trim().is_empty() {
        return Err(ConfigGuardRailError::BlankFinalStage {
            field: "final_component",
        });
    }
    if config.final_state.trim().is_empty() {
        return Err(ConfigGuardRailError::BlankFinalStage {
            field: "final_state",
        });
    }

    if TimeDelta::from_std(config.expected_ingest_duration).is_err() {
        return Err(ConfigGuardRailError::DurationOutOfRange {
            duration: config.expected_ingest_duration,
        });
    }

    if config.expected_ingest_duration.is_zero() {
        warnings.push_with_hint(
            "expected ingest duration is zero; every unfinished workflow will be triggered again",
            "Set MUXINGEST_EXPECTED_INGEST_DURATION to the usual end-to-end ingest time, e.g. 12h",
        );
    }

    Ok(warnings)
}
