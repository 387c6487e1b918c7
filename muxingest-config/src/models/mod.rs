pub mod sources;

use std::{path::PathBuf, time::Duration};

use chrono_tz::Tz;
use muxingest_core::{GatePolicy, InitiatorSettings};

/// Zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Copenhagen;

/// Where the effective configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

/// Effective settings for an ingest run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Days of archive to consider, the target date included.
    pub retention_days: u32,
    /// Age after which an unfinished workflow is presumed stuck.
    pub expected_ingest_duration: Duration,
    pub final_component: String,
    pub final_state: String,
    pub timezone: Tz,
    pub parallel_gate: bool,
    pub metadata: ConfigMetadata,
}

impl IngestConfig {
    pub fn gate_policy(&self) -> muxingest_core::Result<GatePolicy> {
        GatePolicy::from_std(
            self.final_component.as_str(),
            self.final_state.as_str(),
            self.expected_ingest_duration,
        )
    }

    pub fn initiator_settings(
        &self,
    ) -> muxingest_core::Result<InitiatorSettings> {
        Ok(InitiatorSettings {
            retention_days: self.retention_days,
            timezone: self.timezone,
            gate: self.gate_policy()?,
            parallel_gate: self.parallel_gate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn converts_into_initiator_settings() {
        let config = IngestConfig {
            retention_days: 28,
            expected_ingest_duration: Duration::from_secs(12 * 3600),
            final_component: "Yousee complete workflow final step".into(),
            final_state: "Completed".into(),
            timezone: DEFAULT_TIMEZONE,
            parallel_gate: true,
            metadata: ConfigMetadata::default(),
        };

        let settings = config.initiator_settings().unwrap();
        assert_eq!(settings.retention_days, 28);
        assert!(settings.parallel_gate);
        assert_eq!(settings.gate.expected_duration, TimeDelta::hours(12));
        assert_eq!(settings.gate.final_state, "Completed");
    }
}
