use anyhow::{Context, anyhow};
use muxingest_core::memory::{
    InMemoryChannelMapper, InMemoryRequestStore, InMemoryWorkflowStates,
};
use muxingest_model::{
    ChannelMapping, ModelError, RecordingWindowRequest, WorkflowState,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Snapshot of the three external collaborators, used to drive a run
/// without the archive's database or workflow monitor.
///
/// In TOML, dates and times must be quoted strings (`"2012-01-09"`,
/// `"14:00:00"`), not native TOML datetimes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Fixtures {
    #[serde(default)]
    pub requests: Vec<RecordingWindowRequest>,
    #[serde(default)]
    pub channel_mappings: Vec<ChannelMapping>,
    #[serde(default)]
    pub workflow_states: Vec<WorkflowState>,
}

impl Fixtures {
    /// Decodes by extension; unknown extensions try TOML, then JSON.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read fixtures from {}", path.display())
        })?;

        let fixtures: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents).with_context(|| {
                format!("invalid fixtures {}", path.display())
            }),
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid fixtures {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }?;
        fixtures.validate().with_context(|| {
            format!("invalid request in fixtures {}", path.display())
        })?;
        Ok(fixtures)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.requests
            .iter()
            .try_for_each(RecordingWindowRequest::validate)
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse fixtures {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn request_store(&self) -> InMemoryRequestStore {
        InMemoryRequestStore::new(self.requests.clone())
    }

    pub fn channel_mapper(&self) -> InMemoryChannelMapper {
        InMemoryChannelMapper::new(self.channel_mappings.clone())
    }

    pub fn workflow_states(&self) -> InMemoryWorkflowStates {
        InMemoryWorkflowStates::with_states(self.workflow_states.iter().cloned())
    }
}
