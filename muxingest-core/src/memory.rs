//! Collaborators backed by plain vectors and maps. Used by tests and by the
//! fixture-driven CLI.

use std::collections::HashMap;

use chrono::NaiveDate;
use muxingest_contracts::{
    ChannelMapper, RequestStore, ServiceError, WorkflowStateLookup,
};
use muxingest_model::{ChannelMapping, RecordingWindowRequest, WorkflowState};

#[derive(Debug, Clone, Default)]
pub struct InMemoryRequestStore {
    requests: Vec<RecordingWindowRequest>,
}

impl InMemoryRequestStore {
    pub fn new(requests: Vec<RecordingWindowRequest>) -> Self {
        Self { requests }
    }
}

impl RequestStore for InMemoryRequestStore {
    fn valid_requests(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RecordingWindowRequest>, ServiceError> {
        Ok(self
            .requests
            .iter()
            .filter(|request| request.overlaps(from, to))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryChannelMapper {
    mappings: Vec<ChannelMapping>,
}

impl InMemoryChannelMapper {
    pub fn new(mappings: Vec<ChannelMapping>) -> Self {
        Self { mappings }
    }

    /// Adds a mapping valid for every date.
    pub fn with_static(
        mut self,
        source_channel_id: impl Into<String>,
        mapped_channel_id: impl Into<String>,
    ) -> Self {
        self.mappings.push(ChannelMapping::new(
            source_channel_id,
            mapped_channel_id,
            NaiveDate::MIN,
            NaiveDate::MAX,
        ));
        self
    }
}

impl ChannelMapper for InMemoryChannelMapper {
    fn resolve(
        &self,
        source_channel_id: &str,
        on_date: NaiveDate,
    ) -> Result<String, ServiceError> {
        let mut applicable = self
            .mappings
            .iter()
            .filter(|mapping| mapping.applies_to(source_channel_id, on_date));
        match (applicable.next(), applicable.count()) {
            (Some(mapping), 0) => Ok(mapping.mapped_channel_id.clone()),
            (first, rest) => Err(ServiceError::NoUniqueMapping {
                channel: source_channel_id.to_string(),
                date: on_date,
                matches: usize::from(first.is_some()) + rest,
            }),
        }
    }
}

/// Latest workflow state per subject id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowStates {
    latest: HashMap<String, WorkflowState>,
}

impl InMemoryWorkflowStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_states(states: impl IntoIterator<Item = WorkflowState>) -> Self {
        let mut lookup = Self::new();
        for state in states {
            lookup.record(state);
        }
        lookup
    }

    /// Keeps `state` unless a later one is already recorded for its subject.
    pub fn record(&mut self, state: WorkflowState) {
        match self.latest.get(&state.subject_id) {
            Some(existing) if existing.last_updated > state.last_updated => {}
            _ => {
                self.latest.insert(state.subject_id.clone(), state);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

impl WorkflowStateLookup for InMemoryWorkflowStates {
    fn last_state_for(
        &self,
        subject_id: &str,
    ) -> Result<Option<WorkflowState>, ServiceError> {
        Ok(self.latest.get(subject_id).cloned())
    }
}
