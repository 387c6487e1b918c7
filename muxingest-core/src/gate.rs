use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use muxingest_model::WorkflowState;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Final stage a workflow has to reach before a file counts as ingested, and
/// how long an unfinished workflow is given before it is presumed stuck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePolicy {
    pub final_component: String,
    pub final_state: String,
    pub expected_duration: TimeDelta,
}

/// Outcome of [`GatePolicy::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateDecision {
    /// The monitor has no state for the file.
    NeverObserved,
    /// The final stage completed.
    Completed,
    /// Some other stage reported within the expected duration.
    InFlight,
    /// Some other stage reported, but longer ago than the expected duration.
    Stale,
}

impl GateDecision {
    pub fn should_initiate(self) -> bool {
        matches!(self, GateDecision::NeverObserved | GateDecision::Stale)
    }
}

impl GatePolicy {
    pub fn new(
        final_component: impl Into<String>,
        final_state: impl Into<String>,
        expected_duration: TimeDelta,
    ) -> Self {
        Self {
            final_component: final_component.into(),
            final_state: final_state.into(),
            expected_duration,
        }
    }

    /// Same as [`GatePolicy::new`] for a `std` duration, which may not fit a
    /// `TimeDelta`.
    pub fn from_std(
        final_component: impl Into<String>,
        final_state: impl Into<String>,
        expected_duration: Duration,
    ) -> Result<Self> {
        let expected_duration =
            TimeDelta::from_std(expected_duration).map_err(|_| {
                IngestError::InvalidSettings(format!(
                    "expected ingest duration {expected_duration:?} is out of range"
                ))
            })?;
        Ok(Self::new(final_component, final_state, expected_duration))
    }

    /// Classifies the last recorded state of a file.
    ///
    /// A non-final state whose age is exactly `expected_duration` is already
    /// stale: the comparison is `reference - last_updated >= expected_duration`.
    pub fn evaluate(
        &self,
        reference: DateTime<Utc>,
        state: Option<&WorkflowState>,
    ) -> GateDecision {
        let Some(state) = state else {
            return GateDecision::NeverObserved;
        };
        if state.is_terminal(&self.final_component, &self.final_state) {
            return GateDecision::Completed;
        }
        if reference - state.last_updated >= self.expected_duration {
            GateDecision::Stale
        } else {
            GateDecision::InFlight
        }
    }

    /// Whether a new ingest of the file identified by `identity` should start.
    pub fn should_initiate(
        &self,
        reference: DateTime<Utc>,
        identity: &str,
        state: Option<&WorkflowState>,
    ) -> bool {
        let decision = self.evaluate(reference, state);
        debug!(
            identity,
            ?decision,
            component = state.map(|s| s.component_name.as_str()),
            state = state.map(|s| s.state_name.as_str()),
            last_updated = ?state.map(|s| s.last_updated),
            "ingest gate decision"
        );
        decision.should_initiate()
    }
}
