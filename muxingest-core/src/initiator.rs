use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use muxingest_contracts::{
    ChannelMapper, RequestStore, ServiceError, WorkflowStateLookup,
};
use muxingest_model::{IngestCandidate, ModelError};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::expander::IntervalExpander;
use crate::gate::GatePolicy;

/// Values an ingest run is configured with.
#[derive(Debug, Clone)]
pub struct InitiatorSettings {
    /// Days of archive kept, counting the target date itself.
    pub retention_days: u32,
    /// Zone the recording windows and file names are expressed in.
    pub timezone: Tz,
    pub gate: GatePolicy,
    /// Run workflow lookups and gate decisions on the rayon pool.
    pub parallel_gate: bool,
}

/// Inclusive date window `[target - (days - 1), target]`.
pub fn retention_window(
    target: NaiveDate,
    retention_days: u32,
) -> Result<(NaiveDate, NaiveDate)> {
    if retention_days == 0 {
        return Err(IngestError::InvalidSettings(
            "retention days must be at least 1".to_string(),
        ));
    }
    let from = target
        .checked_sub_signed(TimeDelta::days(i64::from(retention_days) - 1))
        .ok_or_else(|| {
            IngestError::InvalidSettings(format!(
                "retention window of {retention_days} days before {target} is out of range"
            ))
        })?;
    Ok((from, target))
}

/// Drives one ingest run: requests → candidates → gate → survivors.
#[derive(Debug)]
pub struct IngestInitiator<R, M, W> {
    store: R,
    expander: IntervalExpander<M>,
    states: W,
    settings: InitiatorSettings,
}

impl<R, M, W> IngestInitiator<R, M, W>
where
    R: RequestStore,
    M: ChannelMapper,
    W: WorkflowStateLookup,
{
    pub fn new(store: R, mapper: M, states: W, settings: InitiatorSettings) -> Self {
        Self {
            store,
            expander: IntervalExpander::new(mapper, settings.timezone),
            states,
            settings,
        }
    }

    /// Candidates that need a new ingest for `target_date`, judged against now.
    pub fn run(
        &self,
        target_date: NaiveDate,
        retention_days: u32,
    ) -> Result<Vec<IngestCandidate>> {
        self.run_at(target_date, retention_days, Utc::now())
    }

    /// Same as [`IngestInitiator::run`] with the settings' retention days.
    pub fn initiate(
        &self,
        target_date: NaiveDate,
        reference: DateTime<Utc>,
    ) -> Result<Vec<IngestCandidate>> {
        self.run_at(target_date, self.settings.retention_days, reference)
    }

    pub fn run_at(
        &self,
        target_date: NaiveDate,
        retention_days: u32,
        reference: DateTime<Utc>,
    ) -> Result<Vec<IngestCandidate>> {
        let (from, to) = retention_window(target_date, retention_days)?;
        info!(
            %target_date,
            %from,
            %to,
            %reference,
            timezone = %self.settings.timezone,
            "starting ingest run"
        );

        let requests = self
            .store
            .valid_requests(from, to)
            .map_err(store_error)?;
        debug!(requests = requests.len(), "loaded recording window requests");

        let candidates = self.expander.expand(&requests, from, to)?;
        let expanded = candidates.len();

        let initiated = if self.settings.parallel_gate {
            candidates
                .into_par_iter()
                .map(|candidate| self.admit(candidate, reference))
                .collect::<Result<Vec<_>>>()?
        } else {
            candidates
                .into_iter()
                .map(|candidate| self.admit(candidate, reference))
                .collect::<Result<Vec<_>>>()?
        };
        let initiated: Vec<IngestCandidate> =
            initiated.into_iter().flatten().collect();

        info!(
            expanded,
            suppressed = expanded - initiated.len(),
            initiated = initiated.len(),
            "ingest run finished"
        );
        Ok(initiated)
    }

    fn admit(
        &self,
        candidate: IngestCandidate,
        reference: DateTime<Utc>,
    ) -> Result<Option<IngestCandidate>> {
        let identity = candidate.archive_file_id();
        let state = self.states.last_state_for(&identity).map_err(|source| {
            IngestError::LookupUnavailable {
                service: "workflow state",
                source,
            }
        })?;
        let admitted =
            self.settings
                .gate
                .should_initiate(reference, &identity, state.as_ref());
        Ok(admitted.then_some(candidate))
    }
}

fn store_error(source: ServiceError) -> IngestError {
    match source {
        ServiceError::InvalidRecord(ModelError::UnknownWeekdayCoverage(value)) => {
            IngestError::UnknownCoverage { value }
        }
        source => IngestError::LookupUnavailable {
            service: "request store",
            source,
        },
    }
}
