use chrono::NaiveDate;
use muxingest_model::{RecordingWindowRequest, WorkflowState};

use crate::ServiceError;

/// Source of recording window definitions.
pub trait RequestStore: Send + Sync {
    /// Every request whose validity intersects `[from, to]` (inclusive).
    fn valid_requests(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RecordingWindowRequest>, ServiceError>;
}

/// Resolves the external archive's name for a source channel.
///
/// The mapping may change over time, so it is keyed by date as well.
/// Implementations fail with [`ServiceError::NoUniqueMapping`] unless exactly
/// one mapping applies.
pub trait ChannelMapper: Send + Sync {
    fn resolve(
        &self,
        source_channel_id: &str,
        on_date: NaiveDate,
    ) -> Result<String, ServiceError>;
}

/// Read side of the workflow state monitor.
pub trait WorkflowStateLookup: Send + Sync {
    /// Last state recorded for `subject_id`, or `None` if it was never seen.
    fn last_state_for(
        &self,
        subject_id: &str,
    ) -> Result<Option<WorkflowState>, ServiceError>;
}

impl<T: RequestStore + ?Sized> RequestStore for &T {
    fn valid_requests(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RecordingWindowRequest>, ServiceError> {
        (**self).valid_requests(from, to)
    }
}

impl<T: ChannelMapper + ?Sized> ChannelMapper for &T {
    fn resolve(
        &self,
        source_channel_id: &str,
        on_date: NaiveDate,
    ) -> Result<String, ServiceError> {
        (**self).resolve(source_channel_id, on_date)
    }
}

impl<T: WorkflowStateLookup + ?Sized> WorkflowStateLookup for &T {
    fn last_state_for(
        &self,
        subject_id: &str,
    ) -> Result<Option<WorkflowState>, ServiceError> {
        (**self).last_state_for(subject_id)
    }
}
