//! Trait surfaces that describe the external capabilities of the ingest
//! initiator. All calls are synchronous and may fail; callers decide whether
//! a failure is fatal.

pub mod error;
pub mod lookup;

pub use error::ServiceError;
pub use lookup::{ChannelMapper, RequestStore, WorkflowStateLookup};
