//! Core data model definitions shared across the muxingest crates.
#![allow(missing_docs)]

pub use ::chrono;
pub use ::chrono_tz;

pub mod candidate;
pub mod coverage;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod request;
pub mod workflow;

pub use candidate::{IngestCandidate, WALL_CLOCK_FORMAT};
pub use coverage::WeekdayCoverage;
pub use error::{ModelError, Result as ModelResult};
pub use ids::RequestId;
pub use mapping::ChannelMapping;
pub use request::RecordingWindowRequest;
pub use workflow::WorkflowState;
