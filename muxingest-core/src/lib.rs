//! # muxingest core
//!
//! Decides which hourly media files must be fetched from the external
//! broadcast archive for a target date, and which of them actually need a new
//! ingest run.
//!
//! ## Overview
//!
//! - **Interval expansion** ([`expander`]): weekly-recurring recording windows
//!   become a deduplicated, sorted set of whole-hour [`IngestCandidate`]s.
//! - **Ingest gate** ([`gate`]): consults the last workflow state recorded for
//!   a file and suppresses work that is complete or still in flight.
//! - **Run driver** ([`initiator`]): derives the retention window, wires the
//!   injected collaborators together and returns the surviving candidates.
//! - **Manifest** ([`manifest`]): the `downloads` JSON document handed to the
//!   downloader.
//!
//! The engine is synchronous. External capabilities come in through the
//! traits in `muxingest-contracts`; [`memory`] provides deterministic
//! implementations for tests and fixture-driven runs.
//!
//! ## Examples
//!
//! ```no_run
//! use chrono::{NaiveDate, TimeDelta};
//! use muxingest_core::{
//!     gate::GatePolicy,
//!     initiator::{IngestInitiator, InitiatorSettings},
//!     manifest::DownloadManifest,
//!     memory::{InMemoryChannelMapper, InMemoryRequestStore, InMemoryWorkflowStates},
//! };
//!
//! fn initiate() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = InitiatorSettings {
//!         retention_days: 28,
//!         timezone: chrono_tz::Europe::Copenhagen,
//!         gate: GatePolicy::new(
//!             "Yousee complete workflow final step",
//!             "Completed",
//!             TimeDelta::hours(12),
//!         ),
//!         parallel_gate: false,
//!     };
//!     let initiator = IngestInitiator::new(
//!         InMemoryRequestStore::default(),
//!         InMemoryChannelMapper::default(),
//!         InMemoryWorkflowStates::default(),
//!         settings,
//!     );
//!
//!     let target = NaiveDate::from_ymd_opt(2012, 1, 28).unwrap();
//!     let jobs = initiator.run(target, 28)?;
//!     DownloadManifest::from_candidates(&jobs).write_to(std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

/// Error taxonomy for ingest runs
pub mod error;

/// Interval expansion from recording windows to hourly candidates
pub mod expander;

/// Idempotency decision for a single candidate
pub mod gate;

/// Wall-clock resolution and archive identities
pub mod identity;

/// Run driver composing store, expander and gate
pub mod initiator;

/// Download manifest document
pub mod manifest;

/// In-memory collaborators
pub mod memory;

pub use error::{IngestError, Result};
pub use expander::IntervalExpander;
pub use gate::{GateDecision, GatePolicy};
pub use initiator::{IngestInitiator, InitiatorSettings, retention_window};
pub use manifest::{DownloadEntry, DownloadManifest};
pub use muxingest_model::IngestCandidate;
