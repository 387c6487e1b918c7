use chrono::NaiveDate;
use muxingest_model::ModelError;
use thiserror::Error;

/// Failure reported by an external collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(
        "expected exactly one mapping for channel '{channel}' on {date}, found {matches}"
    )]
    NoUniqueMapping {
        channel: String,
        date: NaiveDate,
        matches: usize,
    },
    #[error("store returned an invalid record")]
    InvalidRecord(#[from] ModelError),
    #[error("{service} is unavailable")]
    Unavailable {
        service: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ServiceError {
    pub fn unavailable(
        service: &'static str,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        ServiceError::Unavailable {
            service,
            source: source.into(),
        }
    }
}
