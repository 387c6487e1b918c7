use chrono::{NaiveDate, NaiveTime};
use muxingest_contracts::ServiceError;
use muxingest_model::RequestId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid ingest settings: {0}")]
    InvalidSettings(String),

    #[error("unknown weekday coverage value: {value}")]
    UnknownCoverage { value: String },

    #[error(
        "recording window {request_id} crosses midnight ({from_time} > {to_time}), which is not supported"
    )]
    WindowCrossesMidnight {
        request_id: RequestId,
        from_time: NaiveTime,
        to_time: NaiveTime,
    },

    #[error("unable to resolve channel mapping for '{channel}' on {date}")]
    MappingResolution {
        channel: String,
        date: NaiveDate,
        #[source]
        source: ServiceError,
    },

    #[error("{service} lookup failed")]
    LookupUnavailable {
        service: &'static str,
        #[source]
        source: ServiceError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
