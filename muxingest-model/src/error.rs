use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownWeekdayCoverage(String),
    InvalidRequest(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownWeekdayCoverage(value) => {
                write!(f, "unknown weekday coverage: {value}")
            }
            ModelError::InvalidRequest(msg) => {
                write!(f, "invalid recording window request: {msg}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
