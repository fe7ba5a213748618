//! Error types for life table construction and input loading

use crate::rates::{CohortKey, ObservationKey};
use thiserror::Error;

/// Errors that abort the computation for a single cohort (or the whole run,
/// for configuration problems)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeTableError {
    /// An observation breaks the non-negativity or uniqueness invariant
    #[error("malformed observation at {key}: {reason}")]
    MalformedInput { key: ObservationKey, reason: String },

    /// A cohort reached the builder without any ages
    #[error("cohort {key} has no ages")]
    EmptyCohort { key: CohortKey },

    /// Radix or ax assumption out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LifeTableError {
    /// Cohort the error belongs to, if any
    pub fn cohort(&self) -> Option<CohortKey> {
        match self {
            LifeTableError::MalformedInput { key, .. } => Some(key.cohort()),
            LifeTableError::EmptyCohort { key } => Some(*key),
            LifeTableError::InvalidConfig(_) => None,
        }
    }
}

pub type LifeTableResult<T> = Result<T, LifeTableError>;

/// Errors raised while reading cleaned rate records
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown gender {value:?} on line {line}")]
    UnknownGender { value: String, line: u64 },
}
