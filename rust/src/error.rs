//! Error types for the scheduling core.

use thiserror::Error;

/// Errors raised while constructing domain values or project networks.
///
/// Every variant is produced at construction time; nothing is ever partially built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    #[error("Activity name cannot be empty")]
    InvalidName,
    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration {
        value: String,
        reason: DurationFault,
    },
    #[error("Project network must contain at least one activity")]
    EmptyNetwork,
    #[error("Activity names must be unique (duplicate: {0})")]
    DuplicateName(String),
    #[error("Activity {activity} depends on non-existent activity {dependency}")]
    UnknownDependency { activity: String, dependency: String },
    #[error("Project network contains circular dependencies (involving {activity})")]
    CyclicDependency { activity: String },
}

/// Why a duration value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationFault {
    Negative,
    NaN,
    Infinite,
    NotANumber,
    Overflow,
}

impl std::fmt::Display for DurationFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationFault::Negative => write!(f, "Duration cannot be negative"),
            DurationFault::NaN => write!(f, "Duration cannot be NaN"),
            DurationFault::Infinite => write!(f, "Duration cannot be infinite"),
            DurationFault::NotANumber => write!(f, "must be a number"),
            DurationFault::Overflow => write!(f, "Duration exceeds representable range"),
        }
    }
}

/// Fieldless category of a [`CpmError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpmErrorKind {
    InvalidName,
    InvalidDuration,
    EmptyNetwork,
    DuplicateName,
    UnknownDependency,
    CyclicDependency,
}

impl CpmError {
    pub(crate) fn invalid_duration(value: impl ToString, reason: DurationFault) -> Self {
        CpmError::InvalidDuration {
            value: value.to_string(),
            reason,
        }
    }

    pub fn kind(&self) -> CpmErrorKind {
        match self {
            CpmError::InvalidName => CpmErrorKind::InvalidName,
            CpmError::InvalidDuration { .. } => CpmErrorKind::InvalidDuration,
            CpmError::EmptyNetwork => CpmErrorKind::EmptyNetwork,
            CpmError::DuplicateName(_) => CpmErrorKind::DuplicateName,
            CpmError::UnknownDependency { .. } => CpmErrorKind::UnknownDependency,
            CpmError::CyclicDependency { .. } => CpmErrorKind::CyclicDependency,
        }
    }
}

pub type Result<T> = std::result::Result<T, CpmError>;
