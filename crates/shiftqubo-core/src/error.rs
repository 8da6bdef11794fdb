//! Error types for model construction, solving and decoding.

use std::fmt;

use thiserror::Error;

/// Errors raised while building the binary model, before any solve attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Dimension or table mismatch. Fatal to the run, never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A coordinate or flat index outside the variable cube.
    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),
}

impl ModelError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ModelError::Configuration(message.into())
    }
}

/// Which coordinate of an index lookup was out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAxis {
    Staff,
    Day,
    Shift,
    Flat,
}

impl fmt::Display for IndexAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexAxis::Staff => "staff",
            IndexAxis::Day => "day",
            IndexAxis::Shift => "shift",
            IndexAxis::Flat => "flat index",
        };
        f.write_str(name)
    }
}

/// Contract violation in indexer usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{axis} {value} out of range [0, {bound})")]
pub struct IndexOutOfRange {
    pub axis: IndexAxis,
    pub value: usize,
    pub bound: usize,
}

/// Category of a solver gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErrorKind {
    /// Network failure reaching the service.
    Transport,
    /// Credentials rejected.
    Auth,
    /// Service accepted the connection but refused the job.
    Rejected,
    /// No response within the caller's deadline.
    Timeout,
    Other,
}

/// Failure reported by the external solver gateway.
///
/// The core never retries; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Solver error ({kind:?}): {message}")]
pub struct SolverError {
    pub kind: SolverErrorKind,
    pub message: String,
}

impl SolverError {
    pub fn new(kind: SolverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(SolverErrorKind::Transport, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SolverErrorKind::Timeout, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(SolverErrorKind::Other, message)
    }
}

/// Every decode attempt produced an empty schedule.
///
/// Recoverable by the caller (for example by substituting a reference
/// schedule), but never masked as a schedule with zero shifts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Decode failure: {attempts} convention(s) tried, {keys_seen} key(s) in sample, \
     {ones_seen} set to 1, no assignments recovered"
)]
pub struct DecodeFailure {
    pub attempts: usize,
    pub keys_seen: usize,
    pub ones_seen: usize,
}

/// Main error type for the scheduling core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Decode(#[from] DecodeFailure),
}

impl From<IndexOutOfRange> for Error {
    fn from(err: IndexOutOfRange) -> Self {
        Error::Model(ModelError::IndexOutOfRange(err))
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
