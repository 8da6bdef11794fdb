//! Pipeline statistics.

use std::time::{Duration, Instant};

/// Size and timing of one pipeline run.
///
/// # Example
///
/// ```
/// use shiftqubo_solver::stats::SolveStats;
///
/// let mut stats = SolveStats::default();
/// stats.variables = 147;
/// stats.quadratic_terms = 1029;
/// assert_eq!(stats.total_time(), std::time::Duration::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveStats {
    /// Number of binary variables.
    pub variables: usize,
    /// Diagonal entries of the emitted matrix.
    pub linear_terms: usize,
    /// Off-diagonal entries of the emitted matrix.
    pub quadratic_terms: usize,
    /// Constant offset of the emitted QUBO.
    pub offset: f64,
    /// Time spent compiling and emitting.
    pub build_time: Duration,
    /// Time spent inside the gateway call.
    pub gateway_time: Duration,
    /// Time spent decoding.
    pub decode_time: Duration,
}

impl SolveStats {
    pub fn total_time(&self) -> Duration {
        self.build_time + self.gateway_time + self.decode_time
    }
}

/// Measures one stage.
pub(crate) struct Stopwatch(Instant);

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self(Instant::now())
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}
