//! Solution decoding.
//!
//! Maps a solver [`Sample`] back to a [`Schedule`]. The primary attempt uses
//! the canonical staff-major flattening; if it recovers no assignment at all,
//! one secondary, differently ordered flattening is tried. If that also comes
//! back empty the decoder reports [`DecodeFailure`]. Substituting a reference
//! schedule is left to the caller.
//!
//! # Example
//!
//! ```
//! use shiftqubo_core::decode::SolutionDecoder;
//! use shiftqubo_core::index::Dimensions;
//! use shiftqubo_core::sample::Sample;
//!
//! let dims = Dimensions::new(1, 2, 2).unwrap();
//! let decoder = SolutionDecoder::new(dims);
//!
//! // staff 0: day 1 shift 0 (flat 2), day 0 shift 1 (flat 1)
//! let decoded = decoder.decode(&Sample::with_ones(4, [2, 1])).unwrap();
//! let days: Vec<_> = decoded.schedule.staff(0).iter().map(|a| a.day).collect();
//! assert_eq!(days, vec![0, 1]);
//!
//! assert!(decoder.decode(&Sample::with_ones(4, [])).is_err());
//! ```

use tracing::{debug, trace, warn};

use crate::error::DecodeFailure;
use crate::index::{Dimensions, Flattening, VariableIndexer};
use crate::sample::Sample;
use crate::schedule::Schedule;

/// Number of sample keys echoed at DEBUG level.
const DEBUG_KEY_PREVIEW: usize = 5;

/// A successfully decoded schedule and the convention that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub schedule: Schedule,
    pub convention: Flattening,
    /// 1 if the primary convention succeeded, 2 for the secondary.
    pub attempts: usize,
}

impl Decoded {
    /// True when the secondary convention had to be used.
    pub fn used_secondary(&self) -> bool {
        self.attempts > 1
    }
}

/// Converts samples into schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionDecoder {
    dims: Dimensions,
    primary: Flattening,
    secondary: Option<Flattening>,
}

impl SolutionDecoder {
    /// Staff-major primary, shift-major secondary.
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            primary: Flattening::StaffMajor,
            secondary: Some(Flattening::ShiftMajor),
        }
    }

    pub fn with_primary(mut self, convention: Flattening) -> Self {
        self.primary = convention;
        self
    }

    /// Sets the secondary convention; `None` makes an empty primary result
    /// fail immediately.
    pub fn with_secondary(mut self, convention: Option<Flattening>) -> Self {
        self.secondary = convention.filter(|c| *c != self.primary);
        self
    }

    pub fn primary(&self) -> Flattening {
        self.primary
    }

    pub fn secondary(&self) -> Option<Flattening> {
        self.secondary
    }

    /// Decodes `sample`, trying the primary and then the secondary
    /// convention.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeFailure`] if every attempt yields an empty schedule.
    pub fn decode(&self, sample: &Sample) -> Result<Decoded, DecodeFailure> {
        for (n, (key, value)) in sample.iter().take(DEBUG_KEY_PREVIEW).enumerate() {
            debug!(key_index = n, key = %key, value, "sample key");
        }

        let conventions = std::iter::once(self.primary).chain(self.secondary);
        let mut attempts = 0;
        for convention in conventions {
            attempts += 1;
            let schedule = self.decode_with(sample, convention);
            if !schedule.is_empty() {
                if attempts > 1 {
                    warn!(
                        event = "decode_fallback",
                        convention = %convention,
                        primary = %self.primary,
                        "primary convention recovered nothing; decoded with secondary"
                    );
                }
                debug!(
                    event = "decode_end",
                    convention = %convention,
                    assignments = schedule.total_assignments() as u64,
                );
                return Ok(Decoded {
                    schedule,
                    convention,
                    attempts,
                });
            }
            debug!(convention = %convention, "no assignments recovered");
        }

        Err(DecodeFailure {
            attempts,
            keys_seen: sample.len(),
            ones_seen: sample.ones(),
        })
    }

    /// A single decode attempt under `convention`. Non-integer and
    /// out-of-range keys are skipped. The result is sorted by day.
    pub fn decode_with(&self, sample: &Sample, convention: Flattening) -> Schedule {
        let indexer = VariableIndexer::new(self.dims, convention);
        let mut schedule = Schedule::new(self.dims.num_staff());
        for (key, value) in sample.iter() {
            if !value {
                continue;
            }
            let Some(var) = key.as_index().and_then(|i| indexer.from_flat(i).ok()) else {
                trace!(key = %key, "ignoring sample key");
                continue;
            };
            if let Err(err) = schedule.push(var.staff, var.day, var.shift) {
                trace!(key = %key, %err, "ignoring sample key");
            }
        }
        schedule.sort();
        schedule
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
