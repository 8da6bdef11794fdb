//! shiftqubo core - QUBO formulation of weekly shift assignment.
//!
//! - [`index`] - the staff × day × shift variable cube and its flattening
//! - [`cost`] - staff-independent slot costs
//! - [`compiler`] - cost terms plus one-hot penalties, expanded into
//!   pairwise coefficients
//! - [`qubo`] - emission of the coefficient matrix and constant offset
//! - [`gateway`] - contract for the external sampler
//! - [`decode`] - sample → schedule, with a secondary convention and an
//!   explicit failure
//!
//! # Example
//!
//! ```
//! use shiftqubo_core::{ConstraintCompiler, CostModel, Dimensions, PenaltyWeights, QuboEmitter};
//!
//! let dims = Dimensions::new(1, 1, 3).unwrap();
//! let costs = CostModel::new(dims, vec![5.0, 1.0, 3.0]).unwrap();
//! let objective = ConstraintCompiler::new(&costs, PenaltyWeights::default())
//!     .compile()
//!     .unwrap();
//! let qubo = QuboEmitter::new().emit(&objective);
//!
//! let assignment = [false, true, false];
//! let energy = qubo.evaluate(&assignment).unwrap();
//! assert!((energy - objective.evaluate(&assignment).unwrap()).abs() < 1e-9);
//! ```

pub mod compiler;
pub mod cost;
pub mod decode;
pub mod error;
pub mod gateway;
pub mod index;
pub mod qubo;
pub mod sample;
pub mod schedule;

#[cfg(test)]
mod test_utils;

pub use compiler::{
    expand_squared_sum, CoefficientStore, ConstraintCompiler, EnergyBreakdown, Objective, Penalty,
    PenaltyKind, PenaltyWeights, Soundness, DEFAULT_PENALTY_WEIGHT,
};
pub use cost::CostModel;
pub use decode::{Decoded, SolutionDecoder};
pub use error::{
    DecodeFailure, Error, IndexAxis, IndexOutOfRange, ModelError, Result, SolverError,
    SolverErrorKind,
};
pub use gateway::{GatewayConfig, SolveResponse, SolverEnvironment, SolverGateway};
pub use index::{Dimensions, Flattening, Variable, VariableIndexer};
pub use qubo::{QuboEmitter, QuboModel};
pub use sample::{Sample, SampleKey};
pub use schedule::{Schedule, ShiftAssignment, Violation};
