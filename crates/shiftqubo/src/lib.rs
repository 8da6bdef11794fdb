//! shiftqubo - staff shift scheduling as a QUBO
//!
//! Builds the penalty-augmented objective for a staff × day × shift cube,
//! hands the QUBO to an external [`SolverGateway`] and decodes the returned
//! sample into per-staff schedules.
//!
//! # Example
//!
//! ```rust
//! use shiftqubo::prelude::*;
//!
//! let dims = Dimensions::new(2, 1, 2).unwrap();
//! let costs = CostModel::new(dims, vec![1.0, 2.0]).unwrap();
//! let objective = ConstraintCompiler::new(&costs, PenaltyWeights::default())
//!     .compile()
//!     .unwrap();
//! let qubo = QuboEmitter::new().emit(&objective);
//!
//! // Staff 0 on shift 1, staff 1 on shift 0.
//! let x = [false, true, true, false];
//! assert_eq!(qubo.evaluate(&x).unwrap(), 3.0);
//! ```

pub use shiftqubo_core::{
    ConstraintCompiler, CostModel, DecodeFailure, Decoded, Dimensions, EnergyBreakdown, Error,
    Flattening, GatewayConfig, ModelError, Objective, PenaltyWeights, QuboEmitter, QuboModel,
    Sample, SampleKey, Schedule, ShiftAssignment, SolutionDecoder, SolveResponse, SolverEnvironment,
    SolverError, SolverErrorKind, SolverGateway, Variable, VariableIndexer, Violation,
};

pub use shiftqubo_config::{ConfigError, ScheduleConfig, ValidatedConfig};

pub use shiftqubo_solver::{
    FallbackPolicy, Resolved, ScheduleSolver, ScheduleSource, SolveOutcome, SolveStats,
    TimeoutGateway,
};

mod run;
pub use run::run_schedule;

pub mod prelude {
    pub use super::{
        run_schedule, ConstraintCompiler, CostModel, Dimensions, PenaltyWeights, QuboEmitter,
        Sample, Schedule, ScheduleConfig, ScheduleSolver, SolutionDecoder, SolverGateway,
    };
}
