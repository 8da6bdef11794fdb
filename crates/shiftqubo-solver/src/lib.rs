//! shiftqubo solver pipeline
//!
//! This crate wires the core components into one run:
//! - [`ScheduleSolver`] - compile, emit, submit and decode
//! - [`TimeoutGateway`] - deadline for blocking gateway calls
//! - [`FallbackPolicy`] - application-level substitution when decoding fails
//! - [`stats`] - sizes and stage timings

pub mod pipeline;
pub mod stats;
pub mod timeout;

pub use pipeline::{
    fallback_policy, solve_configured, FallbackPolicy, Resolved, ScheduleSolver, ScheduleSource,
    SolveOutcome,
};
pub use stats::SolveStats;
pub use timeout::TimeoutGateway;
