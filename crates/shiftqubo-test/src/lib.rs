//! Shared test fixtures for shiftqubo crates.
//!
//! - [`instances`] - small and weekly problem instances, reference schedules
//! - [`gateway`] - in-process gateways: scripted responses, exhaustive
//!   search for tiny instances, artificial latency
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! shiftqubo-test = { workspace = true }
//! ```

pub mod gateway;
pub mod instances;

pub use gateway::{ExhaustiveGateway, ScriptedGateway, SlowGateway};
pub use instances::{single_staff, tiny, weekly, weekly_reference_schedule, Instance};
