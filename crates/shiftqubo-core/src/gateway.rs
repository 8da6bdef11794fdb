//! Contract for the external solver gateway.
//!
//! The gateway owns transport, authentication and the sampler itself. The
//! core only hands it a [`QuboModel`] and reads back the best sample. Calls
//! may block for a long time; wrap them with a deadline.

use std::fmt;
use std::sync::Arc;

use crate::error::SolverError;
use crate::qubo::QuboModel;
use crate::sample::Sample;

/// Default number of reads requested from the sampler.
pub const DEFAULT_NUM_READS: u32 = 1000;

/// Default annealing time, in the gateway's own units.
pub const DEFAULT_ANNEALING_TIME: u32 = 200;

/// Default job description.
pub const DEFAULT_DESCRIPTION: &str = "HealthCare_Staff_Scheduling";

/// Service environment a job is submitted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolverEnvironment {
    #[default]
    Mainnet,
    Testnet,
}

impl SolverEnvironment {
    pub fn is_mainnet(&self) -> bool {
        matches!(self, SolverEnvironment::Mainnet)
    }
}

impl fmt::Display for SolverEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolverEnvironment::Mainnet => "mainnet",
            SolverEnvironment::Testnet => "testnet",
        })
    }
}

/// Tuning parameters forwarded to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatewayConfig {
    pub environment: SolverEnvironment,
    pub description: String,
    pub num_reads: u32,
    pub annealing_time: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            environment: SolverEnvironment::default(),
            description: DEFAULT_DESCRIPTION.to_string(),
            num_reads: DEFAULT_NUM_READS,
            annealing_time: DEFAULT_ANNEALING_TIME,
        }
    }
}

/// Best sample found by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResponse {
    pub best_sample: Sample,
    /// Energy as reported by the gateway, offset included.
    pub energy: f64,
}

/// External sampler accepting a QUBO and returning its best sample.
pub trait SolverGateway: Send + Sync {
    /// Submits `qubo` and blocks until the best sample is available.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] on transport, auth or service failure.
    fn solve(&self, qubo: &QuboModel, config: &GatewayConfig) -> Result<SolveResponse, SolverError>;

    /// Name used in log output.
    fn name(&self) -> &str {
        "gateway"
    }
}

impl<G: SolverGateway + ?Sized> SolverGateway for &G {
    fn solve(
        &self,
        qubo: &QuboModel,
        config: &GatewayConfig,
    ) -> Result<SolveResponse, SolverError> {
        (**self).solve(qubo, config)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<G: SolverGateway + ?Sized> SolverGateway for Arc<G> {
    fn solve(
        &self,
        qubo: &QuboModel,
        config: &GatewayConfig,
    ) -> Result<SolveResponse, SolverError> {
        (**self).solve(qubo, config)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<G: SolverGateway + ?Sized> SolverGateway for Box<G> {
    fn solve(
        &self,
        qubo: &QuboModel,
        config: &GatewayConfig,
    ) -> Result<SolveResponse, SolverError> {
        (**self).solve(qubo, config)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
