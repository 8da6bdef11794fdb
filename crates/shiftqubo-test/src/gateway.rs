//! In-process solver gateways for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use shiftqubo_core::{
    GatewayConfig, QuboModel, Sample, SolveResponse, SolverError, SolverErrorKind, SolverGateway,
};

/// Returns a fixed response and records how it was called.
#[derive(Debug)]
pub struct ScriptedGateway {
    response: Result<SolveResponse, SolverError>,
    calls: AtomicUsize,
    last_config: Mutex<Option<GatewayConfig>>,
}

impl ScriptedGateway {
    pub fn returning(best_sample: Sample, energy: f64) -> Self {
        Self::with_response(Ok(SolveResponse { best_sample, energy }))
    }

    pub fn failing(error: SolverError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<SolveResponse, SolverError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_config: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<GatewayConfig> {
        self.last_config.lock().unwrap().clone()
    }
}

impl SolverGateway for ScriptedGateway {
    fn solve(
        &self,
        _qubo: &QuboModel,
        config: &GatewayConfig,
    ) -> Result<SolveResponse, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock().unwrap() = Some(config.clone());
        self.response.clone()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Enumerates every assignment and returns the lowest-energy one.
///
/// Ties go to the assignment enumerated first (lowest binary counter).
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveGateway {
    max_variables: usize,
}

impl Default for ExhaustiveGateway {
    fn default() -> Self {
        Self { max_variables: 20 }
    }
}

impl SolverGateway for ExhaustiveGateway {
    fn solve(
        &self,
        qubo: &QuboModel,
        _config: &GatewayConfig,
    ) -> Result<SolveResponse, SolverError> {
        let n = qubo.num_variables();
        if n > self.max_variables {
            return Err(SolverError::new(
                SolverErrorKind::Rejected,
                format!("{n} variables exceed exhaustive limit {}", self.max_variables),
            ));
        }

        let mut best: Option<(f64, Vec<bool>)> = None;
        for bits in 0u64..1 << n {
            let x: Vec<bool> = (0..n).map(|i| bits & (1 << i) != 0).collect();
            let energy = qubo
                .evaluate(&x)
                .map_err(|e| SolverError::other(e.to_string()))?;
            if best.as_ref().map_or(true, |(e, _)| energy < *e) {
                best = Some((energy, x));
            }
        }

        let (energy, x) = best.ok_or_else(|| SolverError::other("empty model"))?;
        Ok(SolveResponse {
            best_sample: Sample::from_assignment(&x),
            energy,
        })
    }

    fn name(&self) -> &str {
        "exhaustive"
    }
}

/// Sleeps before delegating.
#[derive(Debug)]
pub struct SlowGateway<G> {
    pub inner: G,
    pub delay: Duration,
}

impl<G: SolverGateway> SolverGateway for SlowGateway<G> {
    fn solve(
        &self,
        qubo: &QuboModel,
        config: &GatewayConfig,
    ) -> Result<SolveResponse, SolverError> {
        thread::sleep(self.delay);
        self.inner.solve(qubo, config)
    }

    fn name(&self) -> &str {
        "slow"
    }
}
