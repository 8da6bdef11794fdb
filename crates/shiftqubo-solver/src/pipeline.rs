//! Build → emit → gateway → decode.
//!
//! Logging levels:
//! - **INFO**: pipeline start/end, gateway start/end
//! - **DEBUG**: model size, energy cross-check
//! - **WARN**: unsound penalty weights, reference schedule substitution

use shiftqubo_config::ValidatedConfig;
use shiftqubo_core::{
    ConstraintCompiler, CostModel, DecodeFailure, Decoded, Error, GatewayConfig, ModelError,
    Objective, PenaltyWeights, QuboEmitter, QuboModel, Sample, Schedule, SolutionDecoder,
    SolverGateway, VariableIndexer,
};
use tracing::{debug, info, warn};

use crate::stats::{SolveStats, Stopwatch};
use crate::timeout::TimeoutGateway;

/// Tolerance used when comparing the gateway's energy with the recomputed one.
const ENERGY_TOLERANCE: f64 = 1e-6;

/// What to do when decoding fails.
///
/// This is application policy and lives outside the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Surface the [`DecodeFailure`].
    #[default]
    Fail,
    /// Substitute a precomputed schedule.
    Reference(Schedule),
}

/// Where a resolved schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Decoded,
    Reference,
}

/// Schedule chosen by [`SolveOutcome::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub schedule: Schedule,
    pub source: ScheduleSource,
}

/// Everything produced by one pipeline run.
///
/// The QUBO, sample and energy stay available when decoding fails.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub qubo: QuboModel,
    pub sample: Sample,
    /// Energy as reported by the gateway.
    pub energy: f64,
    /// Energy of the sample recomputed from the emitted QUBO.
    pub qubo_energy: f64,
    pub decoded: Result<Decoded, DecodeFailure>,
    pub stats: SolveStats,
}

impl SolveOutcome {
    /// Decoded schedule, if decoding succeeded.
    pub fn schedule(&self) -> Option<&Schedule> {
        self.decoded.as_ref().ok().map(|d| &d.schedule)
    }

    /// Applies `policy` to the decode result.
    ///
    /// # Errors
    ///
    /// Returns the original [`DecodeFailure`] under [`FallbackPolicy::Fail`].
    pub fn resolve(&self, policy: &FallbackPolicy) -> Result<Resolved, DecodeFailure> {
        match (&self.decoded, policy) {
            (Ok(decoded), _) => Ok(Resolved {
                schedule: decoded.schedule.clone(),
                source: ScheduleSource::Decoded,
            }),
            (Err(failure), FallbackPolicy::Fail) => Err(failure.clone()),
            (Err(failure), FallbackPolicy::Reference(reference)) => {
                warn!(%failure, "decoding failed; using reference schedule");
                Ok(Resolved {
                    schedule: reference.clone(),
                    source: ScheduleSource::Reference,
                })
            }
        }
    }
}

/// Runs the scheduling pipeline against a [`SolverGateway`].
///
/// # Example
///
/// ```
/// use shiftqubo_core::{CostModel, Dimensions, PenaltyWeights};
/// use shiftqubo_solver::ScheduleSolver;
///
/// let dims = Dimensions::new(2, 1, 2).unwrap();
/// let costs = CostModel::new(dims, vec![1.0, 2.0]).unwrap();
/// let solver = ScheduleSolver::new(costs, PenaltyWeights::default());
///
/// let (objective, qubo) = solver.build().unwrap();
/// assert_eq!(qubo.num_variables(), objective.variable_count());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleSolver {
    costs: CostModel,
    weights: PenaltyWeights,
    gateway_config: GatewayConfig,
    decoder: SolutionDecoder,
}

impl ScheduleSolver {
    pub fn new(costs: CostModel, weights: PenaltyWeights) -> Self {
        let decoder = SolutionDecoder::new(costs.dimensions());
        Self {
            costs,
            weights,
            gateway_config: GatewayConfig::default(),
            decoder,
        }
    }

    /// Creates a solver from validated configuration.
    pub fn from_config(config: &ValidatedConfig) -> Self {
        let decoder = SolutionDecoder::new(config.dims).with_secondary(config.secondary_convention);
        Self::new(config.costs.clone(), config.weights)
            .with_gateway_config(config.gateway.clone())
            .with_decoder(decoder)
    }

    pub fn with_gateway_config(mut self, config: GatewayConfig) -> Self {
        self.gateway_config = config;
        self
    }

    pub fn with_decoder(mut self, decoder: SolutionDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn gateway_config(&self) -> &GatewayConfig {
        &self.gateway_config
    }

    pub fn decoder(&self) -> &SolutionDecoder {
        &self.decoder
    }

    /// Compiles the objective and emits its QUBO.
    pub fn build(&self) -> Result<(Objective, QuboModel), ModelError> {
        let objective = ConstraintCompiler::new(&self.costs, self.weights).compile()?;
        let qubo = QuboEmitter::new().emit(&objective);
        Ok((objective, qubo))
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Model errors abort before the gateway is called; a gateway failure
    /// aborts the run with no partial outcome. A decode failure does not
    /// abort: it is recorded in [`SolveOutcome::decoded`].
    pub fn solve<G: SolverGateway>(&self, gateway: &G) -> Result<SolveOutcome, Error> {
        let dims = self.costs.dimensions();
        info!(
            event = "pipeline_start",
            staff = dims.num_staff() as u64,
            days = dims.num_days() as u64,
            shifts = dims.num_shifts() as u64,
            variables = dims.variable_count() as u64,
        );

        let mut stats = SolveStats::default();

        let watch = Stopwatch::start();
        let (_objective, qubo) = self.build()?;
        stats.build_time = watch.elapsed();
        stats.variables = qubo.num_variables();
        stats.quadratic_terms = qubo.quadratic_count();
        stats.linear_terms = qubo.len() - stats.quadratic_terms;
        stats.offset = qubo.offset();
        debug!(
            event = "qubo_emitted",
            variables = stats.variables as u64,
            linear_terms = stats.linear_terms as u64,
            quadratic_terms = stats.quadratic_terms as u64,
            offset = stats.offset,
        );

        info!(
            event = "gateway_start",
            gateway = gateway.name(),
            environment = %self.gateway_config.environment,
            num_reads = self.gateway_config.num_reads as u64,
            annealing_time = self.gateway_config.annealing_time as u64,
        );
        let watch = Stopwatch::start();
        let response = gateway.solve(&qubo, &self.gateway_config).map_err(|err| {
            warn!(event = "gateway_error", gateway = gateway.name(), %err);
            err
        })?;
        stats.gateway_time = watch.elapsed();
        info!(
            event = "gateway_end",
            energy = response.energy,
            duration_ms = stats.gateway_time.as_millis() as u64,
        );

        let assignment = response
            .best_sample
            .to_assignment(&VariableIndexer::canonical(dims));
        let qubo_energy = qubo.evaluate(&assignment)?;
        if (qubo_energy - response.energy).abs() > ENERGY_TOLERANCE * qubo_energy.abs().max(1.0) {
            debug!(
                reported = response.energy,
                recomputed = qubo_energy,
                "gateway energy differs from QUBO evaluated at the sample"
            );
        }

        let watch = Stopwatch::start();
        let decoded = self.decoder.decode(&response.best_sample);
        stats.decode_time = watch.elapsed();

        match &decoded {
            Ok(d) => info!(
                event = "pipeline_end",
                energy = response.energy,
                assignments = d.schedule.total_assignments() as u64,
                feasible = d.schedule.is_feasible(dims),
                duration_ms = stats.total_time().as_millis() as u64,
            ),
            Err(failure) => warn!(
                event = "pipeline_end",
                energy = response.energy,
                %failure,
                duration_ms = stats.total_time().as_millis() as u64,
            ),
        }

        Ok(SolveOutcome {
            qubo,
            sample: response.best_sample,
            energy: response.energy,
            qubo_energy,
            decoded,
            stats,
        })
    }
}

/// Runs the pipeline described by `config`, applying its gateway deadline.
pub fn solve_configured<G: SolverGateway + 'static>(
    config: &ValidatedConfig,
    gateway: G,
) -> Result<SolveOutcome, Error> {
    let solver = ScheduleSolver::from_config(config);
    match config.timeout {
        Some(timeout) => solver.solve(&TimeoutGateway::new(gateway, timeout)),
        None => solver.solve(&gateway),
    }
}

/// Fallback policy carried by `config`.
pub fn fallback_policy(config: &ValidatedConfig) -> FallbackPolicy {
    config
        .reference
        .clone()
        .map_or(FallbackPolicy::Fail, FallbackPolicy::Reference)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
