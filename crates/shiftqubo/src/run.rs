//! Entry point that hides the pipeline wiring.

use shiftqubo_config::ValidatedConfig;
use shiftqubo_core::{Error, SolverGateway};
use shiftqubo_solver::{fallback_policy, solve_configured, Resolved};
use tracing::info;

/// Runs the pipeline for `config` and resolves the final schedule.
///
/// A decode failure is replaced by the configured reference schedule when
/// one is present and returned as [`Error::Decode`] otherwise.
pub fn run_schedule<G>(config: &ValidatedConfig, gateway: G) -> Result<Resolved, Error>
where
    G: SolverGateway + 'static,
{
    #[cfg(feature = "console")]
    shiftqubo_console::init();

    let outcome = solve_configured(config, gateway)?;
    let resolved = outcome.resolve(&fallback_policy(config))?;
    info!(
        source = ?resolved.source,
        violations = resolved.schedule.violations(config.dims).len() as u64,
        "schedule resolved"
    );
    Ok(resolved)
}
