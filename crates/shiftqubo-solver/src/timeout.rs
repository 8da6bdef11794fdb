//! Deadline for blocking gateway calls.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};
use shiftqubo_core::{GatewayConfig, QuboModel, SolveResponse, SolverError, SolverGateway};
use tracing::warn;

/// Runs the wrapped gateway on a worker thread and gives up after `timeout`.
///
/// A timed-out call is not cancelled: the worker keeps running until the
/// inner gateway returns, and its result is dropped.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shiftqubo_solver::TimeoutGateway;
/// # use shiftqubo_core::{GatewayConfig, QuboModel, SolveResponse, SolverError, SolverGateway};
/// # struct Remote;
/// # impl SolverGateway for Remote {
/// #     fn solve(&self, _: &QuboModel, _: &GatewayConfig) -> Result<SolveResponse, SolverError> {
/// #         Err(SolverError::transport("offline"))
/// #     }
/// # }
///
/// let gateway = TimeoutGateway::new(Remote, Duration::from_secs(120));
/// assert_eq!(gateway.timeout(), Duration::from_secs(120));
/// ```
#[derive(Debug)]
pub struct TimeoutGateway<G> {
    inner: Arc<G>,
    timeout: Duration,
}

impl<G> TimeoutGateway<G> {
    pub fn new(inner: G, timeout: Duration) -> Self {
        Self::from_arc(Arc::new(inner), timeout)
    }

    pub fn from_arc(inner: Arc<G>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: SolverGateway + 'static> SolverGateway for TimeoutGateway<G> {
    fn solve(
        &self,
        qubo: &QuboModel,
        config: &GatewayConfig,
    ) -> Result<SolveResponse, SolverError> {
        let (tx, rx) = channel::bounded(1);
        let inner = Arc::clone(&self.inner);
        let qubo = qubo.clone();
        let config = config.clone();

        thread::Builder::new()
            .name("shiftqubo-gateway".into())
            .spawn(move || {
                // The receiver is gone if the caller already timed out.
                let _ = tx.send(inner.solve(&qubo, &config));
            })
            .map_err(|e| SolverError::other(format!("failed to spawn gateway worker: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    gateway = self.inner.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "gateway call timed out"
                );
                Err(SolverError::timeout(format!(
                    "{} did not respond within {:?}",
                    self.inner.name(),
                    self.timeout
                )))
            }
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::other(format!(
                "{} worker exited without a response",
                self.inner.name()
            ))),
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
