use std::time::{Duration, Instant};

use shiftqubo_core::{
    ConstraintCompiler, GatewayConfig, PenaltyWeights, QuboEmitter, QuboModel, Sample,
    SolverError, SolverErrorKind, SolverGateway,
};
use shiftqubo_test::{tiny, ScriptedGateway, SlowGateway};

use super::TimeoutGateway;

fn tiny_qubo() -> QuboModel {
    let instance = tiny();
    let objective = ConstraintCompiler::new(&instance.costs, PenaltyWeights::default())
        .compile()
        .unwrap();
    QuboEmitter::new().emit(&objective)
}

#[test]
fn test_fast_gateway_passes_through() {
    let sample = Sample::with_ones(4, [1, 2]);
    let gateway = TimeoutGateway::new(
        ScriptedGateway::returning(sample.clone(), 3.0),
        Duration::from_secs(5),
    );

    let response = gateway.solve(&tiny_qubo(), &GatewayConfig::default()).unwrap();

    assert_eq!(response.best_sample, sample);
    assert_eq!(response.energy, 3.0);
    assert_eq!(gateway.inner().calls(), 1);
}

#[test]
fn test_config_reaches_inner_gateway() {
    let config = GatewayConfig {
        num_reads: 42,
        ..GatewayConfig::default()
    };
    let gateway = TimeoutGateway::new(
        ScriptedGateway::returning(Sample::new(), 0.0),
        Duration::from_secs(5),
    );

    gateway.solve(&tiny_qubo(), &config).unwrap();

    assert_eq!(gateway.inner().last_config(), Some(config));
}

#[test]
fn test_slow_gateway_times_out() {
    let gateway = TimeoutGateway::new(
        SlowGateway {
            inner: ScriptedGateway::returning(Sample::new(), 0.0),
            delay: Duration::from_millis(500),
        },
        Duration::from_millis(20),
    );

    let start = Instant::now();
    let err = gateway
        .solve(&tiny_qubo(), &GatewayConfig::default())
        .unwrap_err();

    assert_eq!(err.kind, SolverErrorKind::Timeout);
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test]
fn test_inner_error_passes_through() {
    let gateway = TimeoutGateway::new(
        ScriptedGateway::failing(SolverError::new(SolverErrorKind::Auth, "bad token")),
        Duration::from_secs(5),
    );

    let err = gateway
        .solve(&tiny_qubo(), &GatewayConfig::default())
        .unwrap_err();

    assert_eq!(err.kind, SolverErrorKind::Auth);
    assert_eq!(err.message, "bad token");
}

#[test]
fn test_name_delegates() {
    let gateway = TimeoutGateway::new(
        ScriptedGateway::returning(Sample::new(), 0.0),
        Duration::from_secs(1),
    );
    assert_eq!(gateway.name(), "scripted");
    assert_eq!(gateway.timeout(), Duration::from_secs(1));
}
