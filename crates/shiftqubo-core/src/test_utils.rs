//! Test utilities for shiftqubo-core.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::compiler::{ConstraintCompiler, Objective, PenaltyWeights};
use crate::cost::CostModel;
use crate::index::Dimensions;
use crate::qubo::{QuboEmitter, QuboModel};

/// Compiles and emits one instance with default penalties.
pub fn build(dims: (usize, usize, usize), costs: Vec<f64>) -> (Objective, QuboModel) {
    build_with(dims, costs, PenaltyWeights::default())
}

pub fn build_with(
    (s, d, h): (usize, usize, usize),
    costs: Vec<f64>,
    weights: PenaltyWeights,
) -> (Objective, QuboModel) {
    let dims = Dimensions::new(s, d, h).unwrap();
    let costs = CostModel::new(dims, costs).unwrap();
    let objective = ConstraintCompiler::new(&costs, weights).compile().unwrap();
    let qubo = QuboEmitter::new().emit(&objective);
    (objective, qubo)
}

/// Every assignment of `n` binary variables, in counting order.
pub fn all_assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
    assert!(n < 24, "exhaustive enumeration only for tiny instances");
    (0u32..1 << n).map(move |bits| (0..n).map(|i| bits & (1 << i) != 0).collect())
}

/// Seeded generator for reproducible randomized checks.
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn random_assignment(rng: &mut ChaCha8Rng, n: usize, density: f64) -> Vec<bool> {
    (0..n).map(|_| rng.random_bool(density)).collect()
}

/// Random costs in `[0.5, 4.5)` rounded to one decimal.
pub fn random_costs(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n)
        .map(|_| (rng.random_range(5..45) as f64) / 10.0)
        .collect()
}

/// Relative closeness check.
pub fn assert_close(a: f64, b: f64) {
    let scale = a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() <= 1e-9 * scale, "{a} != {b}");
}
