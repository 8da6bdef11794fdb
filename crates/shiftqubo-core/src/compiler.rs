//! Constraint compiler.
//!
//! Builds the objective
//!
//! ```text
//! H = Σ cost(d,sh)·x[s,d,sh]
//!   + λ_slot  · Σ_{d,sh} (Σ_s  x[s,d,sh] − 1)²
//!   + λ_staff · Σ_{s,d}  (Σ_sh x[s,d,sh] − 1)²
//! ```
//!
//! and expands every squared penalty into linear and pairwise coefficients
//! in a single [`CoefficientStore`]. The constant part of each expansion is
//! not stored; it is recovered by the emitter from the recorded
//! [`Penalty`] groups.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::cost::CostModel;
use crate::error::ModelError;
use crate::index::VariableIndexer;

/// Default weight for both penalty families.
pub const DEFAULT_PENALTY_WEIGHT: f64 = 5.0;

/// Sparse coefficient accumulator keyed by unordered flat-index pairs.
///
/// A key `(i, i)` holds the linear coefficient of `x_i` (binary variables
/// satisfy `x² = x`). Keys are always stored with `i <= j`, and entries that
/// land on the same pair are summed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientStore {
    terms: BTreeMap<(usize, usize), f64>,
}

impl CoefficientStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(i: usize, j: usize) -> (usize, usize) {
        if i <= j {
            (i, j)
        } else {
            (j, i)
        }
    }

    /// Adds `coefficient · x_i`.
    pub fn add_linear(&mut self, i: usize, coefficient: f64) {
        *self.terms.entry((i, i)).or_insert(0.0) += coefficient;
    }

    /// Adds `coefficient · x_i · x_j`. When `i == j` this is a linear term.
    pub fn add_quadratic(&mut self, i: usize, j: usize, coefficient: f64) {
        *self.terms.entry(Self::key(i, j)).or_insert(0.0) += coefficient;
    }

    /// Coefficient of the unordered pair `{i, j}`, zero if absent.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.terms.get(&Self::key(i, j)).copied().unwrap_or(0.0)
    }

    /// Entries in ascending `(i, j)` order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.terms.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn linear_count(&self) -> usize {
        self.terms.keys().filter(|(i, j)| i == j).count()
    }

    pub fn quadratic_count(&self) -> usize {
        self.terms.keys().filter(|(i, j)| i != j).count()
    }

    /// Value of the stored polynomial at `assignment` (no constant).
    pub fn evaluate(&self, assignment: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|((i, j), _)| is_set(assignment, *i) && is_set(assignment, *j))
            .map(|(_, v)| v)
            .sum()
    }
}

/// Indices past the end of `assignment` read as 0.
fn is_set(assignment: &[bool], i: usize) -> bool {
    assignment.get(i).copied().unwrap_or(false)
}

/// Expands `weight · (Σ vars − target)²` into `store`.
///
/// For binary `x`:
///
/// ```text
/// w(Σx − t)² = w(1 − 2t)·Σ x_i + 2w·Σ_{i<j} x_i x_j + w·t²
/// ```
///
/// Returns the constant `w·t²`, which has no variable to attach to.
pub fn expand_squared_sum(
    store: &mut CoefficientStore,
    weight: f64,
    vars: &[usize],
    target: f64,
) -> f64 {
    let linear = weight * (1.0 - 2.0 * target);
    for (a, &i) in vars.iter().enumerate() {
        store.add_linear(i, linear);
        for &j in &vars[a + 1..] {
            store.add_quadratic(i, j, 2.0 * weight);
        }
    }
    weight * target * target
}

/// Constraint family a penalty group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyKind {
    /// Exactly one staff member per `(day, shift)`.
    Slot,
    /// Exactly one shift per `(staff, day)`.
    StaffDay,
}

/// One squared penalty term `weight · (Σ vars − target)²`.
#[derive(Debug, Clone, PartialEq)]
pub struct Penalty {
    pub kind: PenaltyKind,
    pub weight: f64,
    pub target: f64,
    pub vars: Vec<usize>,
}

impl Penalty {
    /// Value of this term at `assignment`.
    pub fn evaluate(&self, assignment: &[bool]) -> f64 {
        let sum = self.vars.iter().filter(|&&i| is_set(assignment, i)).count() as f64;
        let diff = sum - self.target;
        self.weight * diff * diff
    }

    /// Constant left over after expansion.
    pub fn constant(&self) -> f64 {
        self.weight * self.target * self.target
    }

    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.vars.iter().filter(|&&i| is_set(assignment, i)).count() as f64 == self.target
    }
}

/// Penalty weights λ_slot and λ_staff.
///
/// Each weight must exceed the largest per-slot cost so that breaking a
/// constraint is never cheaper than paying for the correct assignment. The
/// defaults (5.0) are sound for costs below 5.0; raise them for larger
/// tables. See [`PenaltyWeights::check_soundness`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPenaltyWeights"))]
pub struct PenaltyWeights {
    slot: f64,
    staff: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPenaltyWeights {
    slot: f64,
    staff: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPenaltyWeights> for PenaltyWeights {
    type Error = ModelError;

    fn try_from(raw: RawPenaltyWeights) -> Result<Self, Self::Error> {
        PenaltyWeights::new(raw.slot, raw.staff)
    }
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            slot: DEFAULT_PENALTY_WEIGHT,
            staff: DEFAULT_PENALTY_WEIGHT,
        }
    }
}

impl PenaltyWeights {
    /// Creates validated weights.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] unless both weights are finite
    /// and strictly positive.
    pub fn new(slot: f64, staff: f64) -> Result<Self, ModelError> {
        for (name, value) in [("lambda_slot", slot), ("lambda_staff", staff)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(Self { slot, staff })
    }

    /// λ_slot, the weight of the one-staff-per-slot penalty.
    pub fn slot(&self) -> f64 {
        self.slot
    }

    /// λ_staff, the weight of the one-shift-per-staff-day penalty.
    pub fn staff(&self) -> f64 {
        self.staff
    }

    /// Compares both weights against the largest absolute slot cost.
    pub fn check_soundness(&self, costs: &CostModel) -> Soundness {
        let threshold = costs.max_abs_cost();
        Soundness {
            threshold,
            slot_sound: self.slot > threshold,
            staff_sound: self.staff > threshold,
        }
    }
}

/// Result of [`PenaltyWeights::check_soundness`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Soundness {
    /// Largest absolute slot cost.
    pub threshold: f64,
    pub slot_sound: bool,
    pub staff_sound: bool,
}

impl Soundness {
    pub fn is_sound(&self) -> bool {
        self.slot_sound && self.staff_sound
    }
}

/// Objective value split by term family.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyBreakdown {
    pub cost: f64,
    pub slot_penalty: f64,
    pub staff_penalty: f64,
}

impl EnergyBreakdown {
    pub fn total(&self) -> f64 {
        self.cost + self.slot_penalty + self.staff_penalty
    }

    /// True when no constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.slot_penalty == 0.0 && self.staff_penalty == 0.0
    }
}

/// Compiled objective: expanded coefficients plus the symbolic terms they
/// came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    indexer: VariableIndexer,
    linear_costs: Vec<(usize, f64)>,
    penalties: Vec<Penalty>,
    store: CoefficientStore,
}

impl Objective {
    pub fn indexer(&self) -> &VariableIndexer {
        &self.indexer
    }

    pub fn variable_count(&self) -> usize {
        self.indexer.variable_count()
    }

    pub fn coefficients(&self) -> &CoefficientStore {
        &self.store
    }

    pub fn penalties(&self) -> &[Penalty] {
        &self.penalties
    }

    pub fn linear_costs(&self) -> &[(usize, f64)] {
        &self.linear_costs
    }

    fn check_len(&self, assignment: &[bool]) -> Result<(), ModelError> {
        if assignment.len() != self.variable_count() {
            return Err(ModelError::config(format!(
                "assignment has {} values, expected {}",
                assignment.len(),
                self.variable_count()
            )));
        }
        Ok(())
    }

    /// Evaluates `H` term by term, without the expanded coefficients.
    pub fn breakdown(&self, assignment: &[bool]) -> Result<EnergyBreakdown, ModelError> {
        self.check_len(assignment)?;
        let mut out = EnergyBreakdown {
            cost: self
                .linear_costs
                .iter()
                .filter(|(i, _)| assignment[*i])
                .map(|(_, c)| c)
                .sum(),
            ..EnergyBreakdown::default()
        };
        for penalty in &self.penalties {
            let value = penalty.evaluate(assignment);
            match penalty.kind {
                PenaltyKind::Slot => out.slot_penalty += value,
                PenaltyKind::StaffDay => out.staff_penalty += value,
            }
        }
        Ok(out)
    }

    /// Symbolic value of `H` at `assignment`.
    pub fn evaluate(&self, assignment: &[bool]) -> Result<f64, ModelError> {
        self.breakdown(assignment).map(|b| b.total())
    }
}

/// Compiles cost terms and one-hot constraints into an [`Objective`].
///
/// Always uses the canonical staff-major indexer, so the emitted QUBO labels
/// follow the canonical convention.
#[derive(Debug, Clone)]
pub struct ConstraintCompiler<'a> {
    indexer: VariableIndexer,
    costs: &'a CostModel,
    weights: PenaltyWeights,
}

impl<'a> ConstraintCompiler<'a> {
    pub fn new(costs: &'a CostModel, weights: PenaltyWeights) -> Self {
        Self {
            indexer: VariableIndexer::canonical(costs.dimensions()),
            costs,
            weights,
        }
    }

    /// Builds the objective.
    ///
    /// # Errors
    ///
    /// Propagates [`ModelError::IndexOutOfRange`], which only occurs if the
    /// indexer and cost model disagree on dimensions.
    pub fn compile(&self) -> Result<Objective, ModelError> {
        let soundness = self.weights.check_soundness(self.costs);
        if !soundness.is_sound() {
            warn!(
                lambda_slot = self.weights.slot(),
                lambda_staff = self.weights.staff(),
                max_cost = soundness.threshold,
                "penalty weight does not exceed the largest slot cost; \
                 violations may be cheaper than feasible assignments"
            );
        }

        let dims = self.indexer.dimensions();
        let mut store = CoefficientStore::new();

        let mut linear_costs = Vec::with_capacity(dims.variable_count());
        for flat in 0..dims.variable_count() {
            let cost = self.costs.variable_cost(&self.indexer, flat)?;
            store.add_linear(flat, cost);
            linear_costs.push((flat, cost));
        }

        let group_count = dims.slot_count() + dims.num_staff() * dims.num_days();
        let mut penalties = Vec::with_capacity(group_count);
        for day in 0..dims.num_days() {
            for shift in 0..dims.num_shifts() {
                let vars = self.indexer.slot_group(day, shift)?;
                let weight = self.weights.slot();
                penalties.push(self.penalty(&mut store, PenaltyKind::Slot, weight, vars));
            }
        }
        for staff in 0..dims.num_staff() {
            for day in 0..dims.num_days() {
                let vars = self.indexer.staff_day_group(staff, day)?;
                penalties.push(self.penalty(
                    &mut store,
                    PenaltyKind::StaffDay,
                    self.weights.staff(),
                    vars,
                ));
            }
        }

        debug!(
            event = "model_built",
            variables = dims.variable_count() as u64,
            penalties = penalties.len() as u64,
            terms = store.len() as u64,
        );

        Ok(Objective {
            indexer: self.indexer,
            linear_costs,
            penalties,
            store,
        })
    }

    fn penalty(
        &self,
        store: &mut CoefficientStore,
        kind: PenaltyKind,
        weight: f64,
        vars: Vec<usize>,
    ) -> Penalty {
        expand_squared_sum(store, weight, &vars, 1.0);
        Penalty {
            kind,
            weight,
            target: 1.0,
            vars,
        }
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
