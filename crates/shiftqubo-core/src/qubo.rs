//! QUBO emission.
//!
//! Turns a compiled [`Objective`] into an upper-triangular coefficient
//! matrix labelled by canonical flat indices, plus the scalar offset
//! collected from the penalty expansions.

use std::collections::BTreeMap;

use crate::compiler::Objective;
use crate::error::ModelError;
use crate::index::VariableIndexer;

/// Sparse QUBO matrix and constant offset.
///
/// `energy(x) = Σ_{(i,j)} Q[i,j]·x_i·x_j + offset`, with `i <= j` and the
/// diagonal holding linear coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct QuboModel {
    num_variables: usize,
    entries: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl QuboModel {
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Coefficient for the unordered pair `{i, j}`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let key = if i <= j { (i, j) } else { (j, i) };
        self.entries.get(&key).copied().unwrap_or(0.0)
    }

    /// Entries in ascending `(i, j)` order, `i <= j`.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of off-diagonal entries.
    pub fn quadratic_count(&self) -> usize {
        self.entries.keys().filter(|(i, j)| i != j).count()
    }

    /// Energy of a full assignment in canonical flat order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if the assignment length differs
    /// from the variable count.
    pub fn evaluate(&self, assignment: &[bool]) -> Result<f64, ModelError> {
        if assignment.len() != self.num_variables {
            return Err(ModelError::Configuration(format!(
                "assignment has {} values, expected {}",
                assignment.len(),
                self.num_variables
            )));
        }
        let sum: f64 = self
            .entries
            .iter()
            .filter(|((i, j), _)| assignment[*i] && assignment[*j])
            .map(|(_, v)| v)
            .sum();
        Ok(sum + self.offset)
    }
}

/// Emits [`QuboModel`]s from compiled objectives.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuboEmitter;

impl QuboEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Copies the coefficient store and folds every penalty constant into
    /// the offset.
    pub fn emit(&self, objective: &Objective) -> QuboModel {
        let entries = objective.coefficients().iter().collect();
        let offset = objective.penalties().iter().map(|p| p.constant()).sum();
        QuboModel {
            num_variables: objective.variable_count(),
            entries,
            offset,
        }
    }

    /// Labels of the emitted matrix rows, i.e. the canonical variable order.
    pub fn labels(&self, objective: &Objective) -> Vec<String> {
        let indexer: &VariableIndexer = objective.indexer();
        indexer.variables().map(|v| v.to_string()).collect()
    }
}

#[cfg(test)]
#[path = "qubo_tests.rs"]
mod tests;
