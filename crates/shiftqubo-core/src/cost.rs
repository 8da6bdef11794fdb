//! Staff-independent cost of working each `(day, shift)` slot.

use crate::error::{IndexAxis, IndexOutOfRange, ModelError};
use crate::index::{Dimensions, VariableIndexer};

/// Validated shift cost table, indexed by `day * num_shifts + shift`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    dims: Dimensions,
    costs: Vec<f64>,
}

impl CostModel {
    /// Builds the cost model from a flat table.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if the table length is not
    /// `num_days * num_shifts` or any entry is not finite.
    pub fn new(dims: Dimensions, costs: Vec<f64>) -> Result<Self, ModelError> {
        if costs.len() != dims.slot_count() {
            return Err(ModelError::config(format!(
                "shift cost table has {} entries, expected {} ({} days × {} shifts)",
                costs.len(),
                dims.slot_count(),
                dims.num_days(),
                dims.num_shifts()
            )));
        }
        if let Some(pos) = costs.iter().position(|c| !c.is_finite()) {
            return Err(ModelError::config(format!(
                "shift cost at position {pos} is not finite: {}",
                costs[pos]
            )));
        }
        Ok(Self { dims, costs })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Cost of working `shift` on `day`.
    pub fn cost(&self, day: usize, shift: usize) -> Result<f64, IndexOutOfRange> {
        if day >= self.dims.num_days() {
            return Err(IndexOutOfRange {
                axis: IndexAxis::Day,
                value: day,
                bound: self.dims.num_days(),
            });
        }
        if shift >= self.dims.num_shifts() {
            return Err(IndexOutOfRange {
                axis: IndexAxis::Shift,
                value: shift,
                bound: self.dims.num_shifts(),
            });
        }
        Ok(self.costs[day * self.dims.num_shifts() + shift])
    }

    /// Cost attached to the variable at `flat` under `indexer`'s convention.
    pub fn variable_cost(
        &self,
        indexer: &VariableIndexer,
        flat: usize,
    ) -> Result<f64, IndexOutOfRange> {
        let var = indexer.from_flat(flat)?;
        self.cost(var.day, var.shift)
    }

    /// Largest absolute slot cost; the lower bound for a sound penalty weight.
    pub fn max_abs_cost(&self) -> f64 {
        self.costs.iter().fold(0.0, |acc: f64, c| acc.max(c.abs()))
    }

    /// Raw table in `day * num_shifts + shift` order.
    pub fn as_slice(&self) -> &[f64] {
        &self.costs
    }
}

#[cfg(test)]
#[path = "cost_tests.rs"]
mod tests;
