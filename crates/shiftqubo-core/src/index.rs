//! Variable indexing over the staff × day × shift cube.
//!
//! [`VariableIndexer`] is the single source of truth for mapping a decision
//! variable to its flat index. The compiler, the emitter and the decoder all
//! go through it; none of them repeat the stride arithmetic.
//!
//! # Example
//!
//! ```
//! use shiftqubo_core::index::{Dimensions, Variable, VariableIndexer};
//!
//! let dims = Dimensions::new(2, 7, 3).unwrap();
//! let indexer = VariableIndexer::canonical(dims);
//!
//! let flat = indexer.to_flat(Variable::new(1, 2, 0)).unwrap();
//! assert_eq!(flat, 21 + 2 * 3);
//! assert_eq!(indexer.from_flat(flat).unwrap(), Variable::new(1, 2, 0));
//! ```

use std::fmt;

use crate::error::{IndexAxis, IndexOutOfRange, ModelError};

/// Size of the decision cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDimensions"))]
pub struct Dimensions {
    num_staff: usize,
    num_days: usize,
    num_shifts: usize,
}

/// Unchecked wire form of [`Dimensions`]; deserialization goes through
/// [`Dimensions::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDimensions {
    num_staff: usize,
    num_days: usize,
    num_shifts: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDimensions> for Dimensions {
    type Error = ModelError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Dimensions::new(raw.num_staff, raw.num_days, raw.num_shifts)
    }
}

impl Dimensions {
    /// Creates validated dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if any extent is zero or the
    /// variable count overflows `usize`.
    pub fn new(num_staff: usize, num_days: usize, num_shifts: usize) -> Result<Self, ModelError> {
        if num_staff == 0 || num_days == 0 || num_shifts == 0 {
            return Err(ModelError::config(format!(
                "dimensions must be positive, got {num_staff} staff × {num_days} days \
                 × {num_shifts} shifts"
            )));
        }
        num_staff
            .checked_mul(num_days)
            .and_then(|n| n.checked_mul(num_shifts))
            .ok_or_else(|| ModelError::config("variable count overflows usize"))?;
        Ok(Self {
            num_staff,
            num_days,
            num_shifts,
        })
    }

    pub fn num_staff(&self) -> usize {
        self.num_staff
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    pub fn num_shifts(&self) -> usize {
        self.num_shifts
    }

    /// Number of `(day, shift)` slots.
    pub fn slot_count(&self) -> usize {
        self.num_days * self.num_shifts
    }

    /// Total number of decision variables, `N`.
    pub fn variable_count(&self) -> usize {
        self.num_staff * self.num_days * self.num_shifts
    }

    fn extent(&self, axis: IndexAxis) -> usize {
        match axis {
            IndexAxis::Staff => self.num_staff,
            IndexAxis::Day => self.num_days,
            IndexAxis::Shift => self.num_shifts,
            IndexAxis::Flat => self.variable_count(),
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} staff × {} days × {} shifts",
            self.num_staff, self.num_days, self.num_shifts
        )
    }
}

/// A decision variable `x[staff][day][shift]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub staff: usize,
    pub day: usize,
    pub shift: usize,
}

impl Variable {
    pub fn new(staff: usize, day: usize, shift: usize) -> Self {
        Self { staff, day, shift }
    }

    fn coord(&self, axis: IndexAxis) -> usize {
        match axis {
            IndexAxis::Staff => self.staff,
            IndexAxis::Day => self.day,
            IndexAxis::Shift => self.shift,
            IndexAxis::Flat => unreachable!("flat is not a cube axis"),
        }
    }

    fn set_coord(&mut self, axis: IndexAxis, value: usize) {
        match axis {
            IndexAxis::Staff => self.staff = value,
            IndexAxis::Day => self.day = value,
            IndexAxis::Shift => self.shift = value,
            IndexAxis::Flat => unreachable!("flat is not a cube axis"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x[{}][{}][{}]", self.staff, self.day, self.shift)
    }
}

/// Axis order used to flatten the cube, outermost axis first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Flattening {
    /// `s*(D*H) + d*H + sh`. The canonical convention used for emission.
    #[default]
    StaffMajor,
    /// `d*(S*H) + s*H + sh`.
    DayMajor,
    /// `sh*(D*S) + d*S + s`.
    ShiftMajor,
}

impl Flattening {
    /// Axes from outermost (slowest varying) to innermost.
    pub fn axes(&self) -> [IndexAxis; 3] {
        match self {
            Flattening::StaffMajor => [IndexAxis::Staff, IndexAxis::Day, IndexAxis::Shift],
            Flattening::DayMajor => [IndexAxis::Day, IndexAxis::Staff, IndexAxis::Shift],
            Flattening::ShiftMajor => [IndexAxis::Shift, IndexAxis::Day, IndexAxis::Staff],
        }
    }
}

impl fmt::Display for Flattening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flattening::StaffMajor => "staff-major",
            Flattening::DayMajor => "day-major",
            Flattening::ShiftMajor => "shift-major",
        };
        f.write_str(name)
    }
}

/// Bijection between [`Variable`]s and flat indices in `[0, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableIndexer {
    dims: Dimensions,
    flattening: Flattening,
}

impl VariableIndexer {
    pub fn new(dims: Dimensions, flattening: Flattening) -> Self {
        Self { dims, flattening }
    }

    /// Indexer using the canonical staff-major convention.
    pub fn canonical(dims: Dimensions) -> Self {
        Self::new(dims, Flattening::StaffMajor)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn flattening(&self) -> Flattening {
        self.flattening
    }

    pub fn variable_count(&self) -> usize {
        self.dims.variable_count()
    }

    /// Maps a variable to its flat index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRange`] naming the first offending coordinate.
    pub fn to_flat(&self, var: Variable) -> Result<usize, IndexOutOfRange> {
        let mut flat = 0;
        for axis in self.flattening.axes() {
            let value = var.coord(axis);
            let bound = self.dims.extent(axis);
            if value >= bound {
                return Err(IndexOutOfRange { axis, value, bound });
            }
            flat = flat * bound + value;
        }
        Ok(flat)
    }

    /// Maps a flat index back to its variable.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRange`] if `flat >= N`.
    pub fn from_flat(&self, flat: usize) -> Result<Variable, IndexOutOfRange> {
        let bound = self.dims.variable_count();
        if flat >= bound {
            return Err(IndexOutOfRange {
                axis: IndexAxis::Flat,
                value: flat,
                bound,
            });
        }
        let mut rest = flat;
        let mut var = Variable::new(0, 0, 0);
        for axis in self.flattening.axes().into_iter().rev() {
            let extent = self.dims.extent(axis);
            var.set_coord(axis, rest % extent);
            rest /= extent;
        }
        Ok(var)
    }

    /// Iterates all variables in flat-index order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        (0..self.variable_count()).map(move |flat| {
            self.from_flat(flat)
                .unwrap_or_else(|_| unreachable!("flat index below variable count"))
        })
    }

    /// Flat indices of every staff member in one `(day, shift)` slot.
    pub fn slot_group(&self, day: usize, shift: usize) -> Result<Vec<usize>, IndexOutOfRange> {
        (0..self.dims.num_staff)
            .map(|staff| self.to_flat(Variable::new(staff, day, shift)))
            .collect()
    }

    /// Flat indices of every shift one staff member could take on one day.
    pub fn staff_day_group(&self, staff: usize, day: usize) -> Result<Vec<usize>, IndexOutOfRange> {
        (0..self.dims.num_shifts)
            .map(|shift| self.to_flat(Variable::new(staff, day, shift)))
            .collect()
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
