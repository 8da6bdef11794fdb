//! Decoded schedules.

use std::fmt;

use crate::error::{IndexAxis, IndexOutOfRange};
use crate::index::{Dimensions, Variable, VariableIndexer};
use crate::sample::Sample;

/// A `(day, shift)` pair worked by one staff member. Orders by day first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftAssignment {
    pub day: usize,
    pub shift: usize,
}

impl ShiftAssignment {
    pub fn new(day: usize, shift: usize) -> Self {
        Self { day, shift }
    }
}

impl From<(usize, usize)> for ShiftAssignment {
    fn from((day, shift): (usize, usize)) -> Self {
        Self { day, shift }
    }
}

/// Staff id → assignments ordered by day.
///
/// Every staff id in `[0, num_staff)` has an entry, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    staff: Vec<Vec<ShiftAssignment>>,
}

impl Schedule {
    /// Empty schedule for `num_staff` staff members.
    pub fn new(num_staff: usize) -> Self {
        Self {
            staff: vec![Vec::new(); num_staff],
        }
    }

    /// Builds a schedule from per-staff `(day, shift)` lists, sorted by day.
    pub fn from_lists<I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = (usize, usize)>,
    {
        let mut schedule = Self {
            staff: lists
                .into_iter()
                .map(|l| l.into_iter().map(ShiftAssignment::from).collect())
                .collect(),
        };
        schedule.sort();
        schedule
    }

    /// Appends an assignment. Call [`Schedule::sort`] once done.
    pub fn push(&mut self, staff: usize, day: usize, shift: usize) -> Result<(), IndexOutOfRange> {
        let bound = self.staff.len();
        let list = self.staff.get_mut(staff).ok_or(IndexOutOfRange {
            axis: IndexAxis::Staff,
            value: staff,
            bound,
        })?;
        list.push(ShiftAssignment::new(day, shift));
        Ok(())
    }

    /// Sorts each staff member's list by day (then shift).
    pub fn sort(&mut self) {
        for list in &mut self.staff {
            list.sort_unstable();
        }
    }

    pub fn num_staff(&self) -> usize {
        self.staff.len()
    }

    /// Assignments of one staff member; empty for unknown ids.
    pub fn staff(&self, staff: usize) -> &[ShiftAssignment] {
        self.staff.get(staff).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[ShiftAssignment])> + '_ {
        self.staff.iter().enumerate().map(|(s, l)| (s, l.as_slice()))
    }

    pub fn total_assignments(&self) -> usize {
        self.staff.iter().map(Vec::len).sum()
    }

    /// True when no staff member has any assignment.
    pub fn is_empty(&self) -> bool {
        self.staff.iter().all(Vec::is_empty)
    }

    /// Encodes the schedule as a sample under `indexer`'s convention.
    pub fn to_sample(&self, indexer: &VariableIndexer) -> Result<Sample, IndexOutOfRange> {
        let mut ones = Vec::with_capacity(self.total_assignments());
        for (staff, list) in self.iter() {
            for a in list {
                ones.push(indexer.to_flat(Variable::new(staff, a.day, a.shift))?);
            }
        }
        Ok(Sample::with_ones(indexer.variable_count(), ones))
    }

    /// Lists every hard-constraint violation against `dims`.
    pub fn violations(&self, dims: Dimensions) -> Vec<Violation> {
        let mut out = Vec::new();
        let mut slot_counts = vec![0usize; dims.slot_count()];
        let mut day_counts = vec![0usize; dims.num_staff() * dims.num_days()];

        for (staff, list) in self.iter() {
            for a in list {
                if staff >= dims.num_staff()
                    || a.day >= dims.num_days()
                    || a.shift >= dims.num_shifts()
                {
                    out.push(Violation::OutOfRange {
                        staff,
                        day: a.day,
                        shift: a.shift,
                    });
                    continue;
                }
                slot_counts[a.day * dims.num_shifts() + a.shift] += 1;
                day_counts[staff * dims.num_days() + a.day] += 1;
            }
        }

        for day in 0..dims.num_days() {
            for shift in 0..dims.num_shifts() {
                match slot_counts[day * dims.num_shifts() + shift] {
                    1 => {}
                    0 => out.push(Violation::SlotUncovered { day, shift }),
                    count => out.push(Violation::SlotOverstaffed { day, shift, count }),
                }
            }
        }
        for staff in 0..dims.num_staff() {
            for day in 0..dims.num_days() {
                match day_counts[staff * dims.num_days() + day] {
                    1 => {}
                    0 => out.push(Violation::StaffIdle { staff, day }),
                    count => out.push(Violation::StaffDoubleBooked { staff, day, count }),
                }
            }
        }
        out
    }

    pub fn is_feasible(&self, dims: Dimensions) -> bool {
        self.num_staff() == dims.num_staff() && self.violations(dims).is_empty()
    }
}

/// A hard-constraint violation found by [`Schedule::violations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    SlotUncovered { day: usize, shift: usize },
    SlotOverstaffed { day: usize, shift: usize, count: usize },
    StaffIdle { staff: usize, day: usize },
    StaffDoubleBooked { staff: usize, day: usize, count: usize },
    OutOfRange { staff: usize, day: usize, shift: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::SlotUncovered { day, shift } => {
                write!(f, "day {day} shift {shift} has no staff")
            }
            Violation::SlotOverstaffed { day, shift, count } => {
                write!(f, "day {day} shift {shift} has {count} staff")
            }
            Violation::StaffIdle { staff, day } => write!(f, "staff {staff} idle on day {day}"),
            Violation::StaffDoubleBooked { staff, day, count } => {
                write!(f, "staff {staff} works {count} shifts on day {day}")
            }
            Violation::OutOfRange { staff, day, shift } => {
                write!(f, "assignment ({staff}, {day}, {shift}) outside the cube")
            }
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
