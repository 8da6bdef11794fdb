//! Problem instances.

use shiftqubo_config::WEEKLY_SHIFT_COSTS;
use shiftqubo_core::{CostModel, Dimensions, Schedule};

/// Reference weekly schedule, one `(day, shift)` list per staff member.
pub const WEEKLY_REFERENCE: [[(usize, usize); 7]; 7] = [
    [(0, 2), (1, 0), (2, 0), (3, 2), (4, 1), (5, 0), (6, 0)],
    [(0, 0), (1, 2), (2, 0), (3, 2), (4, 2), (5, 2), (6, 0)],
    [(0, 2), (1, 1), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)],
    [(0, 2), (1, 2), (2, 0), (3, 2), (4, 0), (5, 2), (6, 2)],
    [(0, 2), (1, 2), (2, 1), (3, 0), (4, 1), (5, 2), (6, 1)],
    [(0, 0), (1, 0), (2, 2), (3, 1), (4, 1), (5, 1), (6, 0)],
    [(0, 0), (1, 1), (2, 0), (3, 0), (4, 1), (5, 0), (6, 1)],
];

/// Dimensions plus cost table.
#[derive(Debug, Clone)]
pub struct Instance {
    pub dims: Dimensions,
    pub costs: CostModel,
}

impl Instance {
    pub fn new(num_staff: usize, num_days: usize, num_shifts: usize, costs: Vec<f64>) -> Self {
        let dims = Dimensions::new(num_staff, num_days, num_shifts).unwrap();
        let costs = CostModel::new(dims, costs).unwrap();
        Self { dims, costs }
    }

    pub fn variable_count(&self) -> usize {
        self.dims.variable_count()
    }
}

/// Two staff, one day, two shifts costing 1.0 and 2.0.
pub fn tiny() -> Instance {
    Instance::new(2, 1, 2, vec![1.0, 2.0])
}

/// One staff member, one day, shifts costing 5.0, 1.0 and 3.0.
pub fn single_staff() -> Instance {
    Instance::new(1, 1, 3, vec![5.0, 1.0, 3.0])
}

/// Seven staff, seven days, three shifts.
pub fn weekly() -> Instance {
    Instance::new(7, 7, 3, WEEKLY_SHIFT_COSTS.to_vec())
}

pub fn weekly_reference_schedule() -> Schedule {
    Schedule::from_lists(WEEKLY_REFERENCE.iter().map(|staff| staff.iter().copied()))
}
