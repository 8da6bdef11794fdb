//! Tests for schedules and violation checks.

use super::*;

fn dims() -> Dimensions {
    Dimensions::new(2, 1, 2).unwrap()
}

#[test]
fn test_from_lists_sorts() {
    let schedule = Schedule::from_lists(vec![vec![(2, 1), (0, 2), (1, 0)], vec![]]);
    let days: Vec<_> = schedule.staff(0).iter().map(|a| a.day).collect();
    assert_eq!(days, vec![0, 1, 2]);
    assert!(schedule.staff(1).is_empty());
    assert!(schedule.staff(9).is_empty());
}

#[test]
fn test_push_unknown_staff() {
    let mut schedule = Schedule::new(2);
    assert!(schedule.push(1, 0, 0).is_ok());
    let err = schedule.push(2, 0, 0).unwrap_err();
    assert_eq!(err.axis, IndexAxis::Staff);
    assert_eq!(schedule.total_assignments(), 1);
}

#[test]
fn test_empty_means_no_assignments() {
    let schedule = Schedule::new(3);
    assert!(schedule.is_empty());
    assert_eq!(schedule.num_staff(), 3);
}

#[test]
fn test_feasible_schedule() {
    let schedule = Schedule::from_lists(vec![vec![(0, 0)], vec![(0, 1)]]);
    assert!(schedule.violations(dims()).is_empty());
    assert!(schedule.is_feasible(dims()));
}

#[test]
fn test_violations() {
    let schedule = Schedule::from_lists(vec![vec![(0, 0), (0, 1)], vec![(0, 1)]]);
    assert_eq!(
        schedule.violations(dims()),
        vec![
            Violation::SlotOverstaffed { day: 0, shift: 1, count: 2 },
            Violation::StaffDoubleBooked { staff: 0, day: 0, count: 2 },
        ]
    );
}

#[test]
fn test_idle_and_uncovered() {
    let schedule = Schedule::from_lists(vec![vec![(0, 1)], vec![]]);
    assert_eq!(
        schedule.violations(dims()),
        vec![
            Violation::SlotUncovered { day: 0, shift: 0 },
            Violation::StaffIdle { staff: 1, day: 0 },
        ]
    );
    assert!(!schedule.is_feasible(dims()));
}

#[test]
fn test_out_of_range_entries() {
    let schedule = Schedule::from_lists(vec![vec![(0, 0), (3, 0)], vec![(0, 1)]]);
    let violations = schedule.violations(dims());
    assert_eq!(
        violations,
        vec![Violation::OutOfRange { staff: 0, day: 3, shift: 0 }]
    );
    assert_eq!(violations[0].to_string(), "assignment (0, 3, 0) outside the cube");
}

#[test]
fn test_wrong_staff_count_is_infeasible() {
    let schedule = Schedule::from_lists(vec![vec![(0, 0)], vec![(0, 1)], vec![]]);
    assert!(!schedule.is_feasible(dims()));
}

#[test]
fn test_to_sample_round_trip() {
    let indexer = VariableIndexer::canonical(dims());
    let schedule = Schedule::from_lists(vec![vec![(0, 1)], vec![(0, 0)]]);
    let sample = schedule.to_sample(&indexer).unwrap();

    assert_eq!(sample.len(), 4);
    assert_eq!(sample.ones(), 2);
    assert_eq!(sample.to_assignment(&indexer), vec![false, true, true, false]);
}

#[test]
fn test_to_sample_out_of_range() {
    let indexer = VariableIndexer::canonical(dims());
    let schedule = Schedule::from_lists(vec![vec![(1, 0)], vec![]]);
    assert!(schedule.to_sample(&indexer).is_err());
}
