//! Tests for solution decoding.

use super::*;
use crate::index::Variable;
use crate::sample::SampleKey;
use crate::schedule::ShiftAssignment;

fn dims() -> Dimensions {
    Dimensions::new(3, 3, 3).unwrap()
}

/// Staff `s` works shift `(s + d) % 3` on day `d`: every slot covered once.
fn feasible() -> Schedule {
    Schedule::from_lists((0..3).map(|s| (0..3).map(move |d| (d, (s + d) % 3))))
}

#[test]
fn test_round_trip_canonical() {
    let dims = dims();
    let original = feasible();
    let sample = original
        .to_sample(&VariableIndexer::canonical(dims))
        .unwrap();

    let decoded = SolutionDecoder::new(dims).decode(&sample).unwrap();
    assert_eq!(decoded.schedule, original);
    assert_eq!(decoded.convention, Flattening::StaffMajor);
    assert_eq!(decoded.attempts, 1);
    assert!(!decoded.used_secondary());
    assert!(decoded.schedule.is_feasible(dims));
}

#[test]
fn test_output_sorted_by_day() {
    let dims = dims();
    let indexer = VariableIndexer::canonical(dims);
    // inserted in reverse day order
    let ones = [2, 1, 0].map(|d| indexer.to_flat(Variable::new(1, d, 0)).unwrap());
    let sample = Sample::with_ones(27, ones);

    let decoded = SolutionDecoder::new(dims).decode(&sample).unwrap();
    let days: Vec<_> = decoded.schedule.staff(1).iter().map(|a| a.day).collect();
    assert_eq!(days, vec![0, 1, 2]);
}

#[test]
fn test_all_zero_sample_fails() {
    let err = SolutionDecoder::new(dims())
        .decode(&Sample::with_ones(27, []))
        .unwrap_err();
    assert_eq!(err.attempts, 2);
    assert_eq!(err.keys_seen, 27);
    assert_eq!(err.ones_seen, 0);
}

#[test]
fn test_empty_sample_fails() {
    assert!(SolutionDecoder::new(dims()).decode(&Sample::new()).is_err());
}

#[test]
fn test_only_foreign_keys_fails() {
    let mut sample = Sample::new();
    sample.insert(27usize, true);
    sample.insert(1000usize, true);
    sample.insert(-3i64, true);
    sample.insert("x[0][0][0]", true);
    sample.insert("aux_0", true);

    let err = SolutionDecoder::new(dims()).decode(&sample).unwrap_err();
    assert_eq!(err.ones_seen, 5);
}

#[test]
fn test_malformed_keys_are_ignored() {
    let dims = dims();
    let mut sample = feasible()
        .to_sample(&VariableIndexer::canonical(dims))
        .unwrap();
    sample.insert("label", true);
    sample.insert(-1i64, true);
    sample.insert(99usize, true);

    let decoded = SolutionDecoder::new(dims).decode(&sample).unwrap();
    assert_eq!(decoded.schedule, feasible());
}

#[test]
fn test_without_secondary_fails_after_one_attempt() {
    let decoder = SolutionDecoder::new(dims()).with_secondary(None);
    let err = decoder.decode(&Sample::with_ones(27, [])).unwrap_err();
    assert_eq!(err.attempts, 1);
}

#[test]
fn test_secondary_equal_to_primary_is_dropped() {
    let decoder = SolutionDecoder::new(dims()).with_secondary(Some(Flattening::StaffMajor));
    assert_eq!(decoder.secondary(), None);
}

#[test]
fn test_decode_with_alternate_convention() {
    let dims = dims();
    let original = feasible();
    let shift_major = VariableIndexer::new(dims, Flattening::ShiftMajor);
    let sample = original.to_sample(&shift_major).unwrap();

    let decoder = SolutionDecoder::new(dims);
    assert_eq!(decoder.decode_with(&sample, Flattening::ShiftMajor), original);

    let decoder = decoder
        .with_primary(Flattening::ShiftMajor)
        .with_secondary(Some(Flattening::StaffMajor));
    let decoded = decoder.decode(&sample).unwrap();
    assert_eq!(decoded.convention, Flattening::ShiftMajor);
    assert_eq!(decoded.schedule, original);
}

#[test]
fn test_infeasible_sample_still_decodes() {
    let dims = dims();
    // staff 0 takes all three shifts on day 0
    let sample = Sample::with_ones(27, [0, 1, 2]);
    let decoded = SolutionDecoder::new(dims).decode(&sample).unwrap();

    assert_eq!(decoded.schedule.staff(0).len(), 3);
    assert!(!decoded.schedule.is_feasible(dims));
}

#[test]
fn test_false_values_are_skipped() {
    let mut sample: Sample = [(SampleKey::Index(4), false)].into_iter().collect();
    sample.insert(5usize, true);

    let decoded = SolutionDecoder::new(dims()).decode(&sample).unwrap();
    assert_eq!(decoded.schedule.total_assignments(), 1);
    // flat 5 = staff 0, day 1, shift 2
    assert_eq!(decoded.schedule.staff(0), &[ShiftAssignment::new(1, 2)]);
}

