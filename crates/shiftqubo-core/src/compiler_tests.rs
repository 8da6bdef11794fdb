//! Tests for the constraint compiler.

use super::*;
use crate::index::Dimensions;
use crate::test_utils::{all_assignments, assert_close, build, build_with};

mod expansion {
    use super::*;

    #[test]
    fn test_pair_one_hot() {
        let mut store = CoefficientStore::new();
        let constant = expand_squared_sum(&mut store, 1.0, &[0, 1], 1.0);

        assert_eq!(constant, 1.0);
        assert_eq!(store.get(0, 0), -1.0);
        assert_eq!(store.get(1, 1), -1.0);
        assert_eq!(store.get(0, 1), 2.0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_triple_weighted() {
        let mut store = CoefficientStore::new();
        let constant = expand_squared_sum(&mut store, 5.0, &[4, 2, 7], 1.0);

        assert_eq!(constant, 5.0);
        for i in [2, 4, 7] {
            assert_eq!(store.get(i, i), -5.0);
        }
        assert_eq!(store.get(2, 4), 10.0);
        assert_eq!(store.get(4, 7), 10.0);
        assert_eq!(store.get(7, 2), 10.0);
        assert_eq!(store.quadratic_count(), 3);
        assert_eq!(store.linear_count(), 3);
    }

    #[test]
    fn test_target_zero() {
        let mut store = CoefficientStore::new();
        let constant = expand_squared_sum(&mut store, 2.0, &[3], 0.0);
        assert_eq!(constant, 0.0);
        assert_eq!(store.get(3, 3), 2.0);
    }

    #[test]
    fn test_matches_square_on_all_assignments() {
        let vars = [0, 1, 2];
        for target in [0.0, 1.0, 2.0] {
            let mut store = CoefficientStore::new();
            let constant = expand_squared_sum(&mut store, 3.0, &vars, target);
            for x in all_assignments(3) {
                let sum = x.iter().filter(|&&b| b).count() as f64;
                let expected = 3.0 * (sum - target) * (sum - target);
                assert_close(store.evaluate(&x) + constant, expected);
            }
        }
    }

    #[test]
    fn test_overlapping_groups_merge() {
        let mut store = CoefficientStore::new();
        expand_squared_sum(&mut store, 1.0, &[0, 1], 1.0);
        expand_squared_sum(&mut store, 1.0, &[1, 2], 1.0);

        assert_eq!(store.get(1, 1), -2.0);
        assert_eq!(store.get(0, 0), -1.0);
        assert_eq!(store.get(0, 1), 2.0);
        assert_eq!(store.get(1, 2), 2.0);
        assert_eq!(store.get(0, 2), 0.0);
    }

    #[test]
    fn test_store_keys_are_unordered() {
        let mut store = CoefficientStore::new();
        store.add_quadratic(5, 1, 1.5);
        store.add_quadratic(1, 5, 0.5);
        store.add_quadratic(2, 2, 4.0);
        store.add_linear(2, 1.0);

        assert_eq!(store.get(1, 5), 2.0);
        assert_eq!(store.get(5, 1), 2.0);
        assert_eq!(store.get(2, 2), 5.0);
        let keys: Vec<_> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(1, 5), (2, 2)]);
    }
}

mod weights {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = PenaltyWeights::default();
        assert_eq!(w.slot(), 5.0);
        assert_eq!(w.staff(), 5.0);
    }

    #[test]
    fn test_invalid_weights() {
        assert!(PenaltyWeights::new(0.0, 5.0).is_err());
        assert!(PenaltyWeights::new(5.0, -1.0).is_err());
        assert!(PenaltyWeights::new(f64::INFINITY, 5.0).is_err());
        assert!(PenaltyWeights::new(2.0, 3.0).is_ok());
    }

    #[test]
    fn test_soundness() {
        let dims = Dimensions::new(1, 1, 3).unwrap();
        let costs = CostModel::new(dims, vec![5.0, 1.0, 3.0]).unwrap();

        let default = PenaltyWeights::default().check_soundness(&costs);
        assert_eq!(default.threshold, 5.0);
        assert!(!default.is_sound());

        let raised = PenaltyWeights::new(6.0, 6.0).unwrap().check_soundness(&costs);
        assert!(raised.is_sound());

        let mixed = PenaltyWeights::new(6.0, 4.0).unwrap().check_soundness(&costs);
        assert!(mixed.slot_sound);
        assert!(!mixed.staff_sound);
    }
}

#[test]
fn test_compile_small_instance_structure() {
    let (objective, _) = build((2, 1, 2), vec![1.0, 2.0]);
    let store = objective.coefficients();

    assert_eq!(objective.variable_count(), 4);
    assert_eq!(objective.penalties().len(), 4);
    assert_eq!(objective.linear_costs(), &[(0, 1.0), (1, 2.0), (2, 1.0), (3, 2.0)]);

    // cost - λ_slot - λ_staff on the diagonal
    assert_eq!(store.get(0, 0), 1.0 - 10.0);
    assert_eq!(store.get(3, 3), 2.0 - 10.0);
    // same slot: staff 0 and 1 on shift 0
    assert_eq!(store.get(0, 2), 10.0);
    assert_eq!(store.get(1, 3), 10.0);
    // same staff-day
    assert_eq!(store.get(0, 1), 10.0);
    assert_eq!(store.get(2, 3), 10.0);
    // different staff, different shift
    assert_eq!(store.get(0, 3), 0.0);
    assert_eq!(store.quadratic_count(), 4);
}

#[test]
fn test_penalty_groups() {
    let (objective, _) = build((2, 1, 2), vec![1.0, 2.0]);
    let slots: Vec<_> = objective
        .penalties()
        .iter()
        .filter(|p| p.kind == PenaltyKind::Slot)
        .map(|p| p.vars.clone())
        .collect();
    let staff: Vec<_> = objective
        .penalties()
        .iter()
        .filter(|p| p.kind == PenaltyKind::StaffDay)
        .map(|p| p.vars.clone())
        .collect();

    assert_eq!(slots, vec![vec![0, 2], vec![1, 3]]);
    assert_eq!(staff, vec![vec![0, 1], vec![2, 3]]);
}

#[test]
fn test_feasible_beats_every_violation() {
    let (objective, _) = build((2, 1, 2), vec![1.0, 2.0]);

    let mut best_feasible = f64::INFINITY;
    let mut best_infeasible = f64::INFINITY;
    for x in all_assignments(4) {
        let b = objective.breakdown(&x).unwrap();
        if b.is_feasible() {
            best_feasible = best_feasible.min(b.total());
        } else {
            best_infeasible = best_infeasible.min(b.total());
        }
    }

    assert_eq!(best_feasible, 3.0);
    assert!(best_infeasible > best_feasible);
}

#[test]
fn test_single_staff_three_shifts() {
    let (objective, _) = build((1, 1, 3), vec![5.0, 1.0, 3.0]);
    let lambda = DEFAULT_PENALTY_WEIGHT;

    let best = all_assignments(3)
        .min_by(|a, b| {
            let ea = objective.evaluate(a).unwrap();
            let eb = objective.evaluate(b).unwrap();
            ea.total_cmp(&eb)
        })
        .unwrap();
    assert_eq!(best, vec![false, true, false]);

    let b = objective.breakdown(&best).unwrap();
    assert_eq!(b.cost, 1.0);
    assert_eq!(b.staff_penalty, 0.0);
    // one staff member cannot cover three slots
    assert_eq!(b.slot_penalty, 2.0 * lambda);

    let optimum = b.total();
    for x in all_assignments(3) {
        if x == best {
            continue;
        }
        let energy = objective.evaluate(&x).unwrap();
        assert!(energy > optimum);
        let worked = x.iter().filter(|&&v| v).count();
        if worked != 1 {
            assert!(energy >= 1.0 + lambda);
            assert!(objective.breakdown(&x).unwrap().staff_penalty >= lambda);
        }
    }
}

#[test]
fn test_custom_weights_flow_through() {
    let weights = PenaltyWeights::new(7.0, 11.0).unwrap();
    let (objective, _) = build_with((2, 1, 2), vec![1.0, 2.0], weights);
    let store = objective.coefficients();

    assert_eq!(store.get(0, 0), 1.0 - 7.0 - 11.0);
    assert_eq!(store.get(0, 2), 14.0);
    assert_eq!(store.get(0, 1), 22.0);
}

#[test]
fn test_breakdown_rejects_wrong_length() {
    let (objective, _) = build((2, 1, 2), vec![1.0, 2.0]);
    assert!(matches!(
        objective.breakdown(&[true, false]),
        Err(ModelError::Configuration(_))
    ));
}

#[test]
fn test_penalty_helpers() {
    let p = Penalty {
        kind: PenaltyKind::Slot,
        weight: 5.0,
        target: 1.0,
        vars: vec![0, 2],
    };
    assert_eq!(p.constant(), 5.0);
    assert!(p.is_satisfied(&[true, false, false]));
    assert!(!p.is_satisfied(&[true, false, true]));
    assert_eq!(p.evaluate(&[true, false, true]), 5.0);
    assert_eq!(p.evaluate(&[false, true, false]), 5.0);
}

#[test]
fn test_short_assignment_reads_as_zero() {
    let p = Penalty {
        kind: PenaltyKind::StaffDay,
        weight: 5.0,
        target: 1.0,
        vars: vec![0, 3],
    };
    assert_eq!(p.evaluate(&[true]), 0.0);
    assert!(p.is_satisfied(&[true]));
    assert_eq!(p.evaluate(&[]), 5.0);

    let mut store = CoefficientStore::new();
    expand_squared_sum(&mut store, 1.0, &[0, 3], 1.0);
    assert_eq!(store.evaluate(&[true]), -1.0);
    assert_eq!(store.evaluate(&[]), 0.0);
}

#[cfg(feature = "serde")]
mod serde_weights {
    use super::*;

    #[test]
    fn test_deserialize_valid_weights() {
        let w: PenaltyWeights = serde_json::from_str(r#"{"slot":6.0,"staff":7.5}"#).unwrap();
        assert_eq!(w.slot(), 6.0);
        assert_eq!(w.staff(), 7.5);
    }

    #[test]
    fn test_deserialize_rejects_non_positive_weights() {
        assert!(serde_json::from_str::<PenaltyWeights>(r#"{"slot":-5.0,"staff":5.0}"#).is_err());
        assert!(serde_json::from_str::<PenaltyWeights>(r#"{"slot":5.0,"staff":0.0}"#).is_err());
    }

    #[test]
    fn test_serialized_weights_read_back() {
        let w = PenaltyWeights::new(3.0, 4.0).unwrap();
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(serde_json::from_str::<PenaltyWeights>(&json).unwrap(), w);
    }
}
