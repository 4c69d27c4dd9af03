//! Solver scenario tests
//!
//! Hand-checked balance vectors run through all three solvers, including a
//! malformed (non-zero-sum) vector that must be reported, not solved.

use debt_settlement_core::{
    exhaustive_min_transfers, greedy_min_transfers, subset_dp_min_transfers, NetBalances,
    Obligation, Settler, SettlerKind, SolveError,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn solve_all(balances: &NetBalances) -> Vec<(SettlerKind, Result<usize, SolveError>)> {
    SettlerKind::ALL
        .iter()
        .map(|&kind| (kind, kind.settler().settle(balances.clone())))
        .collect()
}

fn assert_all_equal(balances: &[i64], expected: usize) {
    let balances = NetBalances::from_vec(balances.to_vec());
    for (kind, result) in solve_all(&balances) {
        assert_eq!(result, Ok(expected), "{} on {:?}", kind, balances.as_slice());
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_chain_collapses_to_one_transfer() {
    let obligations = vec![Obligation::new(0, 1, 10), Obligation::new(1, 2, 10)];
    let balances = NetBalances::from_obligations(&obligations, 3).unwrap();
    assert_eq!(balances.as_slice(), &[-10, 0, 10]);

    for (kind, result) in solve_all(&balances) {
        assert_eq!(result, Ok(1), "{}", kind);
    }
}

#[test]
fn test_one_creditor_two_debtors() {
    assert_all_equal(&[-5, -5, 10, 0], 2);
}

#[test]
fn test_two_independent_pairs() {
    // 3 covers 0 and 1 covers 2: two transfers; greedy also finds it here
    assert_all_equal(&[-10, 5, -5, 10], 2);
}

#[test]
fn test_all_zero_balances() {
    assert_all_equal(&[0, 0, 0, 0], 0);
    assert_all_equal(&[], 0);
}

#[test]
fn test_cancelling_obligations_need_no_transfer() {
    let obligations = vec![
        Obligation::new(0, 1, 25),
        Obligation::new(1, 2, 25),
        Obligation::new(2, 0, 25),
    ];
    let balances = NetBalances::from_obligations(&obligations, 3).unwrap();
    for (kind, result) in solve_all(&balances) {
        assert_eq!(result, Ok(0), "{}", kind);
    }
}

#[test]
fn test_single_group_needs_n_minus_one() {
    // No proper subset sums to zero
    assert_all_equal(&[-7, -4, 2, 9], 3);
}

#[test]
fn test_greedy_is_only_an_upper_bound() {
    let balances = [-2, -2, -3, 3, 4];

    assert_eq!(exhaustive_min_transfers(&balances), Ok(3));
    assert_eq!(subset_dp_min_transfers(&balances), Ok(3));
    assert_eq!(greedy_min_transfers(&balances), Ok(4));
}

#[test]
fn test_many_small_groups() {
    // {1,-1} {2,-2} {3,-3} {4,-4} interleaved
    let balances = [1, 2, 3, 4, -4, -3, -2, -1];
    assert_eq!(exhaustive_min_transfers(&balances), Ok(4));
    assert_eq!(subset_dp_min_transfers(&balances), Ok(4));
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test]
fn test_non_zero_sum_is_reported_by_exhaustive() {
    let malformed = NetBalances::from_vec(vec![-10, 5, 3]);
    let result = SettlerKind::Exhaustive.settler().settle(malformed);

    assert_eq!(result, Err(SolveError::NoFeasibleSettlement { imbalance: -2 }));
}

#[test]
fn test_non_zero_sum_is_reported_by_every_solver() {
    let malformed = NetBalances::from_vec(vec![4, 0, -1, 0]);
    for (kind, result) in solve_all(&malformed) {
        assert_eq!(
            result,
            Err(SolveError::NoFeasibleSettlement { imbalance: 3 }),
            "{}",
            kind
        );
    }
}

#[test]
fn test_single_non_zero_party_is_infeasible_not_zero() {
    let malformed = NetBalances::from_vec(vec![0, 0, -8]);
    for (kind, result) in solve_all(&malformed) {
        assert!(
            matches!(result, Err(SolveError::NoFeasibleSettlement { .. })),
            "{} returned {:?}",
            kind,
            result
        );
    }
}
