//! Greedy settlement heuristic
//!
//! Each step pays as much as possible from the largest debtor to the largest
//! creditor. At least one of the two balances reaches zero per step, so the
//! loop runs at most `n - 1` times on a zero-sum vector.
//!
//! The answer is an upper bound on the optimum: the heuristic never looks for
//! groups of parties whose balances cancel among themselves.

use crate::models::balance::NetBalances;
use crate::settlement::{SettlerKind, SolveError, Settler};

/// Largest-debtor / largest-creditor heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySettler;

impl Settler for GreedySettler {
    fn name(&self) -> &'static str {
        SettlerKind::Greedy.as_str()
    }

    fn settle(&self, mut balances: NetBalances) -> Result<usize, SolveError> {
        let count = settle_in_place(balances.as_mut_slice())?;
        tracing::debug!(solver = self.name(), parties = balances.len(), count, "settled");
        Ok(count)
    }
}

/// Greedy transfer count for `balances` (the slice is not modified)
pub fn greedy_min_transfers(balances: &[i64]) -> Result<usize, SolveError> {
    settle_in_place(&mut balances.to_vec())
}

fn settle_in_place(net: &mut [i64]) -> Result<usize, SolveError> {
    if net.is_empty() {
        return Ok(0);
    }

    let mut count = 0;

    loop {
        let debtor = arg_extreme(net, |candidate, best| candidate < best);
        let creditor = arg_extreme(net, |candidate, best| candidate > best);

        let owed = net[debtor];
        let due = net[creditor];
        if owed == 0 && due == 0 {
            return Ok(count);
        }

        // One side is empty: nothing left to pair with on a non-zero-sum vector.
        // Each step preserves the total, so it still equals the input's.
        if owed >= 0 || due <= 0 {
            return Err(SolveError::infeasible(net));
        }

        let settled = owed.unsigned_abs().min(due.unsigned_abs()) as i64;
        net[debtor] += settled;
        net[creditor] -= settled;
        count += 1;
    }
}

/// Index of the first entry that beats every other under `better`
fn arg_extreme(net: &[i64], better: impl Fn(i64, i64) -> bool) -> usize {
    let mut best = 0;
    for (i, &value) in net.iter().enumerate().skip(1) {
        if better(value, net[best]) {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_prefer_lowest_index() {
        let net = [-5, -5, 10];
        assert_eq!(arg_extreme(&net, |c, b| c < b), 0);

        let net = [7, -14, 7];
        assert_eq!(arg_extreme(&net, |c, b| c > b), 0);
    }

    #[test]
    fn test_empty_vector_is_settled() {
        assert_eq!(greedy_min_transfers(&[]), Ok(0));
    }

    #[test]
    fn test_greedy_misses_zero_sum_groups() {
        // Optimal is 3 ({-3, 3} and {-2, -2, 4}), but greedy opens with -3 -> 4
        // and breaks both groups.
        let balances = [-2, -2, -3, 3, 4];
        assert_eq!(greedy_min_transfers(&balances), Ok(4));
    }

    #[test]
    fn test_one_sided_vector_is_infeasible() {
        let err = greedy_min_transfers(&[5, 0]).unwrap_err();
        assert_eq!(err, SolveError::NoFeasibleSettlement { imbalance: 5 });
    }

    #[test]
    fn test_input_slice_untouched() {
        let balances = vec![-10, 5, 5];
        greedy_min_transfers(&balances).unwrap();
        assert_eq!(balances, vec![-10, 5, 5]);
    }
}
