//! Exhaustive settlement search
//!
//! Depth-first search over settlement chains. The first unsettled party is
//! folded into every later party of opposite sign in turn (one transfer each),
//! and the search continues from the next index. Every earlier index is
//! already zero at that point, so only later indices are candidates.
//!
//! Exact, but exponential: recursion depth is at most `n` and the branching
//! factor at most `n`. Callers needing bounded latency must limit `n` before
//! invoking it.

use crate::models::balance::NetBalances;
use crate::settlement::{SettlerKind, SolveError, Settler};

/// Exact solver by full enumeration
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSettler;

impl Settler for ExhaustiveSettler {
    fn name(&self) -> &'static str {
        SettlerKind::Exhaustive.as_str()
    }

    fn settle(&self, mut balances: NetBalances) -> Result<usize, SolveError> {
        let net = balances.as_mut_slice();
        let count = match search(net, 0) {
            Some(count) => count,
            None => return Err(SolveError::infeasible(net)),
        };
        tracing::debug!(solver = self.name(), parties = net.len(), count, "settled");
        Ok(count)
    }
}

/// Exact minimum transfer count for `balances` (the slice is not modified)
pub fn exhaustive_min_transfers(balances: &[i64]) -> Result<usize, SolveError> {
    let mut net = balances.to_vec();
    search(&mut net, 0).ok_or_else(|| SolveError::infeasible(balances))
}

/// Minimum transfers to settle `net[start..]`
///
/// `None` means no branch reached a settled state. A subtree that costs
/// nothing returns `Some(0)`.
fn search(net: &mut [i64], start: usize) -> Option<usize> {
    let start = match net[start..].iter().position(|&b| b != 0) {
        Some(offset) => start + offset,
        None => return Some(0),
    };

    let current = net[start];
    let mut best: Option<usize> = None;

    for j in start + 1..net.len() {
        if net[j].signum() != -current.signum() {
            continue;
        }

        // Balances of opposite sign cannot overflow when added
        net[j] += current;
        let rest = search(net, start + 1);
        net[j] -= current;

        if let Some(cost) = rest {
            best = Some(best.map_or(cost + 1, |b| b.min(cost + 1)));
        }
    }

    // Restored on the way out; callers see `net` unchanged
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_subtree_costs_zero() {
        let mut net = [0, 0, 0];
        assert_eq!(search(&mut net, 0), Some(0));
    }

    #[test]
    fn test_no_counterparty_is_none_not_zero() {
        let mut net = [0, 7, 0];
        assert_eq!(search(&mut net, 0), None);
    }

    #[test]
    fn test_search_restores_input() {
        let mut net = [-10, 5, -5, 10];
        assert_eq!(search(&mut net, 0), Some(2));
        assert_eq!(net, [-10, 5, -5, 10]);
    }

    #[test]
    fn test_finds_zero_sum_groups() {
        assert_eq!(exhaustive_min_transfers(&[-2, -2, -3, 3, 4]), Ok(3));
    }

    #[test]
    fn test_malformed_input_reports_imbalance() {
        assert_eq!(
            exhaustive_min_transfers(&[-10, 4]),
            Err(SolveError::NoFeasibleSettlement { imbalance: -6 })
        );
    }
}
