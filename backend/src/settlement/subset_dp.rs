//! Subset dynamic program over non-zero balances
//!
//! The minimum number of transfers equals `m - g`, where `m` is the number of
//! non-zero balances and `g` the largest number of disjoint zero-sum groups
//! they can be partitioned into: a zero-sum group of `k` parties settles
//! internally with `k - 1` transfers.
//!
//! # Algorithm
//!
//! 1. Collect the `m` non-zero balances (settled parties never need a transfer)
//! 2. `sum[mask]` for all `2^m` masks, each from the mask minus its lowest bit
//! 3. For every zero-sum ("closable") mask:
//!    `dp[mask] = min(popcount(mask) - 1, dp[sub] + dp[mask ^ sub])` over all
//!    closable proper sub-masks `sub`
//! 4. Answer is `dp[full]`
//!
//! Complexity: O(3^m) time, O(2^m) space.
//!
//! # Limits
//!
//! Masks are `u32` and `m` is capped at [`MAX_SUBSET_BALANCES`]. At the cap the
//! `i128` sum table is 256 MiB and the `Option<u32>` DP table 128 MiB, 384 MiB
//! in all (see [`table_bytes`]); larger inputs are refused with
//! `TooManyBalances` before anything is allocated.

use crate::models::balance::NetBalances;
use crate::settlement::{SettlerKind, SolveError, Settler};

/// Largest non-zero balance count the subset DP accepts
pub const MAX_SUBSET_BALANCES: usize = 24;

/// Bytes held by the sum and DP tables for `m` non-zero balances
pub const fn table_bytes(m: usize) -> usize {
    (1usize << m) * (std::mem::size_of::<i128>() + std::mem::size_of::<Option<u32>>())
}

/// Exact solver by zero-sum subset partitioning
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetDpSettler;

impl Settler for SubsetDpSettler {
    fn name(&self) -> &'static str {
        SettlerKind::SubsetDp.as_str()
    }

    fn settle(&self, balances: NetBalances) -> Result<usize, SolveError> {
        let debts = balances.non_zero();
        let count = solve(&debts)?;
        tracing::debug!(
            solver = self.name(),
            parties = balances.len(),
            non_zero = debts.len(),
            count,
            "settled"
        );
        Ok(count)
    }
}

/// Exact minimum transfer count for `balances` via subset DP
pub fn subset_dp_min_transfers(balances: &[i64]) -> Result<usize, SolveError> {
    let debts: Vec<i64> = balances.iter().copied().filter(|&b| b != 0).collect();
    solve(&debts)
}

fn solve(debts: &[i64]) -> Result<usize, SolveError> {
    let m = debts.len();
    if m == 0 {
        return Ok(0);
    }
    if m > MAX_SUBSET_BALANCES {
        return Err(SolveError::TooManyBalances {
            count: m,
            limit: MAX_SUBSET_BALANCES,
        });
    }

    tracing::trace!(non_zero = m, table_bytes = table_bytes(m), "building subset tables");

    let full: u32 = (1u32 << m) - 1;
    let sums = subset_sums(debts);

    if sums[full as usize] != 0 {
        return Err(SolveError::infeasible(debts));
    }

    // None marks a non-closable mask; those are never read as sub-results
    let mut dp: Vec<Option<u32>> = vec![None; 1usize << m];
    dp[0] = Some(0);

    for mask in 1..=full {
        if sums[mask as usize] != 0 {
            continue;
        }

        let mut best = mask.count_ones() - 1;

        // Proper, non-empty sub-masks. If `sub` is closable then so is
        // `mask ^ sub`, since both sums add up to zero.
        let mut sub = (mask - 1) & mask;
        while sub > 0 {
            if let (Some(a), Some(b)) = (dp[sub as usize], dp[(mask ^ sub) as usize]) {
                best = best.min(a + b);
            }
            sub = (sub - 1) & mask;
        }

        dp[mask as usize] = Some(best);
    }

    dp[full as usize]
        .map(|count| count as usize)
        .ok_or_else(|| SolveError::infeasible(debts))
}

/// Sum of the selected balances for every mask over `debts`
///
/// Accumulated in i128: subsets of i64 balances can exceed the i64 range.
fn subset_sums(debts: &[i64]) -> Vec<i128> {
    let size = 1usize << debts.len();
    let mut sums = vec![0i128; size];

    for mask in 1..size {
        let lowest = mask & mask.wrapping_neg();
        let idx = lowest.trailing_zeros() as usize;
        sums[mask] = sums[mask ^ lowest] + debts[idx] as i128;
    }

    sums
}
