//! Settlement Module
//!
//! Solvers for the minimum-transfer problem over net balances:
//! - **Greedy**: repeatedly pairs the largest debtor with the largest creditor
//!   (fast, upper bound only)
//! - **Exhaustive**: depth-first search over every chain of pairings (exact)
//! - **SubsetDp**: partitions non-zero balances into zero-sum groups by
//!   dynamic programming over bit masks (exact, exponential only in the
//!   number of non-zero balances)
//!
//! # Critical Invariants
//!
//! 1. **Private Copies**: `Settler::settle` consumes its `NetBalances`; solvers
//!    share no state and never call each other
//! 2. **Determinism**: Same input always yields the same count
//! 3. **No Sentinels**: An exhausted search is reported as
//!    `NoFeasibleSettlement`, never as zero or a huge integer
//!
//! # Example
//!
//! ```rust
//! use debt_settlement_core::{NetBalances, Obligation};
//! use debt_settlement_core::settlement::{Settler, SettlerKind};
//!
//! let obligations = vec![Obligation::new(0, 1, 10), Obligation::new(1, 2, 10)];
//! let balances = NetBalances::from_obligations(&obligations, 3).unwrap();
//!
//! for kind in SettlerKind::ALL {
//!     let count = kind.settler().settle(balances.clone()).unwrap();
//!     assert_eq!(count, 1);
//! }
//! ```

pub mod exhaustive;
pub mod greedy;
pub mod subset_dp;

use crate::models::balance::NetBalances;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Re-export public API
pub use exhaustive::{exhaustive_min_transfers, ExhaustiveSettler};
pub use greedy::{greedy_min_transfers, GreedySettler};
pub use subset_dp::{subset_dp_min_transfers, table_bytes, SubsetDpSettler, MAX_SUBSET_BALANCES};

/// Errors that can occur while solving
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// The search ran out of candidates for a non-zero balance.
    ///
    /// Unreachable for vectors produced by the reducer; `imbalance` is the
    /// signed sum of the offending input.
    #[error("No feasible settlement: balances sum to {imbalance}, not zero")]
    NoFeasibleSettlement { imbalance: i128 },

    #[error("Too many non-zero balances for subset DP: {count} (limit {limit})")]
    TooManyBalances { count: usize, limit: usize },
}

impl SolveError {
    pub(crate) fn infeasible(balances: &[i64]) -> Self {
        SolveError::NoFeasibleSettlement {
            imbalance: balances.iter().map(|&b| b as i128).sum(),
        }
    }
}

/// A minimum-transfer solver
///
/// Implementations take the balance vector by value: callers clone once per
/// invocation, which keeps repeated (e.g. timed) runs independent.
pub trait Settler: Send + Sync {
    /// Short stable name used in logs and reports
    fn name(&self) -> &'static str;

    /// Number of transfers needed to zero every balance
    fn settle(&self, balances: NetBalances) -> Result<usize, SolveError>;
}

/// Selector for the built-in solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlerKind {
    Greedy,
    Exhaustive,
    SubsetDp,
}

impl SettlerKind {
    /// All solvers, in report column order
    pub const ALL: [SettlerKind; 3] = [
        SettlerKind::Greedy,
        SettlerKind::Exhaustive,
        SettlerKind::SubsetDp,
    ];

    pub fn settler(self) -> Box<dyn Settler> {
        match self {
            SettlerKind::Greedy => Box::new(GreedySettler),
            SettlerKind::Exhaustive => Box::new(ExhaustiveSettler),
            SettlerKind::SubsetDp => Box::new(SubsetDpSettler),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SettlerKind::Greedy => "greedy",
            SettlerKind::Exhaustive => "exhaustive",
            SettlerKind::SubsetDp => "subset-dp",
        }
    }
}

impl fmt::Display for SettlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettlerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(SettlerKind::Greedy),
            "exhaustive" | "backtracking" => Ok(SettlerKind::Exhaustive),
            "subset-dp" | "dp" => Ok(SettlerKind::SubsetDp),
            other => Err(format!(
                "unknown solver '{}' (expected greedy, exhaustive or subset-dp)",
                other
            )),
        }
    }
}
