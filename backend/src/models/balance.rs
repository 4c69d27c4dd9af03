//! Net balance reduction
//!
//! Collapses a list of obligations into one signed balance per party:
//! - Positive balance: party is a net creditor (is owed money)
//! - Negative balance: party is a net debtor (owes money)
//! - Zero balance: party needs no transfer at all
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: The balances of a reduced vector always sum to zero
//! 2. **Eager Validation**: Every obligation is checked before any balance is
//!    produced; solvers never re-validate
//! 3. **Private Copies**: Solvers consume a `NetBalances` by value, so each one
//!    works on its own clone and never observes another solver's mutations

use crate::models::obligation::Obligation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reducing obligations to net balances
///
/// The index is the position of the first offending obligation in the input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Obligation {index} references party {party}, but only {party_count} parties exist")]
    InvalidPartyReference {
        index: usize,
        party: usize,
        party_count: usize,
    },

    #[error("Obligation {index} has non-positive amount {amount}")]
    InvalidAmount { index: usize, amount: i64 },

    #[error("Obligation {index} has party {party} owing itself")]
    SelfObligation { index: usize, party: usize },

    #[error("Net balance of party {party} overflows i64")]
    BalanceOverflow { party: usize },
}

/// One signed net balance per party, indexed by party id
///
/// # Example
/// ```
/// use debt_settlement_core::{NetBalances, Obligation};
///
/// // Party 0 owes party 1, party 1 owes party 2
/// let obligations = vec![Obligation::new(0, 1, 10), Obligation::new(1, 2, 10)];
/// let balances = NetBalances::from_obligations(&obligations, 3).unwrap();
///
/// assert_eq!(balances.as_slice(), &[-10, 0, 10]);
/// assert_eq!(balances.total(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetBalances(Vec<i64>);

impl NetBalances {
    /// Reduce obligations to net balances for `party_count` parties
    ///
    /// For each obligation the amount is subtracted from the debtor and added
    /// to the creditor.
    ///
    /// # Errors
    ///
    /// - `InvalidPartyReference` if a debtor or creditor is outside `[0, party_count)`
    /// - `InvalidAmount` if an amount is zero or negative
    /// - `SelfObligation` if debtor and creditor are the same party
    /// - `BalanceOverflow` if a running balance leaves the i64 range
    pub fn from_obligations(
        obligations: &[Obligation],
        party_count: usize,
    ) -> Result<Self, BalanceError> {
        for (index, ob) in obligations.iter().enumerate() {
            for party in [ob.debtor(), ob.creditor()] {
                if party >= party_count {
                    return Err(BalanceError::InvalidPartyReference {
                        index,
                        party,
                        party_count,
                    });
                }
            }
            if ob.amount() <= 0 {
                return Err(BalanceError::InvalidAmount {
                    index,
                    amount: ob.amount(),
                });
            }
            if ob.debtor() == ob.creditor() {
                return Err(BalanceError::SelfObligation {
                    index,
                    party: ob.debtor(),
                });
            }
        }

        let mut net = vec![0i64; party_count];
        for ob in obligations {
            let debtor = ob.debtor();
            let creditor = ob.creditor();

            net[debtor] = net[debtor]
                .checked_sub(ob.amount())
                .ok_or(BalanceError::BalanceOverflow { party: debtor })?;
            net[creditor] = net[creditor]
                .checked_add(ob.amount())
                .ok_or(BalanceError::BalanceOverflow { party: creditor })?;
        }

        tracing::trace!(
            parties = party_count,
            obligations = obligations.len(),
            "reduced obligations to net balances"
        );

        Ok(Self(net))
    }

    /// Wrap an existing balance vector as-is
    ///
    /// No zero-sum check is made. This is how callers feed hand-built (and
    /// possibly malformed) vectors straight to the solvers.
    pub fn from_vec(balances: Vec<i64>) -> Self {
        Self(balances)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [i64] {
        &mut self.0
    }

    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }

    /// Number of parties (including settled ones)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signed sum of all balances
    ///
    /// Zero for every vector produced by [`from_obligations`](Self::from_obligations).
    /// Accumulated in i128 so malformed vectors cannot overflow.
    pub fn total(&self) -> i128 {
        self.0.iter().map(|&b| b as i128).sum()
    }

    /// True when every party's balance is zero
    pub fn is_settled(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// The non-zero balances in party order (the "debt set")
    pub fn non_zero(&self) -> Vec<i64> {
        self.0.iter().copied().filter(|&b| b != 0).collect()
    }
}

impl From<Vec<i64>> for NetBalances {
    fn from(balances: Vec<i64>) -> Self {
        Self::from_vec(balances)
    }
}
