//! Obligation model
//!
//! Represents a single debt between two parties.
//! Each obligation has:
//! - Debtor party index (the party that owes)
//! - Creditor party index (the party that is owed)
//! - Amount (i64, whole currency units)
//!
//! Obligations are plain records. They are validated once, eagerly, when
//! reduced to net balances (see `models::balance`), never by the solvers.

use serde::{Deserialize, Serialize};

/// A directed, amount-weighted debt from `debtor` to `creditor`
///
/// # Example
/// ```
/// use debt_settlement_core::Obligation;
///
/// // Party 0 owes party 1 ten units
/// let ob = Obligation::new(0, 1, 10);
/// assert_eq!(ob.debtor(), 0);
/// assert_eq!(ob.creditor(), 1);
/// assert_eq!(ob.amount(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obligation {
    /// Party that owes the amount
    debtor: usize,

    /// Party that is owed the amount
    creditor: usize,

    /// Amount owed (must be positive to reduce successfully)
    amount: i64,
}

impl Obligation {
    /// Create a new obligation
    ///
    /// No validation happens here; out-of-range parties, self-obligations
    /// and non-positive amounts are rejected by
    /// [`NetBalances::from_obligations`](crate::NetBalances::from_obligations).
    pub fn new(debtor: usize, creditor: usize, amount: i64) -> Self {
        Self {
            debtor,
            creditor,
            amount,
        }
    }

    pub fn debtor(&self) -> usize {
        self.debtor
    }

    pub fn creditor(&self) -> usize {
        self.creditor
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl From<(usize, usize, i64)> for Obligation {
    fn from((debtor, creditor, amount): (usize, usize, i64)) -> Self {
        Self::new(debtor, creditor, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tuple() {
        let ob: Obligation = (2, 0, 35).into();
        assert_eq!(ob, Obligation::new(2, 0, 35));
    }

    #[test]
    fn test_json_shape() {
        let ob = Obligation::new(1, 2, 10);
        let json = serde_json::to_string(&ob).unwrap();
        assert_eq!(json, r#"{"debtor":1,"creditor":2,"amount":10}"#);

        let back: Obligation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ob);
    }
}
