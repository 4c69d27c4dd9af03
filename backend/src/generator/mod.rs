//! Synthetic obligation generation
//!
//! Produces random but reproducible obligation lists for benchmarking and
//! tests. All generation goes through a seeded [`RngManager`].
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same obligations
//! 2. **Well-formed output**: Parties are in range, debtor ≠ creditor,
//!    amounts lie in `[1, max_amount]`, so every list reduces cleanly
//!
//! # Example
//!
//! ```
//! use debt_settlement_core::generator::{GeneratorConfig, ObligationGenerator};
//! use debt_settlement_core::NetBalances;
//!
//! let config = GeneratorConfig { party_count: 6, obligation_count: 18, max_amount: 100 };
//! let obligations = ObligationGenerator::new(42).generate(&config).unwrap();
//!
//! assert_eq!(obligations.len(), 18);
//! let balances = NetBalances::from_obligations(&obligations, 6).unwrap();
//! assert_eq!(balances.total(), 0);
//! ```

use crate::models::Obligation;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of one generated obligation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of parties (ids `0..party_count`)
    pub party_count: usize,

    /// Number of obligations to draw
    pub obligation_count: usize,

    /// Largest amount drawn (inclusive); smallest is always 1
    pub max_amount: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            party_count: 4,
            obligation_count: 12,
            max_amount: 100,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("At least 2 parties are needed to draw an obligation, got {0}")]
    TooFewParties(usize),

    #[error("Maximum amount must be positive, got {0}")]
    InvalidMaxAmount(i64),
}

/// Seeded generator of obligation lists
///
/// Successive calls to [`generate`](Self::generate) continue the same random
/// sequence, so a harness can draw many test cases from one seed.
#[derive(Debug, Clone)]
pub struct ObligationGenerator {
    rng: RngManager,
}

impl ObligationGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngManager::new(seed),
        }
    }

    /// Draw `config.obligation_count` obligations
    ///
    /// Debtor and creditor are uniform over all parties; the creditor is
    /// redrawn until it differs from the debtor.
    pub fn generate(&mut self, config: &GeneratorConfig) -> Result<Vec<Obligation>, GeneratorError> {
        if config.party_count < 2 && config.obligation_count > 0 {
            return Err(GeneratorError::TooFewParties(config.party_count));
        }
        if config.max_amount <= 0 {
            return Err(GeneratorError::InvalidMaxAmount(config.max_amount));
        }

        let mut obligations = Vec::with_capacity(config.obligation_count);
        for _ in 0..config.obligation_count {
            let debtor = self.rng.index(config.party_count);
            let mut creditor = self.rng.index(config.party_count);
            while creditor == debtor {
                creditor = self.rng.index(config.party_count);
            }
            let amount = self.rng.range(1, config.max_amount.saturating_add(1));

            obligations.push(Obligation::new(debtor, creditor, amount));
        }

        tracing::trace!(
            parties = config.party_count,
            obligations = obligations.len(),
            "generated obligations"
        );

        Ok(obligations)
    }

    /// Current RNG state; a generator seeded with it continues the sequence
    pub fn state(&self) -> u64 {
        self.rng.get_state()
    }
}
