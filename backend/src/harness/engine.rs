//! Benchmark harness - timed solver runs over generated obligation lists
//!
//! For every party count `n` in `min_parties..=max_parties`:
//! 1. Generate `n * obligations_per_party` obligations (one seeded generator
//!    for the whole run)
//! 2. Reduce them to net balances once
//! 3. Run each configured solver `repeat` times, each time on a fresh clone
//! 4. Record the transfer count and the mean time per call
//!
//! # Critical Invariants
//!
//! - **Determinism**: Same config (seed included) → same counts
//! - **Isolation**: No solver run ever sees another run's mutated balances
//! - **Idempotence check**: A solver returning different counts across
//!   repetitions aborts the run with `NonDeterministic`
//!
//! # Example
//!
//! ```rust
//! use debt_settlement_core::harness::{BenchmarkConfig, BenchmarkHarness};
//!
//! let config = BenchmarkConfig {
//!     min_parties: 4,
//!     max_parties: 6,
//!     repeat: 3,
//!     ..BenchmarkConfig::default()
//! };
//! let report = BenchmarkHarness::new(config).unwrap().run().unwrap();
//! assert_eq!(report.cases.len(), 3);
//! ```

use crate::generator::{GeneratorConfig, GeneratorError, ObligationGenerator};
use crate::models::{BalanceError, NetBalances, Obligation};
use crate::settlement::{Settler, SettlerKind, SolveError, MAX_SUBSET_BALANCES};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

use super::report::{BenchmarkReport, ReportError};

// ============================================================================
// Configuration
// ============================================================================

/// Benchmark run configuration
///
/// Defaults reproduce the classic sweep: 4 to 12 parties, three obligations
/// per party, amounts up to 100, 1000 repetitions per solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Smallest party count (inclusive)
    pub min_parties: usize,

    /// Largest party count (inclusive)
    pub max_parties: usize,

    /// Obligations generated per party
    pub obligations_per_party: usize,

    /// Largest obligation amount
    pub max_amount: i64,

    /// Timed repetitions per solver and case
    pub repeat: usize,

    /// Seed for obligation generation
    pub seed: u64,

    /// Solvers to run, in this order
    pub settlers: Vec<SettlerKind>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            min_parties: 4,
            max_parties: 12,
            obligations_per_party: 3,
            max_amount: 100,
            repeat: 1000,
            seed: 42,
            settlers: SettlerKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("min_parties must be at least 2, got {0}")]
    TooFewParties(usize),

    #[error("min_parties ({min}) exceeds max_parties ({max})")]
    EmptyRange { min: usize, max: usize },

    #[error("repeat must be at least 1")]
    ZeroRepeat,

    #[error("max_amount must be positive, got {0}")]
    InvalidMaxAmount(i64),

    #[error("No solvers selected")]
    NoSettlers,

    #[error("Solver {0} selected more than once")]
    DuplicateSettler(SettlerKind),

    #[error("subset-dp supports at most {limit} parties, max_parties is {max}")]
    TooManyParties { max: usize, limit: usize },

    #[error("{parties} parties x {per_party} obligations each overflows usize")]
    TooManyObligations { parties: usize, per_party: usize },
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_parties < 2 {
            return Err(ConfigError::TooFewParties(self.min_parties));
        }
        if self.min_parties > self.max_parties {
            return Err(ConfigError::EmptyRange {
                min: self.min_parties,
                max: self.max_parties,
            });
        }
        if self.repeat == 0 {
            return Err(ConfigError::ZeroRepeat);
        }
        if self.max_amount <= 0 {
            return Err(ConfigError::InvalidMaxAmount(self.max_amount));
        }
        self.obligation_count(self.max_parties)?;
        if self.settlers.is_empty() {
            return Err(ConfigError::NoSettlers);
        }
        for (i, kind) in self.settlers.iter().enumerate() {
            if self.settlers[..i].contains(kind) {
                return Err(ConfigError::DuplicateSettler(*kind));
            }
        }
        if self.settlers.contains(&SettlerKind::SubsetDp) && self.max_parties > MAX_SUBSET_BALANCES
        {
            return Err(ConfigError::TooManyParties {
                max: self.max_parties,
                limit: MAX_SUBSET_BALANCES,
            });
        }
        Ok(())
    }

    /// Obligations generated for a case with `party_count` parties
    pub fn obligation_count(&self, party_count: usize) -> Result<usize, ConfigError> {
        party_count
            .checked_mul(self.obligations_per_party)
            .ok_or(ConfigError::TooManyObligations {
                parties: party_count,
                per_party: self.obligations_per_party,
            })
    }
}

// ============================================================================
// Errors and Results
// ============================================================================

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),

    #[error("Solver error: {0}")]
    Solve(#[from] SolveError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Solver {solver} returned {first} and then {later} for the same input")]
    NonDeterministic {
        solver: &'static str,
        first: usize,
        later: usize,
    },
}

/// One solver's result on one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlerOutcome {
    pub kind: SettlerKind,

    /// Transfer count (identical across repetitions)
    pub transfers: usize,

    /// Mean wall-clock time per call in microseconds
    pub mean_micros: f64,
}

/// All solver results for one party count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub party_count: usize,
    pub obligation_count: usize,
    pub outcomes: Vec<SettlerOutcome>,
}

impl CaseResult {
    pub fn outcome(&self, kind: SettlerKind) -> Option<&SettlerOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct BenchmarkHarness {
    config: BenchmarkConfig,
    settlers: Vec<(SettlerKind, Box<dyn Settler>)>,
}

impl BenchmarkHarness {
    /// Create a harness, validating the configuration first
    pub fn new(config: BenchmarkConfig) -> Result<Self, HarnessError> {
        config.validate()?;

        let settlers = config
            .settlers
            .iter()
            .map(|&kind| (kind, kind.settler()))
            .collect();

        Ok(Self { config, settlers })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Run the full party-count sweep
    pub fn run(&self) -> Result<BenchmarkReport, HarnessError> {
        let mut generator = ObligationGenerator::new(self.config.seed);
        let mut cases = Vec::new();

        for party_count in self.config.min_parties..=self.config.max_parties {
            let gen_config = GeneratorConfig {
                party_count,
                obligation_count: self.config.obligation_count(party_count)?,
                max_amount: self.config.max_amount,
            };
            let obligations = generator.generate(&gen_config)?;

            tracing::info!(
                parties = party_count,
                obligations = obligations.len(),
                "running case"
            );

            cases.push(self.run_case(&obligations, party_count)?);
        }

        Ok(BenchmarkReport::new(self.config.clone(), cases)?)
    }

    /// Reduce `obligations` once and time every configured solver on it
    pub fn run_case(
        &self,
        obligations: &[Obligation],
        party_count: usize,
    ) -> Result<CaseResult, HarnessError> {
        let balances = NetBalances::from_obligations(obligations, party_count)?;

        let mut outcomes = Vec::with_capacity(self.settlers.len());
        for (kind, settler) in &self.settlers {
            let (transfers, elapsed) = self.measure(settler.as_ref(), &balances)?;
            let mean_micros = elapsed.as_secs_f64() * 1e6 / self.config.repeat as f64;

            tracing::debug!(
                solver = settler.name(),
                parties = party_count,
                transfers,
                mean_micros,
                "measured"
            );

            outcomes.push(SettlerOutcome {
                kind: *kind,
                transfers,
                mean_micros,
            });
        }

        Ok(CaseResult {
            party_count,
            obligation_count: obligations.len(),
            outcomes,
        })
    }

    /// Total time of `repeat` calls, each on its own clone of `balances`
    ///
    /// Cloning happens outside the timed region.
    fn measure(
        &self,
        settler: &dyn Settler,
        balances: &NetBalances,
    ) -> Result<(usize, Duration), HarnessError> {
        let mut first: Option<usize> = None;
        let mut total = Duration::ZERO;

        for _ in 0..self.config.repeat {
            let copy = balances.clone();

            let started = Instant::now();
            let transfers = settler.settle(copy)?;
            total += started.elapsed();

            match first {
                None => first = Some(transfers),
                Some(expected) if expected != transfers => {
                    return Err(HarnessError::NonDeterministic {
                        solver: settler.name(),
                        first: expected,
                        later: transfers,
                    });
                }
                Some(_) => {}
            }
        }

        // repeat >= 1 is enforced by validate()
        Ok((first.unwrap_or_default(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Flaky(AtomicUsize);

    impl Settler for Flaky {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn settle(&self, _balances: NetBalances) -> Result<usize, SolveError> {
            Ok(self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn quick_config() -> BenchmarkConfig {
        BenchmarkConfig {
            min_parties: 4,
            max_parties: 5,
            repeat: 2,
            ..BenchmarkConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(BenchmarkConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let cases = [
            (
                BenchmarkConfig { min_parties: 1, ..quick_config() },
                ConfigError::TooFewParties(1),
            ),
            (
                BenchmarkConfig { min_parties: 6, max_parties: 5, ..quick_config() },
                ConfigError::EmptyRange { min: 6, max: 5 },
            ),
            (
                BenchmarkConfig { repeat: 0, ..quick_config() },
                ConfigError::ZeroRepeat,
            ),
            (
                BenchmarkConfig { max_amount: -1, ..quick_config() },
                ConfigError::InvalidMaxAmount(-1),
            ),
            (
                BenchmarkConfig { settlers: vec![], ..quick_config() },
                ConfigError::NoSettlers,
            ),
            (
                BenchmarkConfig {
                    settlers: vec![SettlerKind::Greedy, SettlerKind::Greedy],
                    ..quick_config()
                },
                ConfigError::DuplicateSettler(SettlerKind::Greedy),
            ),
            (
                BenchmarkConfig { max_parties: 30, ..quick_config() },
                ConfigError::TooManyParties { max: 30, limit: MAX_SUBSET_BALANCES },
            ),
            (
                BenchmarkConfig { obligations_per_party: usize::MAX, ..quick_config() },
                ConfigError::TooManyObligations { parties: 5, per_party: usize::MAX },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_large_sweep_allowed_without_subset_dp() {
        let config = BenchmarkConfig {
            max_parties: 40,
            settlers: vec![SettlerKind::Greedy],
            ..quick_config()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_obligation_count_is_checked() {
        let config = quick_config();
        assert_eq!(config.obligation_count(5), Ok(15));

        let huge = BenchmarkConfig { obligations_per_party: usize::MAX / 2, ..quick_config() };
        assert_eq!(huge.obligation_count(2), Ok(usize::MAX - 1));
        assert_eq!(
            huge.obligation_count(3),
            Err(ConfigError::TooManyObligations { parties: 3, per_party: usize::MAX / 2 })
        );
    }

    #[test]
    fn test_measure_detects_nondeterminism() {
        let harness = BenchmarkHarness::new(quick_config()).unwrap();
        let balances = NetBalances::from_vec(vec![-1, 1]);
        let err = harness
            .measure(&Flaky(AtomicUsize::new(0)), &balances)
            .unwrap_err();
        assert!(matches!(
            err,
            HarnessError::NonDeterministic {
                solver: "flaky",
                first: 0,
                later: 1
            }
        ));
    }

    #[test]
    fn test_run_case_reports_reduction_errors() {
        let harness = BenchmarkHarness::new(quick_config()).unwrap();
        let err = harness
            .run_case(&[Obligation::new(0, 9, 5)], 4)
            .unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Balance(BalanceError::InvalidPartyReference { party: 9, .. })
        ));
    }
}
