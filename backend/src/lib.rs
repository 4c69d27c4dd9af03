//! Debt Settlement Core - Rust Engine
//!
//! Minimum-transfer settlement of pairwise debts: obligations are reduced to
//! one net balance per party, then solved by a greedy heuristic, an
//! exhaustive search or a subset dynamic program.
//!
//! # Architecture
//!
//! - **models**: Domain types (Obligation, NetBalances) and balance reduction
//! - **settlement**: The three solvers behind the `Settler` trait
//! - **rng**: Deterministic random number generation
//! - **generator**: Seeded synthetic obligation lists
//! - **harness**: Timed benchmark sweep and CSV/JSON report export
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 whole units
//! 2. Reduced balances always sum to zero
//! 3. Solvers are pure and deterministic; each consumes its own copy
//! 4. All randomness is seeded and lives outside the solvers

// Module declarations
pub mod generator;
pub mod harness;
pub mod models;
pub mod rng;
pub mod settlement;

// Re-exports for convenience
pub use generator::{GeneratorConfig, GeneratorError, ObligationGenerator};
pub use harness::{BenchmarkConfig, BenchmarkHarness, BenchmarkReport, HarnessError};
pub use models::{BalanceError, NetBalances, Obligation};
pub use rng::RngManager;
pub use settlement::{
    exhaustive_min_transfers, greedy_min_transfers, subset_dp_min_transfers, ExhaustiveSettler,
    GreedySettler, Settler, SettlerKind, SolveError, SubsetDpSettler,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn debt_settlement_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(m)
}
