//! Benchmark harness and report export
//!
//! See `engine.rs` for the timed sweep and `report.rs` for CSV/JSON output.

pub mod engine;
pub mod report;

// Re-export main types for convenience
pub use engine::{
    BenchmarkConfig, BenchmarkHarness, CaseResult, ConfigError, HarnessError, SettlerOutcome,
};
pub use report::{compute_config_hash, BenchmarkReport, BenchmarkRow, ReportError, CSV_HEADER};
