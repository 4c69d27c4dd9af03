//! Benchmark report export
//!
//! Two formats:
//! - **CSV**: one row per party count with the fixed column set
//!   `n, transactions_{greedy,backtracking,dp}, time_{greedy,backtracking,dp}_us`
//! - **JSON**: the full report (config, config hash, per-solver outcomes)
//!
//! The config hash is SHA-256 over the JSON-serialized config, so two reports
//! can be checked for having been produced by the same run parameters.

use crate::harness::engine::{BenchmarkConfig, CaseResult};
use crate::settlement::SettlerKind;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One CSV record
///
/// Columns of solvers that were not run stay empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub n: usize,
    pub transactions_greedy: Option<usize>,
    pub transactions_backtracking: Option<usize>,
    pub transactions_dp: Option<usize>,
    pub time_greedy_us: Option<f64>,
    pub time_backtracking_us: Option<f64>,
    pub time_dp_us: Option<f64>,
}

impl From<&CaseResult> for BenchmarkRow {
    fn from(case: &CaseResult) -> Self {
        let count = |kind| case.outcome(kind).map(|o| o.transfers);
        let time = |kind| case.outcome(kind).map(|o| o.mean_micros);

        BenchmarkRow {
            n: case.party_count,
            transactions_greedy: count(SettlerKind::Greedy),
            transactions_backtracking: count(SettlerKind::Exhaustive),
            transactions_dp: count(SettlerKind::SubsetDp),
            time_greedy_us: time(SettlerKind::Greedy),
            time_backtracking_us: time(SettlerKind::Exhaustive),
            time_dp_us: time(SettlerKind::SubsetDp),
        }
    }
}

/// Result of a complete benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub config: BenchmarkConfig,

    /// Hex SHA-256 of the serialized config
    pub config_hash: String,

    pub cases: Vec<CaseResult>,
}

impl BenchmarkReport {
    pub fn new(config: BenchmarkConfig, cases: Vec<CaseResult>) -> Result<Self, ReportError> {
        let config_hash = compute_config_hash(&config)?;
        Ok(Self {
            config,
            config_hash,
            cases,
        })
    }

    pub fn rows(&self) -> Vec<BenchmarkRow> {
        self.cases.iter().map(BenchmarkRow::from).collect()
    }

    /// Write the CSV form (header included) to any writer
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in self.rows() {
            wtr.serialize(row)?;
        }
        // An empty report still gets its header line
        if self.cases.is_empty() {
            wtr.write_record(CSV_HEADER)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn export_csv(&self, path: &Path) -> Result<(), ReportError> {
        self.write_csv(File::create(path)?)?;
        tracing::info!(path = %path.display(), rows = self.cases.len(), "exported CSV report");
        Ok(())
    }

    pub fn export_json(&self, path: &Path) -> Result<(), ReportError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), "exported JSON report");
        Ok(())
    }
}

pub const CSV_HEADER: [&str; 7] = [
    "n",
    "transactions_greedy",
    "transactions_backtracking",
    "transactions_dp",
    "time_greedy_us",
    "time_backtracking_us",
    "time_dp_us",
];

/// Hex SHA-256 of the JSON form of `config`
///
/// Struct field order fixes the JSON layout, so equal configs hash equally.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, ReportError> {
    let json = serde_json::to_vec(config)?;

    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}
