//! Subcommand implementations

use anyhow::{bail, Context};
use std::fs;
use std::path::{Path, PathBuf};

use debt_settlement_core::{
    BenchmarkConfig, BenchmarkHarness, GeneratorConfig, NetBalances, Obligation,
    ObligationGenerator, Settler, SettlerKind,
};

pub struct BenchArgs {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub repeat: Option<usize>,
    pub solvers: Vec<SettlerKind>,
    pub csv: PathBuf,
    pub json: Option<PathBuf>,
}

pub fn bench(args: BenchArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<BenchmarkConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => BenchmarkConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(min) = args.min {
        config.min_parties = min;
    }
    if let Some(max) = args.max {
        config.max_parties = max;
    }
    if let Some(repeat) = args.repeat {
        config.repeat = repeat;
    }
    if !args.solvers.is_empty() {
        config.settlers = args.solvers;
    }

    let harness = BenchmarkHarness::new(config)?;
    tracing::info!(
        min = harness.config().min_parties,
        max = harness.config().max_parties,
        repeat = harness.config().repeat,
        seed = harness.config().seed,
        "starting benchmark"
    );

    let report = harness.run()?;

    report
        .export_csv(&args.csv)
        .with_context(|| format!("writing {}", args.csv.display()))?;
    if let Some(path) = &args.json {
        report
            .export_json(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    println!("Results exported to {}", args.csv.display());
    Ok(())
}

pub fn solve(input: &Path, parties: Option<usize>, solvers: Vec<SettlerKind>) -> anyhow::Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading obligations {}", input.display()))?;
    let obligations: Vec<Obligation> = serde_json::from_str(&text)
        .with_context(|| format!("parsing obligations {}", input.display()))?;

    let party_count = parties.unwrap_or_else(|| infer_party_count(&obligations));

    let balances = NetBalances::from_obligations(&obligations, party_count)?;
    tracing::debug!(balances = ?balances.as_slice(), "net balances");

    let kinds = if solvers.is_empty() {
        SettlerKind::ALL.to_vec()
    } else {
        solvers
    };

    let mut failed = false;
    for kind in kinds {
        match kind.settler().settle(balances.clone()) {
            Ok(count) => println!("{:<12} {}", kind, count),
            Err(e) => {
                // Keep going: the other solvers may still answer
                tracing::error!(solver = %kind, error = %e, "solver failed");
                failed = true;
            }
        }
    }

    if failed {
        bail!("one or more solvers failed");
    }
    Ok(())
}

/// Highest party id + 1
///
/// Saturates at `usize::MAX`, so an id of `usize::MAX` stays out of range and
/// the reducer reports it as an invalid party reference.
fn infer_party_count(obligations: &[Obligation]) -> usize {
    obligations
        .iter()
        .map(|ob| ob.debtor().max(ob.creditor()).saturating_add(1))
        .max()
        .unwrap_or(0)
}

pub fn generate(parties: usize, count: usize, max_amount: i64, seed: u64) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        party_count: parties,
        obligation_count: count,
        max_amount,
    };
    let obligations = ObligationGenerator::new(seed).generate(&config)?;
    println!("{}", serde_json::to_string_pretty(&obligations)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use debt_settlement_core::BalanceError;

    #[test]
    fn test_infer_party_count_from_highest_id() {
        let obligations = vec![Obligation::new(0, 4, 10), Obligation::new(2, 1, 3)];
        assert_eq!(infer_party_count(&obligations), 5);
        assert_eq!(infer_party_count(&[]), 0);
    }

    #[test]
    fn test_max_party_id_rejected_instead_of_overflowing() {
        let obligations = vec![Obligation::new(usize::MAX, 0, 5)];
        let party_count = infer_party_count(&obligations);
        assert_eq!(party_count, usize::MAX);

        let err = NetBalances::from_obligations(&obligations, party_count).unwrap_err();
        assert_eq!(
            err,
            BalanceError::InvalidPartyReference {
                index: 0,
                party: usize::MAX,
                party_count: usize::MAX,
            }
        );
    }

    #[test]
    fn test_solve_reports_max_party_id_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("obligations.json");
        fs::write(
            &input,
            r#"[{"debtor":18446744073709551615,"creditor":0,"amount":5}]"#,
        )
        .unwrap();

        let err = solve(&input, None, vec![]).unwrap_err();
        assert!(err.downcast_ref::<BalanceError>().is_some(), "{:#}", err);
    }
}
