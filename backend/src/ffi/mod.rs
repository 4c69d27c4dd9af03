//! PyO3 bindings
//!
//! Thin Python interface over the reducer and the three solvers. Balances
//! cross the boundary as plain `list[int]`; obligations as
//! `list[tuple[int, int, int]]` of `(debtor, creditor, amount)`.
//!
//! # Example (from Python)
//!
//! ```python
//! from debt_settlement_core import net_balances, greedy, exhaustive, subset_dp
//!
//! balances = net_balances([(0, 1, 10), (1, 2, 10)], 3)   # [-10, 0, 10]
//! assert greedy(balances) == exhaustive(balances) == subset_dp(balances) == 1
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::models::{NetBalances, Obligation};
use crate::settlement::{
    exhaustive_min_transfers, greedy_min_transfers, subset_dp_min_transfers, SolveError,
};

fn solve_err(e: SolveError) -> PyErr {
    PyRuntimeError::new_err(e.to_string())
}

/// Reduce `(debtor, creditor, amount)` tuples to one net balance per party
///
/// Raises ValueError for out-of-range parties, non-positive amounts or
/// self-obligations.
#[pyfunction]
fn net_balances(obligations: Vec<(usize, usize, i64)>, party_count: usize) -> PyResult<Vec<i64>> {
    let obligations: Vec<Obligation> = obligations.into_iter().map(Obligation::from).collect();
    NetBalances::from_obligations(&obligations, party_count)
        .map(NetBalances::into_inner)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn greedy(balances: Vec<i64>) -> PyResult<usize> {
    greedy_min_transfers(&balances).map_err(solve_err)
}

#[pyfunction]
fn exhaustive(balances: Vec<i64>) -> PyResult<usize> {
    exhaustive_min_transfers(&balances).map_err(solve_err)
}

#[pyfunction]
fn subset_dp(balances: Vec<i64>) -> PyResult<usize> {
    subset_dp_min_transfers(&balances).map_err(solve_err)
}

pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(net_balances, m)?)?;
    m.add_function(wrap_pyfunction!(greedy, m)?)?;
    m.add_function(wrap_pyfunction!(exhaustive, m)?)?;
    m.add_function(wrap_pyfunction!(subset_dp, m)?)?;
    Ok(())
}
