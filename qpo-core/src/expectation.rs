//! Expectation value of the cost operator
//!
//! Because H_C is diagonal, the expectation reduces to a
//! probability-weighted sum over the diagonal vector at O(2^n) cost; the
//! dense matrix form is never consulted.

use crate::cost_hamiltonian::CostHamiltonian;
use crate::error::{QpoError, Result};
use crate::state::QaoaState;

/// Expected cost <psi| H_C |psi> = sum_s |psi[s]|^2 * diag[s].
///
/// Makes no sign assumption about the diagonal; the result is whatever the
/// cost landscape produces.
pub fn expected_cost(state: &QaoaState, cost: &CostHamiltonian) -> Result<f64> {
    if state.dim() != cost.dim() {
        return Err(QpoError::DimensionMismatch {
            expected: cost.dim(),
            actual: state.dim(),
        });
    }

    let value = state
        .amplitudes()
        .iter()
        .zip(cost.diag().iter())
        .map(|(amp, &c)| amp.norm_sqr() * c)
        .sum();
    Ok(value)
}
